// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::commands::{CommandContext, DispatchOutcome, dispatch};
use super::context::BotContext;
use super::utils::users::UserData;
use crate::config::COMMAND_PREFIX;
use twilight_model::channel::message::Message;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, MessageMarker};

/// A text message that may be a command
#[derive(Clone, Debug)]
pub struct IncomingMessage {
	pub channel_id: Id<ChannelMarker>,
	pub message_id: Id<MessageMarker>,
	pub author: UserData,
	pub content: String,
}

impl From<&Message> for IncomingMessage {
	fn from(message: &Message) -> Self {
		Self {
			channel_id: message.channel_id,
			message_id: message.id,
			author: UserData::from(&message.author),
			content: message.content.clone(),
		}
	}
}

pub async fn handle_message(message: &Message, bot: &BotContext) -> Option<DispatchOutcome> {
	if message.author.bot {
		return None;
	}
	handle_text(&IncomingMessage::from(message), bot).await
}

/// Dispatches the message if it starts with the command prefix. Returns `None` for anything else.
pub async fn handle_text(message: &IncomingMessage, bot: &BotContext) -> Option<DispatchOutcome> {
	if !message.content.starts_with(COMMAND_PREFIX) {
		return None;
	}
	let context = CommandContext { message, bot };
	Some(dispatch(&context, &message.content).await)
}
