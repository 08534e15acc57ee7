// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{ChannelRequest, FetchedMessage, FileUpload, InteractionHandle, MessageData, Platform};
use crate::discord::utils::timestamp::datetime_from_timestamp;
use crate::discord::utils::users::user_tag;
use async_trait::async_trait;
use miette::{IntoDiagnostic, miette};
use std::sync::Arc;
use twilight_http::client::Client;
use twilight_model::channel::ChannelType;
use twilight_model::channel::message::MessageFlags;
use twilight_model::http::attachment::Attachment;
use twilight_model::http::interaction::{InteractionResponse, InteractionResponseType};
use twilight_model::id::Id;
use twilight_model::id::marker::{ApplicationMarker, ChannelMarker, MessageMarker};
use twilight_util::builder::InteractionResponseDataBuilder;

/// [Platform] backed by the Discord REST API
pub struct TwilightPlatform {
	http_client: Arc<Client>,
	application_id: Id<ApplicationMarker>,
}

impl TwilightPlatform {
	pub fn new(http_client: Arc<Client>, application_id: Id<ApplicationMarker>) -> Self {
		Self {
			http_client,
			application_id,
		}
	}
}

#[async_trait]
impl Platform for TwilightPlatform {
	async fn reply_to_message(
		&self,
		channel_id: Id<ChannelMarker>,
		message_id: Id<MessageMarker>,
		content: &str,
	) -> miette::Result<()> {
		self.http_client
			.create_message(channel_id)
			.content(content)
			.reply(message_id)
			.await
			.into_diagnostic()?;
		Ok(())
	}

	async fn send_message(&self, channel_id: Id<ChannelMarker>, message: &MessageData) -> miette::Result<()> {
		let mut create_message = self.http_client.create_message(channel_id);
		if let Some(content) = &message.content {
			create_message = create_message.content(content);
		}
		create_message
			.embeds(&message.embeds)
			.components(&message.components)
			.allowed_mentions(Some(&message.allowed_mentions))
			.await
			.into_diagnostic()?;
		Ok(())
	}

	async fn create_channel(&self, request: &ChannelRequest) -> miette::Result<Id<ChannelMarker>> {
		let channel = self
			.http_client
			.create_guild_channel(request.guild_id, &request.name)
			.kind(ChannelType::GuildText)
			.parent_id(request.parent_id)
			.permission_overwrites(&request.permission_overwrites)
			.await
			.into_diagnostic()?
			.model()
			.await
			.into_diagnostic()?;
		Ok(channel.id)
	}

	async fn recent_messages(&self, channel_id: Id<ChannelMarker>, limit: u16) -> miette::Result<Vec<FetchedMessage>> {
		let messages = self
			.http_client
			.channel_messages(channel_id)
			.limit(limit)
			.await
			.into_diagnostic()?
			.models()
			.await
			.into_diagnostic()?;

		messages
			.into_iter()
			.map(|message| {
				let Some(timestamp) = datetime_from_timestamp(&message.timestamp) else {
					return Err(miette!("Message {} has an out-of-range timestamp", message.id));
				};
				Ok(FetchedMessage {
					timestamp,
					author_tag: user_tag(&message.author),
					content: message.content,
				})
			})
			.collect()
	}

	async fn send_file(&self, channel_id: Id<ChannelMarker>, content: &str, file: FileUpload) -> miette::Result<()> {
		let attachments = [Attachment::from_bytes(file.file_name, file.data, 1)];
		self.http_client
			.create_message(channel_id)
			.content(content)
			.attachments(&attachments)
			.await
			.into_diagnostic()?;
		Ok(())
	}

	async fn delete_channel(&self, channel_id: Id<ChannelMarker>) -> miette::Result<()> {
		self.http_client.delete_channel(channel_id).await.into_diagnostic()?;
		Ok(())
	}

	async fn respond_to_interaction(
		&self,
		interaction: &InteractionHandle,
		content: &str,
		ephemeral: bool,
	) -> miette::Result<()> {
		let mut response = InteractionResponseDataBuilder::new().content(content);
		if ephemeral {
			response = response.flags(MessageFlags::EPHEMERAL);
		}
		let response = InteractionResponse {
			kind: InteractionResponseType::ChannelMessageWithSource,
			data: Some(response.build()),
		};
		self.http_client
			.interaction(self.application_id)
			.create_response(interaction.id, &interaction.token, &response)
			.await
			.into_diagnostic()?;
		Ok(())
	}
}
