// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use twilight_model::channel::message::AllowedMentions;
use twilight_model::channel::message::component::Component;
use twilight_model::channel::message::embed::Embed;
use twilight_model::channel::permission_overwrite::PermissionOverwrite;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, GuildMarker, InteractionMarker, MessageMarker};

mod twilight;

#[cfg(test)]
pub mod testing;

pub use twilight::TwilightPlatform;

/// The pieces of an interaction needed to respond to it
#[derive(Clone, Debug)]
pub struct InteractionHandle {
	pub id: Id<InteractionMarker>,
	pub token: String,
}

/// Contains data necessary to post a message
#[derive(Clone, Debug, Default)]
pub struct MessageData {
	pub content: Option<String>,
	pub embeds: Vec<Embed>,
	pub components: Vec<Component>,
	pub allowed_mentions: AllowedMentions,
}

#[derive(Clone, Debug)]
pub struct ChannelRequest {
	pub guild_id: Id<GuildMarker>,
	pub name: String,
	pub parent_id: Id<ChannelMarker>,
	pub permission_overwrites: Vec<PermissionOverwrite>,
}

/// A message read back from a channel's history
#[derive(Clone, Debug)]
pub struct FetchedMessage {
	pub timestamp: DateTime<Utc>,
	pub author_tag: String,
	pub content: String,
}

#[derive(Clone, Debug)]
pub struct FileUpload {
	pub file_name: String,
	pub data: Vec<u8>,
}

/// Every Discord side effect the bot produces goes through this.
#[async_trait]
pub trait Platform: Send + Sync {
	async fn reply_to_message(
		&self,
		channel_id: Id<ChannelMarker>,
		message_id: Id<MessageMarker>,
		content: &str,
	) -> miette::Result<()>;

	async fn send_message(&self, channel_id: Id<ChannelMarker>, message: &MessageData) -> miette::Result<()>;

	/// Creates a guild text channel, returning its ID.
	async fn create_channel(&self, request: &ChannelRequest) -> miette::Result<Id<ChannelMarker>>;

	/// Gets up to `limit` messages from the channel, most recent first.
	async fn recent_messages(&self, channel_id: Id<ChannelMarker>, limit: u16) -> miette::Result<Vec<FetchedMessage>>;

	async fn send_file(&self, channel_id: Id<ChannelMarker>, content: &str, file: FileUpload) -> miette::Result<()>;

	async fn delete_channel(&self, channel_id: Id<ChannelMarker>) -> miette::Result<()>;

	async fn respond_to_interaction(
		&self,
		interaction: &InteractionHandle,
		content: &str,
		ephemeral: bool,
	) -> miette::Result<()>;
}
