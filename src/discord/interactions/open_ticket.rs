// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::ButtonPress;
use crate::discord::context::BotContext;
use crate::discord::platform::{ChannelRequest, MessageData};
use crate::discord::state::tickets::{OpenTicket, TicketCategory, TicketStates, ticket_channel_name};
use crate::discord::utils::components::close_ticket_button;
use crate::discord::utils::permissions::ticket_channel_overwrites;
use crate::discord::utils::timestamp::timestamp_from_datetime;
use crate::discord::utils::users::UserData;
use chrono::{DateTime, Utc};
use miette::{IntoDiagnostic, bail};
use twilight_mention::fmt::Mention;
use twilight_model::channel::message::AllowedMentions;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, GuildMarker};
use twilight_util::builder::embed::{EmbedBuilder, EmbedFooterBuilder};

pub const TICKET_COLOR: u32 = 0x5865F2;
const TICKET_CREATION_FAILED: &str = "❌ An error occurred while creating the ticket.";

/// Opens a new ticket channel for the user who pressed a category button. Every press opens a new channel.
pub async fn open_ticket(
	press: &ButtonPress,
	category: TicketCategory,
	bot: &BotContext,
) -> miette::Result<Option<Id<ChannelMarker>>> {
	let Some(guild_id) = press.guild_id else {
		bail!("Ticket button used outside of a guild");
	};
	let Some(user) = &press.user else {
		bail!("Ticket button interaction has no user");
	};

	let created_at = Utc::now();
	let channel_id = match create_ticket_channel(guild_id, user, category, created_at, bot).await {
		Ok(channel_id) => channel_id,
		Err(error) => {
			tracing::error!(source = ?error, user = %user.id, category = %category, "Failed to open ticket");
			bot.platform
				.respond_to_interaction(&press.handle, TICKET_CREATION_FAILED, true)
				.await?;
			return Ok(None);
		}
	};

	{
		let mut state = bot.bot_state.write().await;
		let ticket_states = state.entry::<TicketStates>().or_insert_with(TicketStates::default);
		ticket_states.record_open(
			channel_id,
			OpenTicket {
				category,
				creator: user.id,
				created_at,
			},
		);
	}

	let response = format!("Ticket created: {}", channel_id.mention());
	bot.platform.respond_to_interaction(&press.handle, &response, true).await?;

	Ok(Some(channel_id))
}

async fn create_ticket_channel(
	guild_id: Id<GuildMarker>,
	user: &UserData,
	category: TicketCategory,
	created_at: DateTime<Utc>,
	bot: &BotContext,
) -> miette::Result<Id<ChannelMarker>> {
	let owner = bot.layout.owner;
	let request = ChannelRequest {
		guild_id,
		name: ticket_channel_name(&user.name),
		parent_id: bot.layout.ticket_category,
		permission_overwrites: ticket_channel_overwrites(guild_id, &[user.id, owner]),
	};
	let channel_id = bot.platform.create_channel(&request).await?;

	let intro_result = match intro_message(user, category, created_at, bot) {
		Ok(message) => bot.platform.send_message(channel_id, &message).await,
		Err(error) => Err(error),
	};
	if let Err(error) = intro_result {
		// The user is told creation failed, so the half-made channel shouldn't be left behind.
		if let Err(delete_error) = bot.platform.delete_channel(channel_id).await {
			tracing::warn!(source = ?delete_error, channel = %channel_id, "Failed to remove ticket channel after intro failed");
		}
		return Err(error);
	}

	Ok(channel_id)
}

fn intro_message(
	user: &UserData,
	category: TicketCategory,
	created_at: DateTime<Utc>,
	bot: &BotContext,
) -> miette::Result<MessageData> {
	let owner = bot.layout.owner;
	let footer = EmbedFooterBuilder::new(format!("Ticket created by {}", user.tag)).build();
	let embed = EmbedBuilder::new()
		.color(TICKET_COLOR)
		.title(format!("🎟️ {} Ticket", category))
		.description("A staff member will assist you shortly. Please explain your issue in detail.")
		.footer(footer)
		.timestamp(timestamp_from_datetime(created_at).into_diagnostic()?)
		.validate()
		.into_diagnostic()?
		.build();

	let mut allowed_mentions = AllowedMentions::default();
	allowed_mentions.users.push(user.id);
	allowed_mentions.users.push(owner);
	Ok(MessageData {
		content: Some(format!("{} {}", user.id.mention(), owner.mention())),
		embeds: vec![embed],
		components: vec![close_ticket_button()],
		allowed_mentions,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::discord::commands::command_modules;
	use crate::discord::context::tests::{TEST_CATEGORY_ID, TEST_OWNER_ID, test_context};
	use crate::discord::interactions::route_button;
	use crate::discord::interactions::tests::button_press;
	use crate::discord::platform::testing::{CREATED_CHANNEL_ID, Operation, PlatformCall, RecordingPlatform};
	use std::sync::Arc;
	use twilight_model::channel::permission_overwrite::PermissionOverwriteType;
	use twilight_model::guild::Permissions;

	#[tokio::test]
	async fn purchase_button_opens_one_private_channel() {
		let platform = Arc::new(RecordingPlatform::new());
		let directory = tempfile::tempdir().unwrap();
		let bot = test_context(Arc::clone(&platform), command_modules(), directory.path());

		route_button(&button_press("ticket_purchase", Some("ticket-panel")), &bot)
			.await
			.unwrap();

		let calls = platform.calls();
		let created: Vec<&ChannelRequest> = calls
			.iter()
			.filter_map(|call| match call {
				PlatformCall::CreateChannel(request) => Some(request),
				_ => None,
			})
			.collect();
		assert_eq!(created.len(), 1);
		let request = created[0];
		assert_eq!(request.name, "ticket-dave");
		assert_eq!(request.guild_id.get(), 60);
		assert_eq!(request.parent_id.get(), TEST_CATEGORY_ID);

		let everyone = &request.permission_overwrites[0];
		assert_eq!(everyone.id.get(), 60);
		assert_eq!(everyone.deny, Permissions::VIEW_CHANNEL);
		let mut viewers: Vec<u64> = request
			.permission_overwrites
			.iter()
			.filter(|overwrite| {
				overwrite.kind == PermissionOverwriteType::Member
					&& overwrite.allow.contains(Permissions::VIEW_CHANNEL)
			})
			.map(|overwrite| overwrite.id.get())
			.collect();
		viewers.sort();
		assert_eq!(viewers, vec![80, TEST_OWNER_ID]);
	}

	#[tokio::test]
	async fn intro_message_then_ephemeral_acknowledgement() {
		let platform = Arc::new(RecordingPlatform::new());
		let directory = tempfile::tempdir().unwrap();
		let bot = test_context(Arc::clone(&platform), command_modules(), directory.path());

		let channel = open_ticket(&button_press("ticket_mm", None), TicketCategory::Middleman, &bot)
			.await
			.unwrap();
		assert_eq!(channel, Some(Id::new(CREATED_CHANNEL_ID)));

		let calls = platform.calls();
		assert_eq!(calls.len(), 3);
		let PlatformCall::Send { channel_id, message } = &calls[1] else {
			panic!("expected the intro message, got {:?}", calls[1]);
		};
		assert_eq!(channel_id.get(), CREATED_CHANNEL_ID);
		assert_eq!(
			message.content.as_deref(),
			Some(format!("<@80> <@{}>", TEST_OWNER_ID).as_str())
		);
		let embed = &message.embeds[0];
		assert_eq!(embed.title.as_deref(), Some("🎟️ MM Ticket"));
		assert_eq!(embed.color, Some(TICKET_COLOR));
		assert_eq!(
			embed.footer.as_ref().map(|footer| footer.text.as_str()),
			Some("Ticket created by dave")
		);
		assert_eq!(message.components, vec![close_ticket_button()]);

		assert!(matches!(
			&calls[2],
			PlatformCall::Respond { content, ephemeral: true, .. }
				if *content == format!("Ticket created: <#{}>", CREATED_CHANNEL_ID)
		));

		let state = bot.bot_state.read().await;
		let ticket = state
			.get::<TicketStates>()
			.and_then(|states| states.open_ticket(Id::new(CREATED_CHANNEL_ID)))
			.expect("ticket is recorded");
		assert_eq!(ticket.category, TicketCategory::Middleman);
		assert_eq!(ticket.creator.get(), 80);
	}

	#[tokio::test]
	async fn creation_failure_is_reported_to_the_user() {
		let platform = Arc::new(RecordingPlatform::new());
		platform.fail(Operation::CreateChannel);
		let directory = tempfile::tempdir().unwrap();
		let bot = test_context(Arc::clone(&platform), command_modules(), directory.path());

		let channel = open_ticket(&button_press("ticket_report", None), TicketCategory::Support, &bot)
			.await
			.unwrap();
		assert_eq!(channel, None);
		assert!(matches!(
			&platform.calls()[..],
			[PlatformCall::CreateChannel(_), PlatformCall::Respond { content, ephemeral: true, .. }]
				if content == TICKET_CREATION_FAILED
		));
	}

	#[tokio::test]
	async fn intro_failure_removes_the_new_channel() {
		let platform = Arc::new(RecordingPlatform::new());
		platform.fail(Operation::Send);
		let directory = tempfile::tempdir().unwrap();
		let bot = test_context(Arc::clone(&platform), command_modules(), directory.path());

		let channel = open_ticket(&button_press("ticket_purchase", None), TicketCategory::Purchase, &bot)
			.await
			.unwrap();
		assert_eq!(channel, None);

		let calls = platform.calls();
		assert!(matches!(
			&calls[..],
			[
				PlatformCall::CreateChannel(_),
				PlatformCall::Send { .. },
				PlatformCall::DeleteChannel(deleted),
				PlatformCall::Respond { content, ephemeral: true, .. },
			] if deleted.get() == CREATED_CHANNEL_ID && content == TICKET_CREATION_FAILED
		));

		let state = bot.bot_state.read().await;
		assert!(
			state
				.get::<TicketStates>()
				.and_then(|states| states.open_ticket(Id::new(CREATED_CHANNEL_ID)))
				.is_none()
		);
	}
}
