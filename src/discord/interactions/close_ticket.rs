// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::ButtonPress;
use crate::discord::context::BotContext;
use crate::discord::platform::{FileUpload, Platform};
use crate::discord::state::tickets::{TicketStates, is_ticket_channel_name};
use crate::discord::utils::transcript::{
	TRANSCRIPT_MESSAGE_LIMIT, render_transcript, transcript_file_name, write_transcript,
};
use miette::{IntoDiagnostic, bail};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{Duration, sleep};
use twilight_model::id::Id;
use twilight_model::id::marker::ChannelMarker;
use type_map::concurrent::TypeMap;

/// How long a closed ticket channel stays around before it's deleted
pub const DELETE_DELAY: Duration = Duration::from_secs(3);

const NOT_A_TICKET: &str = "This is not a ticket channel!";
const ALREADY_CLOSING: &str = "This ticket is already being closed.";
const TICKET_CLOSED: &str = "Ticket closed and transcript saved!";
const CLOSE_FAILED: &str = "❌ An error occurred while closing the ticket.";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CloseOutcome {
	/// The channel isn't a ticket or is already closing; nothing was changed.
	Rejected,
	/// Archiving the transcript failed, so the ticket stays open.
	Failed,
	/// The transcript was archived and the channel is scheduled for deletion.
	Closed,
}

pub async fn close_ticket(press: &ButtonPress, bot: &BotContext) -> miette::Result<CloseOutcome> {
	let Some(channel) = &press.channel else {
		bail!("Close ticket button used without a channel");
	};
	let channel_name = match channel.name.as_deref() {
		Some(name) if is_ticket_channel_name(name) => name,
		_ => {
			bot.platform
				.respond_to_interaction(&press.handle, NOT_A_TICKET, true)
				.await?;
			return Ok(CloseOutcome::Rejected);
		}
	};

	let (claimed, opened) = {
		let mut state = bot.bot_state.write().await;
		let ticket_states = state.entry::<TicketStates>().or_insert_with(TicketStates::default);
		(ticket_states.begin_close(channel.id), ticket_states.open_ticket(channel.id).cloned())
	};
	if !claimed {
		bot.platform
			.respond_to_interaction(&press.handle, ALREADY_CLOSING, true)
			.await?;
		return Ok(CloseOutcome::Rejected);
	}

	match &opened {
		Some(ticket) => tracing::info!(
			channel = %channel.id,
			category = %ticket.category,
			creator = %ticket.creator,
			open_for = %(chrono::Utc::now() - ticket.created_at),
			"Closing ticket"
		),
		// Tickets opened before the bot last started have no record.
		None => tracing::info!(channel = %channel.id, "Closing ticket"),
	}

	if let Err(error) = archive_transcript(channel.id, channel_name, bot).await {
		tracing::error!(source = ?error, channel = %channel.id, "Error closing ticket");
		{
			let mut state = bot.bot_state.write().await;
			if let Some(ticket_states) = state.get_mut::<TicketStates>() {
				ticket_states.abort_close(channel.id);
			}
		}
		bot.platform
			.respond_to_interaction(&press.handle, CLOSE_FAILED, true)
			.await?;
		return Ok(CloseOutcome::Failed);
	}

	// The transcript is already archived, so the channel goes away even if Discord rejects the acknowledgement.
	if let Err(error) = bot
		.platform
		.respond_to_interaction(&press.handle, TICKET_CLOSED, false)
		.await
	{
		tracing::warn!(source = ?error, channel = %channel.id, "Failed to acknowledge ticket close");
	}

	tokio::spawn(delete_after_delay(
		channel.id,
		Arc::clone(&bot.platform),
		Arc::clone(&bot.bot_state),
	));

	Ok(CloseOutcome::Closed)
}

/// Fetches the channel history, writes it to a transcript file, and sends that file to the transcript channel.
async fn archive_transcript(channel_id: Id<ChannelMarker>, channel_name: &str, bot: &BotContext) -> miette::Result<()> {
	let history = bot
		.platform
		.recent_messages(channel_id, TRANSCRIPT_MESSAGE_LIMIT)
		.await?;
	let transcript = render_transcript(history);
	let path = write_transcript(&bot.layout.transcript_dir, channel_id, &transcript).await?;

	let data = tokio::fs::read(&path).await.into_diagnostic()?;
	let file = FileUpload {
		file_name: transcript_file_name(channel_id),
		data,
	};
	let content = format!("📜 Transcript from the ticket channel **{}**:", channel_name);
	let forward_result = bot
		.platform
		.send_file(bot.layout.transcript_channel, &content, file)
		.await;

	if let Err(error) = tokio::fs::remove_file(&path).await {
		tracing::warn!(source = ?error, path = %path.display(), "Failed to remove transcript file");
	}
	forward_result
}

async fn delete_after_delay(
	channel_id: Id<ChannelMarker>,
	platform: Arc<dyn Platform>,
	bot_state: Arc<RwLock<TypeMap>>,
) {
	sleep(DELETE_DELAY).await;
	if let Err(error) = platform.delete_channel(channel_id).await {
		// The channel stays marked as closing; staff can delete it by hand.
		tracing::error!(source = ?error, channel = %channel_id, "Failed to delete channel");
		return;
	}

	let mut state = bot_state.write().await;
	if let Some(ticket_states) = state.get_mut::<TicketStates>() {
		ticket_states.finish_delete(channel_id);
	}
}
