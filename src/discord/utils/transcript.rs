// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::timestamp::iso_timestamp;
use crate::discord::platform::FetchedMessage;
use miette::IntoDiagnostic;
use std::path::{Path, PathBuf};
use twilight_model::id::Id;
use twilight_model::id::marker::ChannelMarker;

/// The most messages Discord returns in a single history request
pub const TRANSCRIPT_MESSAGE_LIMIT: u16 = 100;

/// Renders a transcript from channel history as returned by Discord (most recent first). The transcript itself is
/// oldest first, one `[timestamp] tag: content` line per message.
pub fn render_transcript(mut messages: Vec<FetchedMessage>) -> String {
	messages.reverse();
	messages
		.iter()
		.map(|message| {
			format!(
				"[{}] {}: {}",
				iso_timestamp(&message.timestamp),
				message.author_tag,
				message.content
			)
		})
		.collect::<Vec<String>>()
		.join("\n")
}

pub fn transcript_file_name(channel_id: Id<ChannelMarker>) -> String {
	format!("transcript-{}.txt", channel_id.get())
}

/// Writes the transcript for a channel into `directory`, returning the path written.
pub async fn write_transcript(
	directory: &Path,
	channel_id: Id<ChannelMarker>,
	transcript: &str,
) -> miette::Result<PathBuf> {
	let path = directory.join(transcript_file_name(channel_id));
	tokio::fs::write(&path, transcript).await.into_diagnostic()?;
	Ok(path)
}
