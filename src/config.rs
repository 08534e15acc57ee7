// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use miette::Diagnostic;
use std::env;
use std::fmt;
use std::path::PathBuf;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, UserMarker};

pub const TOKEN_VARIABLE: &str = "DISCORD_TOKEN";
pub const COMMAND_PREFIX: &str = ".";

// These are deployment-specific and need to be changed when moving the bot to another server.
pub const OWNER_ID: u64 = 1194353444023181322;
pub const TICKET_CATEGORY_ID: u64 = 1238209651204427848;
pub const TRANSCRIPT_CHANNEL_ID: u64 = 1254430957771952219;
pub const PANEL_CHANNEL_ID: u64 = 1313549168140353648;

pub const REMINDERS_FILE: &str = "reminders.json";

#[derive(Debug, Diagnostic)]
pub enum ConfigError {
	#[diagnostic(
		code(config::missing_token),
		help("Set DISCORD_TOKEN in the environment or in a .env file next to the bot.")
	)]
	MissingToken,
}

impl fmt::Display for ConfigError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::MissingToken => write!(f, "{} is not set", TOKEN_VARIABLE),
		}
	}
}

impl std::error::Error for ConfigError {}

/// The fixed Discord objects the ticket system works with
#[derive(Clone, Debug)]
pub struct GuildLayout {
	pub owner: Id<UserMarker>,
	pub ticket_category: Id<ChannelMarker>,
	pub transcript_channel: Id<ChannelMarker>,
	pub panel_channel: Id<ChannelMarker>,
	/// Directory transcripts are written to before being forwarded
	pub transcript_dir: PathBuf,
}

impl Default for GuildLayout {
	fn default() -> Self {
		Self {
			owner: Id::new(OWNER_ID),
			ticket_category: Id::new(TICKET_CATEGORY_ID),
			transcript_channel: Id::new(TRANSCRIPT_CHANNEL_ID),
			panel_channel: Id::new(PANEL_CHANNEL_ID),
			transcript_dir: env::temp_dir(),
		}
	}
}

#[derive(Debug)]
pub struct ConfigData {
	pub discord_token: String,
	pub layout: GuildLayout,
	pub reminders_path: PathBuf,
}

impl ConfigData {
	/// Reads configuration from the environment, loading a `.env` file first if one exists.
	pub fn from_env() -> Result<Self, ConfigError> {
		if let Err(error) = dotenvy::dotenv() {
			if !error.not_found() {
				tracing::warn!(source = ?error, "Failed to read .env file");
			}
		}
		let discord_token = token_from(env::var(TOKEN_VARIABLE).ok())?;
		Ok(Self {
			discord_token,
			layout: GuildLayout::default(),
			reminders_path: PathBuf::from(REMINDERS_FILE),
		})
	}
}

fn token_from(value: Option<String>) -> Result<String, ConfigError> {
	match value {
		Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
		_ => Err(ConfigError::MissingToken),
	}
}
