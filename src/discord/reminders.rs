// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::platform::{MessageData, Platform};
use chrono::{DateTime, Utc};
use miette::IntoDiagnostic;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{Duration, sleep};
use twilight_mention::fmt::Mention;
use twilight_model::channel::message::AllowedMentions;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, UserMarker};

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Reminder {
	pub id: String,
	pub user_id: Id<UserMarker>,
	pub channel_id: Id<ChannelMarker>,
	pub text: String,
	pub due_at: DateTime<Utc>,
}

impl Reminder {
	pub fn new(user_id: Id<UserMarker>, channel_id: Id<ChannelMarker>, text: String, due_at: DateTime<Utc>) -> Self {
		Self {
			id: cuid2::create_id(),
			user_id,
			channel_id,
			text,
			due_at,
		}
	}

	fn message(&self) -> MessageData {
		let mut allowed_mentions = AllowedMentions::default();
		allowed_mentions.users.push(self.user_id);
		MessageData {
			content: Some(format!("{} ⏰ Reminder: {}", self.user_id.mention(), self.text)),
			allowed_mentions,
			..Default::default()
		}
	}
}

/// Keeps reminders on disk and delivers each one when it comes due.
#[derive(Clone)]
pub struct ReminderScheduler {
	path: Arc<PathBuf>,
	platform: Arc<dyn Platform>,
	reminders: Arc<Mutex<Vec<Reminder>>>,
}

impl ReminderScheduler {
	/// Creates a scheduler with no reminders. Nothing is read from `path` until [Self::load].
	pub fn new(path: PathBuf, platform: Arc<dyn Platform>) -> Self {
		Self {
			path: Arc::new(path),
			platform,
			reminders: Arc::new(Mutex::new(Vec::new())),
		}
	}

	/// Reads persisted reminders and arms a timer for each. Reminders that came due while the bot was down are
	/// delivered right away.
	pub async fn load(&self) -> miette::Result<usize> {
		let contents = match tokio::fs::read_to_string(self.path.as_ref()).await {
			Ok(contents) => contents,
			Err(error) if error.kind() == ErrorKind::NotFound => return Ok(0),
			Err(error) => return Err(error).into_diagnostic(),
		};
		let loaded: Vec<Reminder> = serde_json::from_str(&contents).into_diagnostic()?;
		let count = loaded.len();

		*self.reminders.lock().await = loaded.clone();
		for reminder in loaded {
			self.arm(reminder);
		}

		tracing::info!(count, "Loaded reminders");
		Ok(count)
	}

	pub async fn schedule(&self, reminder: Reminder) -> miette::Result<()> {
		{
			let mut reminders = self.reminders.lock().await;
			reminders.push(reminder.clone());
			save(&self.path, &reminders).await?;
		}
		self.arm(reminder);
		Ok(())
	}

	pub async fn pending(&self) -> Vec<Reminder> {
		self.reminders.lock().await.clone()
	}

	fn arm(&self, reminder: Reminder) {
		let scheduler = self.clone();
		tokio::spawn(async move {
			let wait = (reminder.due_at - Utc::now()).to_std().unwrap_or(Duration::ZERO);
			sleep(wait).await;
			scheduler.deliver(reminder).await;
		});
	}

	async fn deliver(&self, reminder: Reminder) {
		if let Err(error) = self.platform.send_message(reminder.channel_id, &reminder.message()).await {
			tracing::error!(source = ?error, reminder = %reminder.id, "Failed to deliver reminder");
		}

		let mut reminders = self.reminders.lock().await;
		reminders.retain(|pending| pending.id != reminder.id);
		if let Err(error) = save(&self.path, &reminders).await {
			tracing::error!(source = ?error, "Failed to save reminders after delivery");
		}
	}
}

async fn save(path: &Path, reminders: &[Reminder]) -> miette::Result<()> {
	let data = serde_json::to_string_pretty(reminders).into_diagnostic()?;
	tokio::fs::write(path, data).await.into_diagnostic()
}
