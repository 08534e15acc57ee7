// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{Command, CommandContext};
use crate::discord::reminders::Reminder;
use async_trait::async_trait;
use chrono::{TimeDelta, Utc};

const USAGE: &str = "Usage: `.remind <time> <message>`, where time is a number followed by s, m, h, or d (e.g. `.remind 10m check the oven`).";

pub struct Remind;

#[async_trait]
impl Command for Remind {
	fn name(&self) -> &'static str {
		"remind"
	}

	fn description(&self) -> &'static str {
		"Sets a reminder, e.g. `.remind 2h restock`"
	}

	async fn execute(&self, context: &CommandContext<'_>, args: &[String]) -> miette::Result<()> {
		let Some((duration_arg, text_args)) = args.split_first() else {
			return context.reply(USAGE).await;
		};
		let Some(delay) = parse_delay(duration_arg) else {
			return context.reply(USAGE).await;
		};
		if text_args.is_empty() {
			return context.reply(USAGE).await;
		}
		// Delays can fit in a TimeDelta but still land past the last representable date.
		let Some(due_at) = Utc::now().checked_add_signed(delay) else {
			return context.reply(USAGE).await;
		};

		let text = text_args.join(" ");
		let reminder = Reminder::new(context.message.author.id, context.message.channel_id, text, due_at);
		context.bot.reminders.schedule(reminder).await?;

		context
			.reply(&format!("⏰ Okay, I'll remind you in {}.", duration_arg))
			.await
	}
}

/// Parses a delay like `30s`, `10m`, `2h`, or `1d`.
fn parse_delay(arg: &str) -> Option<TimeDelta> {
	let unit = arg.chars().last()?;
	let amount: i64 = arg[..arg.len() - unit.len_utf8()].parse().ok()?;
	if amount <= 0 {
		return None;
	}
	let seconds_per_unit = match unit.to_ascii_lowercase() {
		's' => 1,
		'm' => 60,
		'h' => 60 * 60,
		'd' => 60 * 60 * 24,
		_ => return None,
	};
	TimeDelta::try_seconds(amount.checked_mul(seconds_per_unit)?)
}
