// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{Command, CommandContext};
use async_trait::async_trait;

pub struct Ping;

#[async_trait]
impl Command for Ping {
	fn name(&self) -> &'static str {
		"ping"
	}

	fn description(&self) -> &'static str {
		"Checks that the bot is responding"
	}

	async fn execute(&self, context: &CommandContext<'_>, _args: &[String]) -> miette::Result<()> {
		context.reply("Pong!").await
	}
}
