// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{Command, CommandContext, CommandRegistry};
use crate::config::COMMAND_PREFIX;
use async_trait::async_trait;

pub struct Help;

#[async_trait]
impl Command for Help {
	fn name(&self) -> &'static str {
		"help"
	}

	fn description(&self) -> &'static str {
		"Lists the available commands"
	}

	async fn execute(&self, context: &CommandContext<'_>, _args: &[String]) -> miette::Result<()> {
		context.reply(&help_text(&context.bot.commands)).await
	}
}

fn help_text(commands: &CommandRegistry) -> String {
	let mut text = String::from("**Commands:**");
	for name in commands.names() {
		let description = commands.get(name).map(|command| command.description()).unwrap_or_default();
		text = format!("{}\n`{}{}` - {}", text, COMMAND_PREFIX, name, description);
	}
	text
}
