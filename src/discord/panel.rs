// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::context::BotContext;
use super::platform::MessageData;
use super::utils::components::open_ticket_buttons;
use miette::IntoDiagnostic;
use twilight_util::builder::embed::{EmbedBuilder, EmbedFooterBuilder};
use twilight_validate::embed::EmbedValidationError;

const PANEL_COLOR: u32 = 0x5865F2;
const PANEL_DESCRIPTION: &str = "Welcome to the ticket system! Please select an option below to open a ticket:\n\n\
	**Options:**\n\
	🎫 **Purchase** - Create a ticket for purchasing.\n\
	🔒 **MM** - Open a ticket for middleman requests.\n\
	📩 **Report/Support** - Contact support for help.";

pub fn panel_message() -> Result<MessageData, EmbedValidationError> {
	let embed = EmbedBuilder::new()
		.color(PANEL_COLOR)
		.title("🎟️ Legend Shop Tickets")
		.description(PANEL_DESCRIPTION)
		.footer(EmbedFooterBuilder::new("Legend Shop - Ticket System").build())
		.validate()?
		.build();
	Ok(MessageData {
		embeds: vec![embed],
		components: vec![open_ticket_buttons()],
		..Default::default()
	})
}

/// Posts the "open a ticket" panel. Called once per run, on the first Ready.
pub async fn post_ticket_panel(bot: &BotContext) -> miette::Result<()> {
	let message = panel_message().into_diagnostic()?;
	bot.platform.send_message(bot.layout.panel_channel, &message).await
}
