// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::discord::state::tickets::TicketCategory;
use twilight_model::channel::message::component::{ActionRow, Button, ButtonStyle, Component};

pub const CLOSE_TICKET_ID: &str = "close_ticket";

fn button(custom_id: &str, label: &str, style: ButtonStyle) -> Component {
	Component::Button(Button {
		custom_id: Some(String::from(custom_id)),
		disabled: false,
		emoji: None,
		label: Some(String::from(label)),
		style,
		url: None,
		sku_id: None,
	})
}

/// The row of "open a ticket" buttons shown on the ticket panel, one per category
pub fn open_ticket_buttons() -> Component {
	let components = TicketCategory::all_categories()
		.into_iter()
		.map(|category| button(category.custom_id(), category.button_label(), category.button_style()))
		.collect();
	Component::ActionRow(ActionRow { components })
}

pub fn close_ticket_button() -> Component {
	Component::ActionRow(ActionRow {
		components: vec![button(CLOSE_TICKET_ID, "Close Ticket", ButtonStyle::Danger)],
	})
}
