// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::fmt;
use twilight_model::channel::message::component::ButtonStyle;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, UserMarker};

/// Prefix given to every ticket channel's name; closing is only allowed in channels named this way.
pub const TICKET_CHANNEL_PREFIX: &str = "ticket-";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TicketCategory {
	Purchase,
	Middleman,
	Support,
}

impl TicketCategory {
	pub fn from_custom_id(id: &str) -> Option<Self> {
		match id {
			"ticket_purchase" => Some(Self::Purchase),
			"ticket_mm" => Some(Self::Middleman),
			"ticket_report" => Some(Self::Support),
			_ => None,
		}
	}

	pub fn custom_id(&self) -> &'static str {
		match self {
			Self::Purchase => "ticket_purchase",
			Self::Middleman => "ticket_mm",
			Self::Support => "ticket_report",
		}
	}

	pub fn all_categories() -> Vec<Self> {
		vec![Self::Purchase, Self::Middleman, Self::Support]
	}

	pub fn name(&self) -> &'static str {
		match self {
			Self::Purchase => "Purchase",
			Self::Middleman => "MM",
			Self::Support => "Report/Support",
		}
	}

	pub fn button_label(&self) -> &'static str {
		match self {
			Self::Purchase => "🎫 Purchase",
			Self::Middleman => "🔒 MM",
			Self::Support => "📩 Report/Support",
		}
	}

	pub fn button_style(&self) -> ButtonStyle {
		match self {
			Self::Purchase => ButtonStyle::Primary,
			Self::Middleman => ButtonStyle::Secondary,
			Self::Support => ButtonStyle::Success,
		}
	}
}

impl fmt::Display for TicketCategory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.name())
	}
}

pub fn ticket_channel_name(username: &str) -> String {
	format!("{}{}", TICKET_CHANNEL_PREFIX, username)
}

pub fn is_ticket_channel_name(name: &str) -> bool {
	name.starts_with(TICKET_CHANNEL_PREFIX)
}

/// What the bot knows about a ticket it opened during this run
#[derive(Clone, Debug)]
pub struct OpenTicket {
	pub category: TicketCategory,
	pub creator: Id<UserMarker>,
	pub created_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TicketState {
	Open,
	Closing,
}

/// Ticket lifecycle tracking, kept in the bot state map.
///
/// Discord is authoritative for whether a ticket channel exists. Channels opened before the bot started have no
/// [OpenTicket] record but can still be closed. A channel is `Closing` from the moment a close starts until it's
/// deleted; if deletion fails, it stays `Closing`.
#[derive(Debug, Default)]
pub struct TicketStates {
	open: HashMap<Id<ChannelMarker>, OpenTicket>,
	closing: HashSet<Id<ChannelMarker>>,
}

impl TicketStates {
	pub fn record_open(&mut self, channel_id: Id<ChannelMarker>, ticket: OpenTicket) {
		self.open.insert(channel_id, ticket);
	}

	pub fn open_ticket(&self, channel_id: Id<ChannelMarker>) -> Option<&OpenTicket> {
		self.open.get(&channel_id)
	}

	pub fn state(&self, channel_id: Id<ChannelMarker>) -> TicketState {
		if self.closing.contains(&channel_id) {
			TicketState::Closing
		} else {
			TicketState::Open
		}
	}

	/// Moves the channel to `Closing`. Returns `false` if a close is already underway for it.
	pub fn begin_close(&mut self, channel_id: Id<ChannelMarker>) -> bool {
		self.closing.insert(channel_id)
	}

	/// Returns the channel to `Open` after a close fails.
	pub fn abort_close(&mut self, channel_id: Id<ChannelMarker>) {
		self.closing.remove(&channel_id);
	}

	pub fn finish_delete(&mut self, channel_id: Id<ChannelMarker>) {
		self.closing.remove(&channel_id);
		self.open.remove(&channel_id);
	}
}
