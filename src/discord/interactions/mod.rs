// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::context::BotContext;
use super::platform::InteractionHandle;
use super::state::tickets::TicketCategory;
use super::utils::components::CLOSE_TICKET_ID;
use super::utils::users::UserData;
use twilight_cache_inmemory::DefaultInMemoryCache;
use twilight_model::application::interaction::message_component::MessageComponentInteractionData;
use twilight_model::gateway::payload::incoming::InteractionCreate;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, GuildMarker};

mod close_ticket;
mod open_ticket;

pub use close_ticket::{CloseOutcome, DELETE_DELAY};

#[derive(Clone, Debug)]
pub struct ChannelData {
	pub id: Id<ChannelMarker>,
	pub name: Option<String>,
}

/// A button press, with the data the ticket handlers need pulled out of the interaction
#[derive(Clone, Debug)]
pub struct ButtonPress {
	pub handle: InteractionHandle,
	pub custom_id: String,
	pub guild_id: Option<Id<GuildMarker>>,
	pub channel: Option<ChannelData>,
	pub user: Option<UserData>,
}

impl ButtonPress {
	pub fn new(
		interaction: &InteractionCreate,
		interaction_data: &MessageComponentInteractionData,
		cache: &DefaultInMemoryCache,
	) -> Self {
		let channel = interaction.channel.as_ref().map(|channel| {
			// Interaction channel data is partial; the cache fills in the name if Discord left it out.
			let name = channel
				.name
				.clone()
				.or_else(|| cache.channel(channel.id).and_then(|cached| cached.name.clone()));
			ChannelData { id: channel.id, name }
		});
		Self {
			handle: InteractionHandle {
				id: interaction.id,
				token: interaction.token.clone(),
			},
			custom_id: interaction_data.custom_id.clone(),
			guild_id: interaction.guild_id,
			channel,
			user: interaction.author().map(UserData::from),
		}
	}
}

pub async fn route_interaction(
	interaction: &InteractionCreate,
	interaction_data: &MessageComponentInteractionData,
	cache: &DefaultInMemoryCache,
	bot: &BotContext,
) -> miette::Result<()> {
	let press = ButtonPress::new(interaction, interaction_data, cache);
	route_button(&press, bot).await
}

pub async fn route_button(press: &ButtonPress, bot: &BotContext) -> miette::Result<()> {
	if press.custom_id == CLOSE_TICKET_ID {
		close_ticket::close_ticket(press, bot).await?;
	} else if let Some(category) = TicketCategory::from_custom_id(&press.custom_id) {
		open_ticket::open_ticket(press, category, bot).await?;
	} else {
		tracing::debug!(custom_id = %press.custom_id, "Ignoring unrecognized button");
	}
	Ok(())
}
