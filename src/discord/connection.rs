// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::commands::{CommandRegistry, command_modules};
use super::context::BotContext;
use super::incoming_messages::handle_message;
use super::interactions::route_interaction;
use super::panel::post_ticket_panel;
use super::platform::{Platform, TwilightPlatform};
use super::reminders::ReminderScheduler;
use crate::config::ConfigData;
use miette::IntoDiagnostic;
use std::sync::Arc;
use tokio::sync::RwLock;
use twilight_cache_inmemory::{DefaultInMemoryCache, ResourceType};
use twilight_gateway::{EventTypeFlags, Intents, Shard, ShardId, StreamExt};
use twilight_http::client::Client;
use twilight_model::application::interaction::InteractionData;
use twilight_model::gateway::event::Event;
use type_map::concurrent::TypeMap;

pub fn set_up_client(config: &ConfigData) -> Arc<Client> {
	Arc::new(Client::new(config.discord_token.clone()))
}

pub async fn run_bot(config: Arc<ConfigData>, http_client: Arc<Client>) -> miette::Result<()> {
	let intents = Intents::GUILDS | Intents::GUILD_MESSAGES | Intents::MESSAGE_CONTENT | Intents::GUILD_MEMBERS;

	let commands = CommandRegistry::load(command_modules())?;
	tracing::info!(commands = ?commands.names(), "Loaded commands");

	// This is the first authenticated request, so a bad token stops startup here.
	let application_id = {
		let application_response = http_client.current_user_application().await.into_diagnostic()?;
		application_response.model().await.into_diagnostic()?.id
	};

	let platform: Arc<dyn Platform> = Arc::new(TwilightPlatform::new(Arc::clone(&http_client), application_id));
	let reminders = ReminderScheduler::new(config.reminders_path.clone(), Arc::clone(&platform));
	if let Err(error) = reminders.load().await {
		tracing::error!(source = ?error, path = %config.reminders_path.display(), "Failed to load reminders");
	}

	let bot = Arc::new(BotContext {
		platform,
		commands,
		reminders,
		layout: config.layout.clone(),
		bot_state: Arc::new(RwLock::new(TypeMap::new())),
	});

	let mut shard = Shard::new(ShardId::ONE, config.discord_token.clone(), intents);

	let cache = Arc::new(
		DefaultInMemoryCache::builder()
			.resource_types(ResourceType::CHANNEL)
			.build(),
	);

	let mut panel_posted = false;
	while let Some(event) = shard.next_event(EventTypeFlags::all()).await {
		let event = match event {
			Ok(event) => event,
			Err(error) => {
				tracing::warn!(source = ?error, "error receiving event");
				continue;
			}
		};
		cache.update(&event);

		// Reconnecting can produce another Ready, but the panel only goes up once per run.
		if !panel_posted && matches!(event, Event::Ready(_)) {
			panel_posted = true;
			tokio::spawn(post_panel(Arc::clone(&bot)));
		}

		tokio::spawn(handle_event(event, Arc::clone(&bot), Arc::clone(&cache)));
	}

	Ok(())
}

async fn post_panel(bot: Arc<BotContext>) {
	if let Err(error) = post_ticket_panel(&bot).await {
		tracing::error!(source = ?error, "Failed to post the ticket panel");
	}
}

async fn handle_event(event: Event, bot: Arc<BotContext>, cache: Arc<DefaultInMemoryCache>) {
	let event_result = handle_event_route(event, &bot, &cache).await;
	if let Err(error) = event_result {
		tracing::error!(source = ?error, "An error occurred handling a gateway event");
	}
}

async fn handle_event_route(event: Event, bot: &BotContext, cache: &DefaultInMemoryCache) -> miette::Result<()> {
	tracing::trace!("Incoming gateway message: {:?}", event);
	match event {
		Event::InteractionCreate(interaction) => {
			if let Some(InteractionData::MessageComponent(interaction_data)) = &interaction.data {
				route_interaction(&interaction, interaction_data, cache, bot).await?;
			}
		}
		Event::MessageCreate(message) => {
			handle_message(&message, bot).await;
		}
		Event::Ready(ready) => {
			tracing::info!(user = %ready.user.name, "Discord gateway is ready");
		}
		_ => (),
	}
	Ok(())
}
