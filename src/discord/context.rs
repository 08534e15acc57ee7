// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::commands::CommandRegistry;
use super::platform::Platform;
use super::reminders::ReminderScheduler;
use crate::config::GuildLayout;
use std::sync::Arc;
use tokio::sync::RwLock;
use type_map::concurrent::TypeMap;

/// Everything event handlers share. Built once the bot has logged in.
pub struct BotContext {
	pub platform: Arc<dyn Platform>,
	pub commands: CommandRegistry,
	pub reminders: ReminderScheduler,
	pub layout: GuildLayout,
	pub bot_state: Arc<RwLock<TypeMap>>,
}
