// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use legend_tickets::config::ConfigData;
use legend_tickets::discord::{run_bot, set_up_client};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> miette::Result<()> {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt().with_env_filter(filter).init();

	let config = Arc::new(ConfigData::from_env()?);
	let http_client = set_up_client(&config);

	let bot_result = run_bot(config, http_client).await;
	if let Err(error) = &bot_result {
		tracing::error!(source = ?error, "Bot stopped");
	}
	bot_result
}
