mod config;
mod formatters;
mod server;

use crate::config::Config;
use crate::server::AppState;
use anyhow::{Context, Result};
use dotenv::dotenv;
use odds_core::clients::{OddsApiClient, OddsFeed};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Best Odds Service...");

    let config = Config::from_env().context("Failed to load configuration")?;

    let client = OddsApiClient::new(config.odds_api()).context("Failed to build odds client")?;
    info!(
        "Odds feed: {} ({}), regions={}, timezone={}",
        client.feed_name(),
        config.odds_api_base_url,
        config.odds_regions,
        config.timezone
    );

    let state = AppState::new(Arc::new(client), config.timezone);
    server::run_server(state, config.bind_addr).await
}
