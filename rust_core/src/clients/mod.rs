//! Odds feed sources.
//!
//! The pipeline only ever sees decoded [`FeedEvent`]s; where they come from
//! is behind [`OddsFeed`] so callers can swap the HTTP client for a fixture.

use crate::error::Result;
use crate::models::{FeedEvent, SportInfo};
use async_trait::async_trait;

pub mod odds_api;

pub use odds_api::{OddsApiClient, OddsApiConfig};

#[async_trait]
pub trait OddsFeed: Send + Sync {
    /// Sports currently in season
    async fn fetch_sports(&self) -> Result<Vec<SportInfo>>;

    /// Upcoming and live events for one sport, with head-to-head prices
    async fn fetch_odds(&self, sport_key: &str) -> Result<Vec<FeedEvent>>;

    /// Source name for logging
    fn feed_name(&self) -> &str;
}
