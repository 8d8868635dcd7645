//! The Odds API client (https://the-odds-api.com, v4).
//!
//! Every call is a single synchronous round trip: no retry, no caching.
//! Odds are always requested as American head-to-head prices with ISO dates,
//! which is the shape the table builder expects.

use super::OddsFeed;
use crate::error::{OddsError, Result};
use crate::models::{decode_events, FeedEvent, SportInfo};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_BASE_URL: &str = "https://api.the-odds-api.com/v4";

const MARKETS: &str = "h2h";
const ODDS_FORMAT: &str = "american";
const DATE_FORMAT: &str = "iso";

/// Longest upstream error body carried into an error message
const ERROR_BODY_LIMIT: usize = 220;

#[derive(Debug, Clone)]
pub struct OddsApiConfig {
    pub api_key: String,
    pub base_url: String,
    /// Comma-separated region list (us | uk | eu | au)
    pub regions: String,
    pub timeout: Duration,
}

impl OddsApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            regions: "us".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Clone)]
pub struct OddsApiClient {
    client: Client,
    config: OddsApiConfig,
}

impl std::fmt::Debug for OddsApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OddsApiClient")
            .field("base_url", &self.config.base_url)
            .field("regions", &self.config.regions)
            .finish()
    }
}

impl OddsApiClient {
    pub fn new(config: OddsApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent("best-odds/0.1")
            .build()?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Reject non-2xx responses, keeping a trimmed body for the message.
    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(OddsError::UpstreamStatus {
            status: status.as_u16(),
            body: body
                .trim()
                .replace(['\n', '\r'], " ")
                .chars()
                .take(ERROR_BODY_LIMIT)
                .collect(),
        })
    }
}

#[async_trait]
impl OddsFeed for OddsApiClient {
    async fn fetch_sports(&self) -> Result<Vec<SportInfo>> {
        debug!("Fetching in-season sports");

        let response = self
            .client
            .get(self.url("sports"))
            .query(&[("apiKey", self.config.api_key.as_str())])
            .send()
            .await?;
        let body = Self::check_status(response).await?.text().await?;

        serde_json::from_str(&body).map_err(OddsError::Payload)
    }

    async fn fetch_odds(&self, sport_key: &str) -> Result<Vec<FeedEvent>> {
        debug!("Fetching {} odds for {}", MARKETS, sport_key);

        let response = self
            .client
            .get(self.url(&format!("sports/{}/odds", sport_key)))
            .query(&[
                ("apiKey", self.config.api_key.as_str()),
                ("regions", self.config.regions.as_str()),
                ("markets", MARKETS),
                ("oddsFormat", ODDS_FORMAT),
                ("dateFormat", DATE_FORMAT),
            ])
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let remaining = quota_header(&response, "x-requests-remaining");
        let used = quota_header(&response, "x-requests-used");

        let body = response.text().await?;
        let payload: serde_json::Value = serde_json::from_str(&body).map_err(OddsError::Payload)?;
        let events = decode_events(payload)?;

        info!(
            "Fetched {} events for {} (requests remaining: {}, used: {})",
            events.len(),
            sport_key,
            remaining,
            used
        );
        Ok(events)
    }

    fn feed_name(&self) -> &str {
        "the-odds-api"
    }
}

fn quota_header(response: &Response, name: &str) -> String {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("?")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = OddsApiConfig::new("key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.regions, "us");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_url_joins_base_and_path() {
        let mut config = OddsApiConfig::new("key");
        config.base_url = "http://localhost:9000/v4/".to_string();
        let client = OddsApiClient::new(config).unwrap();
        assert_eq!(
            client.url("sports/soccer_epl/odds"),
            "http://localhost:9000/v4/sports/soccer_epl/odds"
        );
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = OddsApiClient::new(OddsApiConfig::new("secret-key")).unwrap();
        assert!(!format!("{:?}", client).contains("secret-key"));
    }

    #[tokio::test]
    #[ignore] // Requires network and ODDS_API_KEY
    async fn test_fetch_sports_live() {
        let Ok(key) = std::env::var("ODDS_API_KEY") else {
            return;
        };
        let client = OddsApiClient::new(OddsApiConfig::new(key)).unwrap();

        match client.fetch_sports().await {
            Ok(sports) => println!("{} sports in season", sports.len()),
            Err(e) => println!("Warning: Could not fetch sports: {}", e),
        }
    }
}
