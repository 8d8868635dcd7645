use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;
use odds_core::clients::odds_api::{OddsApiConfig, DEFAULT_BASE_URL};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub odds_api_key: String,
    pub odds_api_base_url: String,
    pub odds_regions: String,
    pub http_timeout: Duration,

    pub timezone: Tz,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let odds_api_key = var("ODDS_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .context("ODDS_API_KEY must be set (get one at https://the-odds-api.com)")?;

        let odds_api_base_url =
            var("ODDS_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let odds_regions = parse_regions(var("ODDS_REGIONS").as_deref().unwrap_or("us"))?;

        let timeout_raw = var("ODDS_HTTP_TIMEOUT_SECS").unwrap_or_else(|| "10".to_string());
        let http_timeout = timeout_raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .with_context(|| {
                format!("Invalid ODDS_HTTP_TIMEOUT_SECS: {timeout_raw} (expected integer)")
            })?;

        let timezone_raw = var("ODDS_TIMEZONE").unwrap_or_else(|| "America/New_York".to_string());
        let timezone = Tz::from_str(&timezone_raw).map_err(|_| {
            anyhow!(
                "Invalid ODDS_TIMEZONE: {} (expected IANA tz like America/New_York)",
                timezone_raw
            )
        })?;

        let bind_raw = var("BIND_ADDR").unwrap_or_else(|| "127.0.0.1:5000".to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid BIND_ADDR: {bind_raw} (expected host:port)"))?;

        Ok(Self {
            odds_api_key,
            odds_api_base_url,
            odds_regions,
            http_timeout,
            timezone,
            bind_addr,
        })
    }

    pub fn odds_api(&self) -> OddsApiConfig {
        OddsApiConfig {
            api_key: self.odds_api_key.clone(),
            base_url: self.odds_api_base_url.clone(),
            regions: self.odds_regions.clone(),
            timeout: self.http_timeout,
        }
    }
}

fn parse_regions(raw: &str) -> Result<String> {
    let regions: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();
    if regions.is_empty() {
        return Err(anyhow!("ODDS_REGIONS must contain at least one region"));
    }
    if let Some(bad) = regions
        .iter()
        .find(|r| !matches!(r.as_str(), "us" | "us2" | "uk" | "eu" | "au"))
    {
        return Err(anyhow!("Invalid ODDS_REGIONS entry: {bad} (expected us|us2|uk|eu|au)"));
    }
    Ok(regions.join(","))
}
