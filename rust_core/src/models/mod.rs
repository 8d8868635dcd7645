// Shared models for the odds pipeline
use serde::{Deserialize, Serialize};

pub mod feed;
pub mod price_vector;

pub use feed::{decode_events, FeedBookmaker, FeedEvent, FeedMarket, FeedOutcome, SportInfo};
pub use price_vector::{Price, PriceVector};

// ============================================================================
// Outcomes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    HomeWin,
    AwayWin,
    Draw,
}

impl OutcomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::HomeWin => "home_win",
            OutcomeKind::AwayWin => "away_win",
            OutcomeKind::Draw => "draw",
        }
    }
}

// ============================================================================
// Aggregation Results
// ============================================================================

/// Best price for one outcome and every bookmaker offering it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeResult {
    pub outcome: OutcomeKind,
    pub best_price: f64,
    /// Never empty; in column order of the filtered table
    pub bookmakers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    /// `"{home} vs. {away}"`
    pub game: String,
    pub home_team: String,
    pub away_team: String,
    pub results: Vec<OutcomeResult>,
}

impl AggregationResult {
    pub fn outcome(&self, kind: OutcomeKind) -> Option<&OutcomeResult> {
        self.results.iter().find(|r| r.outcome == kind)
    }
}

/// Answer to a best-odds query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BestOdds {
    Results { games: Vec<AggregationResult> },
    /// Valid date, but no event on it has a quote from every bookmaker asked for
    NoMatch { date: String },
    InvalidDate { input: String },
}
