//! Odds Core - bookmaker odds normalization and best-price aggregation.
//!
//! This module provides:
//! - Feed record shapes and decoding for the odds provider payload
//! - Outcome parsing into two-way / three-way price vectors
//! - Event table assembly (bookmaker columns, local event times, dedup)
//! - Date filtering with optional bookmaker projection
//! - Tie-aware best-price aggregation per outcome
//! - An HTTP client for the odds provider behind the `OddsFeed` trait
//!
//! Everything is request-scoped: a table is built from one fetched payload
//! and dropped after the query that needed it. Nothing here holds global
//! state.

pub mod aggregate;
pub mod clients;
pub mod error;
pub mod filter;
pub mod models;
pub mod parser;
pub mod table;

use chrono_tz::Tz;
use tracing::debug;

pub use error::{OddsError, Result};
pub use filter::{FilterOutcome, FilteredRow, FilteredTable};
pub use models::*;
pub use table::{EventTable, TableRow, DEFAULT_TIMEZONE};

/// Build the event table with event times in America/New_York.
pub fn build_table(events: &[FeedEvent]) -> Result<EventTable> {
    EventTable::build(events)
}

/// Build the event table with event times in `tz`.
pub fn build_table_in(events: &[FeedEvent], tz: Tz) -> Result<EventTable> {
    EventTable::build_in(events, tz)
}

/// Best available price per outcome for every event on `date`
/// (`YYYY-MM-DD`, local to the table's time zone).
///
/// `bookmakers` restricts the competition to those columns; `None` uses
/// every bookmaker in the table.
pub fn best_odds(
    table: &EventTable,
    date: &str,
    bookmakers: Option<&[String]>,
) -> Result<BestOdds> {
    match filter::filter_by_date(table, date, bookmakers)? {
        FilterOutcome::InvalidDate { input } => Ok(BestOdds::InvalidDate { input }),
        FilterOutcome::NoMatch { .. } => Ok(BestOdds::NoMatch {
            date: date.to_string(),
        }),
        FilterOutcome::Matched(filtered) => {
            let games = aggregate::aggregate(&filtered)?;
            debug!("Best odds for {}: {} games", date, games.len());
            Ok(BestOdds::Results { games })
        }
    }
}

/// Parse a free-text bookmaker list.
///
/// Blank input or `none` (any case) means every bookmaker; otherwise the
/// input is split on commas with blanks trimmed and empty entries dropped.
pub fn parse_bookmaker_list(input: &str) -> Option<Vec<String>> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return None;
    }

    let names: Vec<String> = trimmed
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if names.is_empty() {
        None
    } else {
        Some(names)
    }
}
