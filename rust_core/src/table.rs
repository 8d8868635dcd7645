//! Event table: one row per event market occurrence, one column per
//! bookmaker, each cell the price vector that bookmaker quoted.
//!
//! Build steps:
//! - columns are created in the order bookmakers are first observed
//! - a bookmaker that did not quote an event gets explicit missing cells for
//!   that event's rows, so every column has the same length
//! - rows with identical bookmaker cells are dropped, keeping the first
//! - event labels and local times are re-aligned to the surviving rows

use crate::error::{OddsError, Result};
use crate::models::{decode_events, FeedEvent, PriceVector};
use crate::parser::{parse_event, BookmakerQuotes};
use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

/// Zone event times are rendered in unless the caller picks another.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::New_York;

const FEED_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
pub const LOCAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `None` marks a bookmaker that did not quote the row's event.
pub type Cell = Option<PriceVector>;

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub game: String,
    pub home_team: String,
    pub away_team: String,
    pub local_time: NaiveDateTime,
    /// One cell per bookmaker column
    pub cells: Vec<Cell>,
}

impl TableRow {
    /// Rendered `date` column value.
    pub fn date_column(&self) -> String {
        self.local_time.format(LOCAL_TIME_FORMAT).to_string()
    }

    pub fn local_date(&self) -> NaiveDate {
        self.local_time.date()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventTable {
    bookmakers: Vec<String>,
    rows: Vec<TableRow>,
}

impl EventTable {
    /// Build with event times in America/New_York.
    pub fn build(events: &[FeedEvent]) -> Result<Self> {
        Self::build_in(events, DEFAULT_TIMEZONE)
    }

    pub fn build_in(events: &[FeedEvent], tz: Tz) -> Result<Self> {
        let mut labels = Vec::with_capacity(events.len());
        let mut columns = ColumnSet::default();

        for (index, event) in events.iter().enumerate() {
            let local_time =
                to_local_time(&event.commence_time, tz).map_err(|e| OddsError::Parse {
                    index,
                    reason: format!("invalid commence_time {:?}: {}", event.commence_time, e),
                })?;

            labels.push(EventLabel {
                game: event.label(),
                home_team: event.home_team.clone(),
                away_team: event.away_team.clone(),
                local_time,
            });

            let added = columns.push_event(parse_event(event));
            if added == 0 {
                warn!("Event {} ({}) has no bookmaker quotes", index, event.label());
            }
        }

        let kept = columns.distinct_rows();
        debug!(
            "Event table: {} events, {} bookmakers, {} rows ({} after dedup)",
            events.len(),
            columns.names.len(),
            columns.row_count,
            kept.len()
        );

        if labels.len() > kept.len() {
            warn!(
                "Truncating {} event labels to {} table rows",
                labels.len(),
                kept.len()
            );
            labels.truncate(kept.len());
        }
        if labels.len() != kept.len() {
            return Err(OddsError::DataIntegrity(format!(
                "{} event labels for {} table rows",
                labels.len(),
                kept.len()
            )));
        }

        let rows = labels
            .into_iter()
            .zip(kept)
            .map(|(label, row)| TableRow {
                game: label.game,
                home_team: label.home_team,
                away_team: label.away_team,
                local_time: label.local_time,
                cells: columns.row(row),
            })
            .collect();

        Ok(Self {
            bookmakers: columns.names,
            rows,
        })
    }

    /// Decode a raw odds payload and build the table from it.
    pub fn from_json(payload: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(payload).map_err(OddsError::Payload)?;
        Self::build(&decode_events(value)?)
    }

    /// Bookmaker column names, in first-observation order.
    pub fn bookmakers(&self) -> &[String] {
        &self.bookmakers
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, bookmaker: &str) -> Option<usize> {
        self.bookmakers.iter().position(|b| b == bookmaker)
    }

    pub fn column(&self, index: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.rows.iter().filter_map(move |row| row.cells.get(index))
    }
}

/// Per-event identity, collected independently of the table rows.
struct EventLabel {
    game: String,
    home_team: String,
    away_team: String,
    local_time: NaiveDateTime,
}

/// Column-major storage used while the table is assembled.
#[derive(Default)]
struct ColumnSet {
    names: Vec<String>,
    index: FxHashMap<String, usize>,
    columns: Vec<Vec<Cell>>,
    row_count: usize,
}

impl ColumnSet {
    /// Append one event's quotes; returns the number of rows it added.
    fn push_event(&mut self, quotes: Vec<BookmakerQuotes>) -> usize {
        let mut per_column: FxHashMap<usize, Vec<PriceVector>> = FxHashMap::default();
        for quote in quotes {
            let col = self.column_for(&quote.bookmaker);
            per_column.entry(col).or_default().extend(quote.vectors);
        }

        let added = per_column.values().map(Vec::len).max().unwrap_or(0);
        if added == 0 {
            return 0;
        }

        for (col, cells) in self.columns.iter_mut().enumerate() {
            let vectors = per_column.remove(&col).unwrap_or_default();
            let quoted = vectors.len();
            cells.extend(vectors.into_iter().map(Some));
            cells.extend(std::iter::repeat(None).take(added - quoted));
        }
        self.row_count += added;
        added
    }

    fn column_for(&mut self, bookmaker: &str) -> usize {
        if let Some(&col) = self.index.get(bookmaker) {
            return col;
        }
        let col = self.names.len();
        self.names.push(bookmaker.to_string());
        self.index.insert(bookmaker.to_string(), col);
        self.columns.push(vec![None; self.row_count]);
        col
    }

    fn row(&self, row: usize) -> Vec<Cell> {
        self.columns.iter().map(|column| column[row]).collect()
    }

    /// Indices of rows whose cells differ from every earlier row.
    fn distinct_rows(&self) -> Vec<usize> {
        let mut seen: FxHashSet<Vec<Cell>> = FxHashSet::default();
        (0..self.row_count)
            .filter(|&row| seen.insert(self.row(row)))
            .collect()
    }
}

fn to_local_time(
    commence_time: &str,
    tz: Tz,
) -> std::result::Result<NaiveDateTime, chrono::ParseError> {
    let utc = NaiveDateTime::parse_from_str(commence_time, FEED_TIME_FORMAT)?;
    Ok(Utc.from_utc_datetime(&utc).with_timezone(&tz).naive_local())
}
