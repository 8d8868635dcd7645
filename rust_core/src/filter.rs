//! Date filter: selects the rows of an event table played on a local date,
//! optionally projected onto a subset of bookmaker columns.

use crate::error::{OddsError, Result};
use crate::models::PriceVector;
use crate::table::EventTable;
use chrono::NaiveDate;
use tracing::debug;

const QUERY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Rows that survived filtering; every cell is quoted.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredTable {
    pub bookmakers: Vec<String>,
    pub rows: Vec<FilteredRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilteredRow {
    pub game: String,
    pub home_team: String,
    pub away_team: String,
    pub cells: Vec<PriceVector>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    Matched(FilteredTable),
    NoMatch { date: NaiveDate },
    InvalidDate { input: String },
}

/// Parse a `YYYY-MM-DD` query date.
pub fn parse_query_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input, QUERY_DATE_FORMAT).ok()
}

/// Select rows whose local date is `target_date`.
///
/// With `bookmakers`, the result holds exactly those columns in the given
/// order; naming a column the table does not have is an error. Rows missing
/// a quote from any remaining bookmaker are dropped.
pub fn filter_by_date(
    table: &EventTable,
    target_date: &str,
    bookmakers: Option<&[String]>,
) -> Result<FilterOutcome> {
    let Some(date) = parse_query_date(target_date) else {
        return Ok(FilterOutcome::InvalidDate {
            input: target_date.to_string(),
        });
    };

    let columns = project_columns(table, bookmakers)?;

    let rows: Vec<FilteredRow> = table
        .rows()
        .iter()
        .filter(|row| row.local_date() == date)
        .filter_map(|row| {
            let cells = columns
                .iter()
                .map(|&col| row.cells[col])
                .collect::<Option<Vec<PriceVector>>>()?;
            Some(FilteredRow {
                game: row.game.clone(),
                home_team: row.home_team.clone(),
                away_team: row.away_team.clone(),
                cells,
            })
        })
        .collect();

    debug!(
        "Date filter {}: {} of {} rows over {} bookmakers",
        date,
        rows.len(),
        table.len(),
        columns.len()
    );

    if rows.is_empty() {
        return Ok(FilterOutcome::NoMatch { date });
    }

    Ok(FilterOutcome::Matched(FilteredTable {
        bookmakers: columns
            .iter()
            .map(|&col| table.bookmakers()[col].clone())
            .collect(),
        rows,
    }))
}

/// Column indices to keep. A name listed twice is kept once.
fn project_columns(table: &EventTable, bookmakers: Option<&[String]>) -> Result<Vec<usize>> {
    let Some(names) = bookmakers else {
        return Ok((0..table.bookmakers().len()).collect());
    };

    let mut columns: Vec<usize> = Vec::with_capacity(names.len());
    for name in names {
        let col = table
            .column_index(name)
            .ok_or_else(|| OddsError::UnknownBookmaker(name.clone()))?;
        if !columns.contains(&col) {
            columns.push(col);
        }
    }
    Ok(columns)
}
