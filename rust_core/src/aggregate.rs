//! Best-price aggregation across bookmaker columns.

use crate::error::{OddsError, Result};
use crate::filter::{FilteredRow, FilteredTable};
use crate::models::{AggregationResult, OutcomeKind, OutcomeResult, Price};

/// Best price per outcome for every row of a filtered table.
pub fn aggregate(table: &FilteredTable) -> Result<Vec<AggregationResult>> {
    table
        .rows
        .iter()
        .map(|row| aggregate_row(row, &table.bookmakers))
        .collect()
}

/// Home and away compete over every column; draw only over columns whose
/// market lists a draw, and only when at least one does.
fn aggregate_row(row: &FilteredRow, bookmakers: &[String]) -> Result<AggregationResult> {
    let home: Vec<Option<Price>> = row.cells.iter().map(|v| v.home()).collect();
    let away: Vec<Option<Price>> = row.cells.iter().map(|v| v.away()).collect();
    let draw: Vec<Option<Price>> = row.cells.iter().map(|v| v.draw()).collect();
    let draw_exists = row.cells.iter().any(|v| v.has_draw());

    let mut outcomes = vec![(OutcomeKind::HomeWin, home), (OutcomeKind::AwayWin, away)];
    if draw_exists {
        outcomes.push((OutcomeKind::Draw, draw));
    }

    let results = outcomes
        .into_iter()
        .map(|(outcome, prices)| -> Result<OutcomeResult> {
            let (best, columns) = best_price(&prices).ok_or_else(|| {
                OddsError::DataIntegrity(format!(
                    "{}: no {} price from any bookmaker",
                    row.game,
                    outcome.as_str()
                ))
            })?;
            Ok(OutcomeResult {
                outcome,
                best_price: f64::from(best),
                bookmakers: columns.into_iter().map(|c| bookmakers[c].clone()).collect(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(AggregationResult {
        game: row.game.clone(),
        home_team: row.home_team.clone(),
        away_team: row.away_team.clone(),
        results,
    })
}

/// Maximum price and every column position holding it, in column order.
/// Absent prices do not compete; `None` if there are no prices at all.
pub fn best_price(prices: &[Option<Price>]) -> Option<(Price, Vec<usize>)> {
    let best = prices.iter().flatten().copied().max()?;
    let columns = prices
        .iter()
        .enumerate()
        .filter(|(_, p)| **p == Some(best))
        .map(|(i, _)| i)
        .collect();
    Some((best, columns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PriceVector;

    fn two(home: i32, away: i32) -> PriceVector {
        PriceVector::TwoWay {
            home: Some(home),
            away: Some(away),
        }
    }

    fn three(home: i32, away: i32, draw: i32) -> PriceVector {
        PriceVector::ThreeWay {
            home: Some(home),
            away: Some(away),
            draw,
        }
    }

    fn filtered(bookmakers: &[&str], cells: Vec<PriceVector>) -> FilteredTable {
        FilteredTable {
            bookmakers: bookmakers.iter().map(|s| s.to_string()).collect(),
            rows: vec![FilteredRow {
                game: "A vs. B".to_string(),
                home_team: "A".to_string(),
                away_team: "B".to_string(),
                cells,
            }],
        }
    }

    #[test]
    fn test_best_price_ties() {
        let (best, cols) = best_price(&[Some(150), Some(140), Some(150), None]).unwrap();
        assert_eq!(best, 150);
        assert_eq!(cols, vec![0, 2]);
    }

    #[test]
    fn test_best_price_negative_odds() {
        let (best, cols) = best_price(&[Some(-180), Some(-170), Some(-200)]).unwrap();
        assert_eq!(best, -170);
        assert_eq!(cols, vec![1]);
    }

    #[test]
    fn test_best_price_all_absent() {
        assert!(best_price(&[None, None]).is_none());
        assert!(best_price(&[]).is_none());
    }

    #[test]
    fn test_two_way_only_has_no_draw() {
        let results = aggregate(&filtered(&["X", "Y"], vec![two(150, -180), two(140, -170)])).unwrap();
        let kinds: Vec<OutcomeKind> = results[0].results.iter().map(|r| r.outcome).collect();
        assert_eq!(kinds, vec![OutcomeKind::HomeWin, OutcomeKind::AwayWin]);

        let away = results[0].outcome(OutcomeKind::AwayWin).unwrap();
        assert_eq!(away.best_price, -170.0);
        assert_eq!(away.bookmakers, vec!["Y".to_string()]);
    }

    #[test]
    fn test_mixed_draw_support() {
        let results =
            aggregate(&filtered(&["X", "Y"], vec![two(150, -180), three(140, -170, 300)])).unwrap();
        let game = &results[0];

        let home = game.outcome(OutcomeKind::HomeWin).unwrap();
        assert_eq!(home.best_price, 150.0);
        assert_eq!(home.bookmakers, vec!["X".to_string()]);

        let draw = game.outcome(OutcomeKind::Draw).unwrap();
        assert_eq!(draw.best_price, 300.0);
        assert_eq!(draw.bookmakers, vec!["Y".to_string()]);
    }

    #[test]
    fn test_three_way_tie_reports_all() {
        let results = aggregate(&filtered(
            &["X", "Y", "Z"],
            vec![three(120, 200, 250), three(120, 210, 250), three(110, 200, 250)],
        ))
        .unwrap();
        let game = &results[0];

        assert_eq!(
            game.outcome(OutcomeKind::HomeWin).unwrap().bookmakers,
            vec!["X".to_string(), "Y".to_string()]
        );
        assert_eq!(
            game.outcome(OutcomeKind::Draw).unwrap().bookmakers,
            vec!["X".to_string(), "Y".to_string(), "Z".to_string()]
        );
    }

    #[test]
    fn test_absent_prices_excluded() {
        let cells = vec![
            PriceVector::TwoWay {
                home: None,
                away: Some(-110),
            },
            two(105, -115),
        ];
        let results = aggregate(&filtered(&["X", "Y"], cells)).unwrap();
        let home = results[0].outcome(OutcomeKind::HomeWin).unwrap();
        assert_eq!(home.best_price, 105.0);
        assert_eq!(home.bookmakers, vec!["Y".to_string()]);
    }

    #[test]
    fn test_no_prices_is_integrity_error() {
        let cells = vec![PriceVector::TwoWay {
            home: None,
            away: Some(-110),
        }];
        let err = aggregate(&filtered(&["X"], cells)).unwrap_err();
        assert!(matches!(err, OddsError::DataIntegrity(_)));
    }

    #[test]
    fn test_no_columns_is_integrity_error() {
        let err = aggregate(&filtered(&[], vec![])).unwrap_err();
        assert!(matches!(err, OddsError::DataIntegrity(_)));
    }
}
