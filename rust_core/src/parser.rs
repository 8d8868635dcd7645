//! Outcome parser: turns one event's bookmaker/market/outcome listings into
//! price vectors.

use crate::models::{FeedEvent, FeedMarket, Price, PriceVector};

/// Outcome name the feed uses for a tied result.
pub const DRAW_OUTCOME: &str = "Draw";

/// Price vectors one bookmaker quoted for one event, one per market
/// occurrence (a bookmaker listing two markets yields two vectors).
#[derive(Debug, Clone, PartialEq)]
pub struct BookmakerQuotes {
    pub bookmaker: String,
    pub vectors: Vec<PriceVector>,
}

/// Parse every bookmaker of an event, preserving feed order.
pub fn parse_event(event: &FeedEvent) -> Vec<BookmakerQuotes> {
    event
        .bookmakers
        .iter()
        .map(|bookmaker| BookmakerQuotes {
            bookmaker: bookmaker.title.clone(),
            vectors: bookmaker
                .markets
                .iter()
                .map(|market| parse_market(market, &event.home_team, &event.away_team))
                .collect(),
        })
        .collect()
}

/// Assign each outcome of a market to its slot.
///
/// Home and away checks both run, so a name equal to both teams fills both
/// slots. The draw check only runs for names that matched neither team. A
/// market without a draw outcome yields a two-way vector.
pub fn parse_market(market: &FeedMarket, home_team: &str, away_team: &str) -> PriceVector {
    let mut home: Option<Price> = None;
    let mut away: Option<Price> = None;
    let mut draw: Option<Price> = None;

    for outcome in &market.outcomes {
        let price = to_american(outcome.price);
        let mut matched_team = false;

        if outcome.name == home_team {
            home = Some(price);
            matched_team = true;
        }
        if outcome.name == away_team {
            away = Some(price);
            matched_team = true;
        }
        if !matched_team && outcome.name == DRAW_OUTCOME {
            draw = Some(price);
        }
    }

    match draw {
        Some(draw) => PriceVector::ThreeWay { home, away, draw },
        None => PriceVector::TwoWay { home, away },
    }
}

/// Feed prices arrive as JSON numbers; American odds are whole numbers, so
/// any fractional part is truncated toward zero.
fn to_american(price: f64) -> Price {
    price.trunc() as Price
}
