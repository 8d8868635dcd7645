//! Record shapes of the odds provider's `/sports` and `/sports/{sport}/odds`
//! responses.

use crate::error::{OddsError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One sporting fixture as delivered by the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub sport_key: Option<String>,
    pub home_team: String,
    pub away_team: String,
    /// ISO-8601 UTC, `YYYY-MM-DDTHH:MM:SSZ`
    pub commence_time: String,
    pub bookmakers: Vec<FeedBookmaker>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedBookmaker {
    #[serde(default)]
    pub key: Option<String>,
    pub title: String,
    pub markets: Vec<FeedMarket>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedMarket {
    #[serde(default)]
    pub key: Option<String>,
    pub outcomes: Vec<FeedOutcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedOutcome {
    pub name: String,
    pub price: f64,
}

impl FeedEvent {
    /// Row identity used by the event table.
    pub fn label(&self) -> String {
        format!("{} vs. {}", self.home_team, self.away_team)
    }
}

/// In-season sport listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SportInfo {
    pub key: String,
    #[serde(default)]
    pub group: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub has_outrights: bool,
}

/// Decode a raw odds payload into events.
///
/// The payload must be a JSON array. Elements are decoded one at a time so a
/// malformed record is reported with its position in the feed.
pub fn decode_events(payload: Value) -> Result<Vec<FeedEvent>> {
    let items: Vec<Value> = serde_json::from_value(payload).map_err(OddsError::Payload)?;

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<FeedEvent>(item).map_err(|e| OddsError::Parse {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event_json(home: &str, away: &str) -> Value {
        json!({
            "id": "e1",
            "sport_key": "soccer_epl",
            "sport_title": "EPL",
            "commence_time": "2024-06-15T23:30:00Z",
            "home_team": home,
            "away_team": away,
            "bookmakers": [{
                "key": "draftkings",
                "title": "DraftKings",
                "last_update": "2024-06-15T12:00:00Z",
                "markets": [{
                    "key": "h2h",
                    "outcomes": [
                        {"name": home, "price": 150},
                        {"name": away, "price": -180}
                    ]
                }]
            }]
        })
    }

    #[test]
    fn test_decode_events_accepts_extra_fields() {
        let events = decode_events(json!([event_json("A", "B")])).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].label(), "A vs. B");
        assert_eq!(events[0].bookmakers[0].title, "DraftKings");
        assert_eq!(events[0].bookmakers[0].markets[0].outcomes[1].price, -180.0);
    }

    #[test]
    fn test_decode_events_empty_array() {
        let events = decode_events(json!([])).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_decode_events_reports_event_index() {
        let mut broken = event_json("C", "D");
        broken.as_object_mut().unwrap().remove("bookmakers");

        let err = decode_events(json!([event_json("A", "B"), broken])).unwrap_err();
        match err {
            OddsError::Parse { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("bookmakers"));
            }
            other => panic!("Expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_events_missing_outcome_price() {
        let mut broken = event_json("A", "B");
        broken["bookmakers"][0]["markets"][0]["outcomes"][0]
            .as_object_mut()
            .unwrap()
            .remove("price");

        let err = decode_events(json!([broken])).unwrap_err();
        assert!(matches!(err, OddsError::Parse { index: 0, .. }));
    }

    #[test]
    fn test_decode_events_rejects_non_array() {
        let err = decode_events(json!({"message": "quota exceeded"})).unwrap_err();
        assert!(matches!(err, OddsError::Payload(_)));
        assert!(err.is_upstream());
    }

    #[test]
    fn test_sport_info_deserialization() {
        let sport: SportInfo = serde_json::from_value(json!({
            "key": "basketball_nba",
            "group": "Basketball",
            "title": "NBA",
            "description": "US Basketball",
            "active": true,
            "has_outrights": false
        }))
        .unwrap();
        assert_eq!(sport.key, "basketball_nba");
        assert!(sport.active);
    }
}
