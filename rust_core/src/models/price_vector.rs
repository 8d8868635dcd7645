use serde::{Deserialize, Serialize};
use std::fmt;

/// American odds price.
pub type Price = i32;

/// Prices one bookmaker quotes for one market of one event.
///
/// The variant records whether the market offered a draw at all, which is
/// distinct from a draw slot whose price is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PriceVector {
    TwoWay {
        home: Option<Price>,
        away: Option<Price>,
    },
    ThreeWay {
        home: Option<Price>,
        away: Option<Price>,
        draw: Price,
    },
}

impl PriceVector {
    pub fn home(&self) -> Option<Price> {
        match self {
            PriceVector::TwoWay { home, .. } | PriceVector::ThreeWay { home, .. } => *home,
        }
    }

    pub fn away(&self) -> Option<Price> {
        match self {
            PriceVector::TwoWay { away, .. } | PriceVector::ThreeWay { away, .. } => *away,
        }
    }

    /// Draw price, present only for markets that list a draw outcome.
    pub fn draw(&self) -> Option<Price> {
        match self {
            PriceVector::TwoWay { .. } => None,
            PriceVector::ThreeWay { draw, .. } => Some(*draw),
        }
    }

    pub fn has_draw(&self) -> bool {
        matches!(self, PriceVector::ThreeWay { .. })
    }

    /// Number of outcome slots (2 or 3).
    pub fn slot_count(&self) -> usize {
        match self {
            PriceVector::TwoWay { .. } => 2,
            PriceVector::ThreeWay { .. } => 3,
        }
    }
}

impl fmt::Display for PriceVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = |p: Option<Price>| p.map_or_else(|| "None".to_string(), |v| v.to_string());
        match self {
            PriceVector::TwoWay { home, away } => write!(f, "({}, {})", slot(*home), slot(*away)),
            PriceVector::ThreeWay { home, away, draw } => {
                write!(f, "({}, {}, {})", slot(*home), slot(*away), draw)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let two = PriceVector::TwoWay {
            home: Some(150),
            away: None,
        };
        assert_eq!(two.home(), Some(150));
        assert_eq!(two.away(), None);
        assert_eq!(two.draw(), None);
        assert_eq!(two.slot_count(), 2);
        assert!(!two.has_draw());

        let three = PriceVector::ThreeWay {
            home: Some(140),
            away: Some(-170),
            draw: 300,
        };
        assert_eq!(three.draw(), Some(300));
        assert_eq!(three.slot_count(), 3);
        assert!(three.has_draw());
    }

    #[test]
    fn test_display() {
        let two = PriceVector::TwoWay {
            home: Some(150),
            away: None,
        };
        assert_eq!(two.to_string(), "(150, None)");

        let three = PriceVector::ThreeWay {
            home: Some(140),
            away: Some(-170),
            draw: 300,
        };
        assert_eq!(three.to_string(), "(140, -170, 300)");
    }

    #[test]
    fn test_serialization_is_tagged() {
        let three = PriceVector::ThreeWay {
            home: Some(140),
            away: Some(-170),
            draw: 300,
        };
        let json = serde_json::to_string(&three).unwrap();
        assert!(json.contains("\"kind\":\"three_way\""));

        let back: PriceVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, three);
    }
}
