//! Data models for catalogue records and star ratings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Price text stored when a product shows no price.
pub const PRICE_UNAVAILABLE: &str = "N/A";

/// Availability text stored when a product shows no stock line.
pub const AVAILABILITY_UNKNOWN: &str = "N/A";

/// Five-level star rating as encoded in the `star-rating` class.
///
/// Ordered `Unrated < One < ... < Five`; `Unrated` never satisfies a minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rating {
    #[serde(rename = "No rating")]
    Unrated,
    One,
    Two,
    Three,
    Four,
    Five,
}

impl Rating {
    /// All recognized labels, lowest first.
    pub const LABELS: [Rating; 5] =
        [Rating::One, Rating::Two, Rating::Three, Rating::Four, Rating::Five];

    /// Maps a class word such as `Three` to a rating. Unknown words are `Unrated`.
    pub fn from_label(word: &str) -> Self {
        word.parse().unwrap_or(Rating::Unrated)
    }

    /// Number of stars, `None` when unrated.
    pub fn stars(&self) -> Option<u8> {
        match self {
            Rating::Unrated => None,
            Rating::One => Some(1),
            Rating::Two => Some(2),
            Rating::Three => Some(3),
            Rating::Four => Some(4),
            Rating::Five => Some(5),
        }
    }

    pub fn is_rated(&self) -> bool {
        *self != Rating::Unrated
    }

    /// True when this is a recognized label at or above `min`.
    pub fn at_least(&self, min: Rating) -> bool {
        self.is_rated() && *self >= min
    }
}

impl FromStr for Rating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let word = s.trim();
        Rating::LABELS
            .into_iter()
            .find(|r| {
                r.to_string().eq_ignore_ascii_case(word)
                    || r.stars().is_some_and(|n| n.to_string() == word)
            })
            .ok_or_else(|| format!("Unknown rating: {}. Use: One, Two, Three, Four, Five", s))
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Rating::Unrated => "No rating",
            Rating::One => "One",
            Rating::Two => "Two",
            Rating::Three => "Three",
            Rating::Four => "Four",
            Rating::Five => "Five",
        };
        f.write_str(label)
    }
}

/// One product extracted from a catalogue listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Book title
    pub title: String,
    /// Price as shown, e.g. `£51.77`, or [`PRICE_UNAVAILABLE`]
    pub price_text: String,
    /// Numeric price derived from `price_text`, never negative
    pub price_value: f64,
    /// Star rating
    pub rating: Rating,
    /// Stock line, e.g. `In stock`
    pub availability: String,
    /// Absolute product page URL
    pub source_url: String,
    /// Listing page the product was found on (1-based)
    pub page_index: u32,
    /// When the record was extracted
    pub captured_at: DateTime<Utc>,
}

impl ProductRecord {
    /// True when the record carries a usable price.
    pub fn has_price(&self) -> bool {
        self.price_value > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_order() {
        assert!(Rating::One < Rating::Two);
        assert!(Rating::Four < Rating::Five);
        assert!(Rating::Unrated < Rating::One);
    }

    #[test]
    fn test_rating_at_least() {
        assert!(Rating::Five.at_least(Rating::Four));
        assert!(Rating::Four.at_least(Rating::Four));
        assert!(!Rating::Three.at_least(Rating::Four));
        assert!(!Rating::Unrated.at_least(Rating::One));
    }

    #[test]
    fn test_rating_parsing() {
        assert_eq!("Three".parse::<Rating>().unwrap(), Rating::Three);
        assert_eq!("four".parse::<Rating>().unwrap(), Rating::Four);
        assert_eq!("5".parse::<Rating>().unwrap(), Rating::Five);
        assert_eq!(" TWO ".parse::<Rating>().unwrap(), Rating::Two);
        assert!("No rating".parse::<Rating>().is_err());
        assert!("0".parse::<Rating>().is_err());

        let err = "Six".parse::<Rating>().unwrap_err();
        assert!(err.contains("Unknown rating"));
    }

    #[test]
    fn test_from_label_unknown_is_unrated() {
        assert_eq!(Rating::from_label("Zero"), Rating::Unrated);
        assert_eq!(Rating::from_label(""), Rating::Unrated);
        assert_eq!(Rating::from_label("One"), Rating::One);
    }

    #[test]
    fn test_rating_display_and_stars() {
        assert_eq!(Rating::Two.to_string(), "Two");
        assert_eq!(Rating::Unrated.to_string(), "No rating");
        assert_eq!(Rating::Five.stars(), Some(5));
        assert_eq!(Rating::Unrated.stars(), None);
    }

    #[test]
    fn test_rating_serde_labels() {
        assert_eq!(serde_json::to_string(&Rating::Four).unwrap(), "\"Four\"");
        assert_eq!(serde_json::to_string(&Rating::Unrated).unwrap(), "\"No rating\"");

        let parsed: Rating = serde_json::from_str("\"No rating\"").unwrap();
        assert_eq!(parsed, Rating::Unrated);
    }

    #[test]
    fn test_record_has_price() {
        let record = ProductRecord {
            title: "Sharp Objects".to_string(),
            price_text: PRICE_UNAVAILABLE.to_string(),
            price_value: 0.0,
            rating: Rating::Four,
            availability: "In stock".to_string(),
            source_url: "http://books.toscrape.com/catalogue/sharp-objects_997/index.html"
                .to_string(),
            page_index: 1,
            captured_at: Utc::now(),
        };
        assert!(!record.has_price());

        let priced = ProductRecord { price_value: 47.82, ..record };
        assert!(priced.has_price());
    }
}
