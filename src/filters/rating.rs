//! Minimum rating filter.

use super::Filter;
use crate::catalog::models::{ProductRecord, Rating};

/// Passes records rated at or above a label. Unrated records never pass.
pub struct RatingFilter {
    min: Rating,
}

impl RatingFilter {
    /// Creates a new rating filter with a minimum label.
    pub fn new(min: Rating) -> Self {
        Self { min }
    }
}

impl Filter<ProductRecord> for RatingFilter {
    fn matches(&self, record: &ProductRecord) -> bool {
        record.rating.at_least(self.min)
    }

    fn description(&self) -> String {
        format!("Rating: >= {}", self.min)
    }
}
