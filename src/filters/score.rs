//! Minimum score filter for news stories.

use super::Filter;
use crate::news::NewsItem;

/// Passes stories whose score is known and at least `min` points.
pub struct ScoreFilter {
    min: u32,
}

impl ScoreFilter {
    pub fn new(min: u32) -> Self {
        Self { min }
    }
}

impl Filter<NewsItem> for ScoreFilter {
    fn matches(&self, item: &NewsItem) -> bool {
        item.points().is_some_and(|points| points >= self.min)
    }

    fn description(&self) -> String {
        format!("Score: >= {} points", self.min)
    }
}
