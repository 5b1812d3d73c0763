//! Data models for news front-page stories.

use chrono::{DateTime, Utc};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static FIRST_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// One story from a news front page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Story headline
    pub title: String,
    /// Absolute story link
    pub link: String,
    /// Score text such as `128 points`, when the page shows one
    pub score: Option<String>,
    /// Comments link text such as `42 comments`, when the page shows one
    pub comments: Option<String>,
    /// When the story was extracted
    pub captured_at: DateTime<Utc>,
}

impl NewsItem {
    /// Creates a story without score or comments.
    pub fn new(title: impl Into<String>, link: impl Into<String>, captured_at: DateTime<Utc>) -> Self {
        Self { title: title.into(), link: link.into(), score: None, comments: None, captured_at }
    }

    /// Points parsed from the score text.
    pub fn points(&self) -> Option<u32> {
        self.score.as_deref().and_then(first_number)
    }

    /// Comment count parsed from the comments text.
    pub fn comment_count(&self) -> Option<u32> {
        self.comments.as_deref().and_then(first_number)
    }
}

/// First run of digits in a text.
pub fn first_number(text: &str) -> Option<u32> {
    FIRST_NUMBER.find(text).and_then(|m| m.as_str().parse().ok())
}
