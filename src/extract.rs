//! Ordered extraction strategies with fallback.

use chrono::{DateTime, Utc};
use scraper::Html;
use tracing::debug;
use url::Url;

/// Inputs shared by every strategy run against one page.
#[derive(Debug, Clone)]
pub struct PageContext {
    /// URL relative links are resolved against
    pub base: Url,
    /// Timestamp stamped on every extracted item
    pub captured_at: DateTime<Utc>,
}

impl PageContext {
    pub fn new(base: Url) -> Self {
        Self { base, captured_at: Utc::now() }
    }

    /// Resolves a link against the page base; unresolvable links are kept as-is.
    pub fn absolute(&self, href: &str) -> String {
        self.base.join(href).map(String::from).unwrap_or_else(|_| href.to_string())
    }
}

/// A pure extraction function over a parsed page.
pub type Strategy<T> = fn(&Html, &PageContext) -> Vec<T>;

/// Runs strategies in order and returns the first non-empty result.
pub fn first_non_empty<T>(
    document: &Html,
    context: &PageContext,
    strategies: &[(&str, Strategy<T>)],
) -> Vec<T> {
    for (name, strategy) in strategies {
        let items = strategy(document, context);
        if !items.is_empty() {
            debug!("Strategy '{}' extracted {} items", name, items.len());
            return items;
        }
        debug!("Strategy '{}' found nothing, trying next", name);
    }

    Vec::new()
}
