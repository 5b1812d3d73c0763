//! Aggregate statistics over crawled records.

use crate::catalog::models::{ProductRecord, Rating};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Min/mean/max over records with a positive price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceStats {
    pub count: usize,
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

impl PriceStats {
    /// Computes stats over positive values; `None` when there are none.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut count = 0;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for value in values.into_iter().filter(|v| *v > 0.0) {
            count += 1;
            sum += value;
            min = min.min(value);
            max = max.max(value);
        }

        (count > 0).then(|| PriceStats { count, min, mean: sum / count as f64, max })
    }
}

/// One row of the most-expensive ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopEntry {
    pub title: String,
    pub price_text: String,
    pub price_value: f64,
    pub rating: Rating,
}

/// Summary of a record set. Building it never touches the records.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Number of records analysed
    pub total: usize,
    /// Price statistics, absent when no record has a positive price
    pub prices: Option<PriceStats>,
    /// Record count per rating
    pub ratings: BTreeMap<Rating, usize>,
    /// Highest-priced records, most expensive first
    pub top_priced: Vec<TopEntry>,
}

impl Analysis {
    /// Analyses the records, ranking the `top_n` most expensive.
    pub fn from_records(records: &[ProductRecord], top_n: usize) -> Self {
        let prices = PriceStats::from_values(records.iter().map(|r| r.price_value));

        let mut ratings = BTreeMap::new();
        for record in records {
            *ratings.entry(record.rating).or_insert(0) += 1;
        }

        let mut priced: Vec<&ProductRecord> = records.iter().filter(|r| r.has_price()).collect();
        // Stable: equal prices keep crawl order.
        priced.sort_by(|a, b| b.price_value.total_cmp(&a.price_value));

        let top_priced = priced
            .into_iter()
            .take(top_n)
            .map(|r| TopEntry {
                title: r.title.clone(),
                price_text: r.price_text.clone(),
                price_value: r.price_value,
                rating: r.rating,
            })
            .collect();

        Self { total: records.len(), prices, ratings, top_priced }
    }

    /// Rating counts, most frequent first; ties in rating order.
    pub fn rating_frequencies(&self) -> Vec<(Rating, usize)> {
        let mut counts: Vec<(Rating, usize)> = self.ratings.iter().map(|(r, c)| (*r, *c)).collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        counts
    }

    /// Renders the plain-text report written next to the exports.
    pub fn summary_text(&self, currency: &str) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "=== DATA SUMMARY ===");
        let _ = writeln!(out, "Total records: {}", self.total);

        if let Some(prices) = &self.prices {
            let _ = writeln!(out, "Average price: {}{:.2}", currency, prices.mean);
            let _ = writeln!(out, "Minimum price: {}{:.2}", currency, prices.min);
            let _ = writeln!(out, "Maximum price: {}{:.2}", currency, prices.max);
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Rating distribution:");
        for (rating, count) in self.rating_frequencies() {
            let _ = writeln!(out, "{:<10} {}", rating.to_string(), count);
        }

        if !self.top_priced.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Top {} most expensive:", self.top_priced.len());
            for entry in &self.top_priced {
                let _ = writeln!(out, "- {} - {} ({})", entry.title, entry.price_text, entry.rating);
            }
        }

        out
    }
}
