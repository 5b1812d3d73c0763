//! Statistics over extracted stories.

use super::models::NewsItem;
use serde::Serialize;
use std::fmt::Write;
use url::Url;

/// Min/max/mean of a set of integer measurements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spread {
    pub min: u32,
    pub max: u32,
    pub mean: f64,
}

impl Spread {
    fn from_values(values: &[u32]) -> Option<Self> {
        let min = *values.iter().min()?;
        let max = *values.iter().max()?;
        let mean = values.iter().map(|v| *v as f64).sum::<f64>() / values.len() as f64;
        Some(Self { min, max, mean })
    }
}

/// Summary of a front-page scrape.
#[derive(Debug, Clone, Serialize)]
pub struct NewsAnalysis {
    pub total: usize,
    /// Title length in characters
    pub title_length: Option<Spread>,
    /// Links pointing away from the front page host
    pub external_links: usize,
    /// Links on the front page host
    pub internal_links: usize,
    /// Stories that carry a score
    pub scored: usize,
    pub points: Option<Spread>,
}

impl NewsAnalysis {
    /// Analyses stories scraped from `front_page`.
    pub fn from_items(items: &[NewsItem], front_page: &Url) -> Self {
        let lengths: Vec<u32> = items.iter().map(|i| i.title.chars().count() as u32).collect();

        let host = front_page.host_str().unwrap_or_default();
        let internal_links = items
            .iter()
            .filter(|i| {
                Url::parse(&i.link).ok().and_then(|u| u.host_str().map(|h| h == host)).unwrap_or(false)
            })
            .count();

        let points: Vec<u32> = items.iter().filter_map(NewsItem::points).collect();

        Self {
            total: items.len(),
            title_length: Spread::from_values(&lengths),
            external_links: items.len() - internal_links,
            internal_links,
            scored: items.iter().filter(|i| i.score.is_some()).count(),
            points: Spread::from_values(&points),
        }
    }

    /// Renders a plain-text report.
    pub fn summary_text(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "=== NEWS SUMMARY ===");
        let _ = writeln!(out, "Total stories: {}", self.total);

        if let Some(lengths) = &self.title_length {
            let _ = writeln!(out, "Longest title: {} characters", lengths.max);
            let _ = writeln!(out, "Shortest title: {} characters", lengths.min);
            let _ = writeln!(out, "Average title length: {:.1} characters", lengths.mean);
        }

        let _ = writeln!(out, "External links: {}", self.external_links);
        let _ = writeln!(out, "Internal links: {}", self.internal_links);

        if let Some(points) = &self.points {
            let _ = writeln!(out, "Stories with score: {}", self.scored);
            let _ = writeln!(out, "Highest score: {}", points.max);
            let _ = writeln!(out, "Lowest score: {}", points.min);
            let _ = writeln!(out, "Average score: {:.1}", points.mean);
        }

        out
    }
}
