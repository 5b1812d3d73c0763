//! Output formatting for records and stories (table, JSON, markdown, CSV).

use crate::catalog::models::ProductRecord;
use crate::config::OutputFormat;
use crate::news::NewsItem;
use std::io;
use tracing::warn;

const RECORD_COLUMNS: [&str; 8] = [
    "title",
    "price_text",
    "price_value",
    "rating",
    "availability",
    "source_url",
    "page_index",
    "captured_at",
];

const NEWS_COLUMNS: [&str; 5] = ["title", "link", "score", "comments", "captured_at"];

/// Formats records and stories for stdout.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats catalogue records.
    pub fn format_records(&self, records: &[ProductRecord]) -> String {
        if records.is_empty() {
            return self.empty(&RECORD_COLUMNS);
        }

        match self.format {
            OutputFormat::Json => json(records),
            OutputFormat::Table => self.table_records(records),
            OutputFormat::Markdown => self.markdown_records(records),
            OutputFormat::Csv => {
                csv_or_header(&RECORD_COLUMNS, csv_rows(&RECORD_COLUMNS, records.iter().map(record_row)))
            }
        }
    }

    /// Formats news stories.
    pub fn format_news(&self, items: &[NewsItem]) -> String {
        if items.is_empty() {
            return self.empty(&NEWS_COLUMNS);
        }

        match self.format {
            OutputFormat::Json => json(items),
            OutputFormat::Table => self.table_news(items),
            OutputFormat::Markdown => self.markdown_news(items),
            OutputFormat::Csv => {
                csv_or_header(&NEWS_COLUMNS, csv_rows(&NEWS_COLUMNS, items.iter().map(news_row)))
            }
        }
    }

    fn empty(&self, columns: &[&str]) -> String {
        match self.format {
            OutputFormat::Json => "[]".to_string(),
            OutputFormat::Csv => columns.join(","),
            _ => "No records found.".to_string(),
        }
    }

    // Table formatting

    fn table_records(&self, records: &[ProductRecord]) -> String {
        let page_width = 4;
        let price_width = 10;
        let rating_width = 9;
        let stock_width = 12;
        let title_width = 50;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<page_width$}  {:<price_width$}  {:<rating_width$}  {:<stock_width$}  {}",
            "Page", "Price", "Rating", "Stock", "Title"
        ));
        lines.push(format!(
            "{:-<page_width$}  {:-<price_width$}  {:-<rating_width$}  {:-<stock_width$}  {:-<title_width$}",
            "", "", "", "", ""
        ));

        for record in records {
            lines.push(format!(
                "{:<page_width$}  {:>price_width$}  {:<rating_width$}  {:<stock_width$}  {}",
                record.page_index,
                record.price_text,
                record.rating.to_string(),
                truncate(&record.availability, stock_width),
                truncate(&record.title, title_width)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} records", records.len()));

        lines.join("\n")
    }

    fn table_news(&self, items: &[NewsItem]) -> String {
        let score_width = 12;
        let comments_width = 14;
        let title_width = 50;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<score_width$}  {:<comments_width$}  {}",
            "Score", "Comments", "Title"
        ));
        lines.push(format!(
            "{:-<score_width$}  {:-<comments_width$}  {:-<title_width$}",
            "", "", ""
        ));

        for item in items {
            lines.push(format!(
                "{:<score_width$}  {:<comments_width$}  {}",
                item.score.as_deref().unwrap_or("N/A"),
                item.comments.as_deref().unwrap_or("N/A"),
                truncate(&item.title, title_width)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} stories", items.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_records(&self, records: &[ProductRecord]) -> String {
        let mut lines = Vec::new();

        lines.push("| Page | Price | Rating | Stock | Title |".to_string());
        lines.push("|------|-------|--------|-------|-------|".to_string());

        for record in records {
            lines.push(format!(
                "| {} | {} | {} | {} | [{}]({}) |",
                record.page_index,
                record.price_text,
                record.rating.stars().map(|s| format!("{}/5", s)).unwrap_or_else(|| "N/A".to_string()),
                record.availability,
                truncate(&record.title, 40),
                record.source_url
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} records found*", records.len()));

        lines.join("\n")
    }

    fn markdown_news(&self, items: &[NewsItem]) -> String {
        let mut lines = Vec::new();

        lines.push("| Score | Comments | Title |".to_string());
        lines.push("|-------|----------|-------|".to_string());

        for item in items {
            lines.push(format!(
                "| {} | {} | [{}]({}) |",
                item.points().map(|p| p.to_string()).unwrap_or_default(),
                item.comment_count().map(|c| c.to_string()).unwrap_or_default(),
                truncate(&item.title, 60),
                item.link
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} stories found*", items.len()));

        lines.join("\n")
    }
}

fn json<T: serde::Serialize>(items: &[T]) -> String {
    serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string())
}

/// Shortens text to `width` characters, ending in `...` when cut.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

fn record_row(record: &ProductRecord) -> Vec<String> {
    vec![
        record.title.clone(),
        record.price_text.clone(),
        record.price_value.to_string(),
        record.rating.to_string(),
        record.availability.clone(),
        record.source_url.clone(),
        record.page_index.to_string(),
        record.captured_at.to_rfc3339(),
    ]
}

fn news_row(item: &NewsItem) -> Vec<String> {
    vec![
        item.title.clone(),
        item.link.clone(),
        item.score.clone().unwrap_or_default(),
        item.comments.clone().unwrap_or_default(),
        item.captured_at.to_rfc3339(),
    ]
}

fn csv_rows(header: &[&str], rows: impl Iterator<Item = Vec<String>>) -> csv::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(&row)?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    let text = String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(text.trim_end().to_string())
}

/// Rendered CSV, or the bare header when rendering failed.
fn csv_or_header(header: &[&str], rendered: csv::Result<String>) -> String {
    rendered.unwrap_or_else(|e| {
        warn!("Failed to render CSV output: {}", e);
        header.join(",")
    })
}
