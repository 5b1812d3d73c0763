//! Catalogue crawl command implementation.

use crate::analysis::Analysis;
use crate::catalog::CatalogCrawler;
use crate::client::{HttpFetcher, PageSource};
use crate::config::{Config, OutputFormat, MAX_PAGES_LIMIT};
use crate::export::{ExportReport, Exporter};
use crate::filters::FilterCriteria;
use crate::format::Formatter;
use anyhow::{Context, Result};
use tracing::{debug, info, warn};

/// Default export base name for catalogue data.
pub const DEFAULT_OUTPUT: &str = "books_data";

/// Crawls the catalogue, analyses, filters and exports the records.
pub struct CrawlCommand {
    config: Config,
}

impl CrawlCommand {
    /// Creates a new crawl command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the crawl and returns formatted output.
    pub async fn execute(&self) -> Result<String> {
        let fetcher = HttpFetcher::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_source(&fetcher).await
    }

    /// Executes the crawl against a provided page source (for testing).
    pub async fn execute_with_source(&self, source: &dyn PageSource) -> Result<String> {
        let pages = self.page_count();
        let crawler = CatalogCrawler::new(&self.config, source)?;

        let report = crawler.crawl(pages).await;
        if report.stop.is_partial() {
            warn!("Crawl {} with {} records", report.stop, report.records.len());
        }

        let analysis = Analysis::from_records(&report.records, self.config.top_n);

        let criteria = FilterCriteria::from_config(&self.config);
        let filters = criteria.build();
        if !filters.is_empty() {
            debug!("Active filters: {}", filters.descriptions().join(", "));
        }
        let matching = filters.apply(&report.records);
        info!("{} of {} records match the filters", matching.len(), report.records.len());

        let exports = if self.config.export {
            let exporter = Exporter::new(self.config.output_or(DEFAULT_OUTPUT));
            Some(exporter.export_catalog(&report.records, &analysis, &self.config.currency_symbol))
        } else {
            debug!("Export disabled");
            None
        };

        let formatter = Formatter::new(self.config.format);
        let mut output = formatter.format_records(&matching);

        // JSON and CSV stay machine-readable
        if matches!(self.config.format, OutputFormat::Table | OutputFormat::Markdown) {
            output.push_str("\n\n");
            output.push_str(analysis.summary_text(&self.config.currency_symbol).trim_end());
            output.push_str(&format!(
                "\n\nCrawl {}: {} pages, {} records",
                report.stop,
                report.pages_crawled,
                report.records.len()
            ));
            if let Some(exports) = &exports {
                output.push_str(&describe_exports(exports));
            }
        }

        Ok(output)
    }

    /// Configured page count clamped to `1..=MAX_PAGES_LIMIT`.
    fn page_count(&self) -> u32 {
        let pages = self.config.max_pages.clamp(1, MAX_PAGES_LIMIT);
        if pages != self.config.max_pages {
            warn!("Page count {} out of range, using {}", self.config.max_pages, pages);
        }
        pages
    }
}

/// Human-readable lines listing written and skipped files.
pub fn describe_exports(report: &ExportReport) -> String {
    let mut out = String::new();

    for path in &report.written {
        out.push_str(&format!("\nSaved: {}", path.display()));
    }
    for (format, reason) in &report.skipped {
        out.push_str(&format!("\nSkipped {}: {}", format, reason));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::Rating;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tempfile::TempDir;

    const BASE: &str = "http://books.test";

    /// Mock catalogue keyed by URL.
    struct MockCatalogue {
        pages: HashMap<String, String>,
        call_count: AtomicU32,
    }

    impl MockCatalogue {
        fn new(pages: Vec<String>) -> Self {
            let pages = pages
                .into_iter()
                .enumerate()
                .map(|(i, body)| {
                    let url = if i == 0 {
                        BASE.to_string()
                    } else {
                        format!("{}/catalogue/page-{}.html", BASE, i + 1)
                    };
                    (url, body)
                })
                .collect();
            Self { pages, call_count: AtomicU32::new(0) }
        }

        fn call_count(&self) -> u32 {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PageSource for MockCatalogue {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("Request to {} failed with status: 404", url))
        }
    }

    fn make_test_config() -> Config {
        Config {
            base_url: BASE.to_string(),
            delay_ms: 0,
            max_pages: 1,
            export: false,
            format: OutputFormat::Table,
            ..Config::default()
        }
    }

    fn make_listing(products: &[(&str, &str, &str)]) -> String {
        let mut html = String::from("<html><head><title>All products</title></head><body><ol>");
        for (title, price, rating) in products {
            html.push_str(&format!(
                r#"<li><article class="product_pod">
                    <p class="star-rating {}"></p>
                    <h3><a href="catalogue/book/index.html" title="{}">{}</a></h3>
                    <p class="price_color">{}</p>
                    <p class="instock availability">In stock</p>
                </article></li>"#,
                rating, title, title, price
            ));
        }
        html.push_str("</ol></body></html>");
        html
    }

    #[tokio::test]
    async fn test_crawl_command_basic() {
        let source = MockCatalogue::new(vec![make_listing(&[
            ("A Light in the Attic", "£51.77", "Three"),
            ("Tipping the Velvet", "£53.74", "One"),
        ])]);
        let cmd = CrawlCommand::new(make_test_config());

        let output = cmd.execute_with_source(&source).await.unwrap();
        assert!(output.contains("A Light in the Attic"));
        assert!(output.contains("Tipping the Velvet"));
        assert!(output.contains("=== DATA SUMMARY ==="));
        assert!(output.contains("Maximum price: £53.74"));
        assert!(output.contains("Crawl completed: 1 pages, 2 records"));
    }

    #[tokio::test]
    async fn test_crawl_command_partial_is_ok() {
        let source = MockCatalogue::new(vec![make_listing(&[("Soumission", "£50.10", "One")])]);
        let mut config = make_test_config();
        config.max_pages = 3;

        let output = CrawlCommand::new(config).execute_with_source(&source).await.unwrap();
        assert!(output.contains("Soumission"));
        assert!(output.contains("stopped at page 2: fetch failed"));
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn test_crawl_command_nothing_fetched() {
        let source = MockCatalogue::new(Vec::new());
        let output =
            CrawlCommand::new(make_test_config()).execute_with_source(&source).await.unwrap();

        assert!(output.contains("No records found."));
        assert!(output.contains("Total records: 0"));
    }

    #[tokio::test]
    async fn test_crawl_command_with_filters() {
        let source = MockCatalogue::new(vec![make_listing(&[
            ("Cheap Poems", "£9.99", "Five"),
            ("Mid History", "£25.00", "Four"),
            ("Pricey History", "£80.00", "Five"),
            ("Mid Novel", "£30.00", "Two"),
        ])]);
        let mut config = make_test_config();
        config.format = OutputFormat::Csv;
        config.min_price = Some(20.0);
        config.max_price = Some(50.0);
        config.min_rating = Some(Rating::Four);

        let output = CrawlCommand::new(config).execute_with_source(&source).await.unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("Mid History,"));
    }

    #[tokio::test]
    async fn test_crawl_command_keyword_filter() {
        let source = MockCatalogue::new(vec![make_listing(&[
            ("Learning Python", "£10.00", "Three"),
            ("Sapiens", "£20.00", "Three"),
            ("Rust in Action", "£30.00", "Three"),
        ])]);
        let mut config = make_test_config();
        config.format = OutputFormat::Csv;
        config.keywords = Some("python RUST".to_string());

        let output = CrawlCommand::new(config).execute_with_source(&source).await.unwrap();
        assert!(output.contains("Learning Python"));
        assert!(output.contains("Rust in Action"));
        assert!(!output.contains("Sapiens"));
    }

    #[tokio::test]
    async fn test_crawl_command_json_format() {
        let source = MockCatalogue::new(vec![make_listing(&[("Sharp Objects", "£47.82", "Four")])]);
        let mut config = make_test_config();
        config.format = OutputFormat::Json;

        let output = CrawlCommand::new(config).execute_with_source(&source).await.unwrap();
        assert!(output.starts_with('['));
        assert!(output.ends_with(']'));
        assert!(!output.contains("DATA SUMMARY"));
    }

    #[tokio::test]
    async fn test_crawl_command_exports() {
        let dir = TempDir::new().unwrap();
        let source = MockCatalogue::new(vec![make_listing(&[("Olio", "£23.88", "One")])]);
        let mut config = make_test_config();
        config.export = true;
        config.output = Some(dir.path().join("books_data"));

        let output = CrawlCommand::new(config).execute_with_source(&source).await.unwrap();
        assert!(dir.path().join("books_data.csv").exists());
        assert!(dir.path().join("books_data.json").exists());
        assert!(dir.path().join("books_data_summary.txt").exists());
        assert!(output.contains("Saved: "));
    }

    #[tokio::test]
    async fn test_crawl_command_clamps_pages() {
        let source = MockCatalogue::new(vec![make_listing(&[("Olio", "£23.88", "One")])]);
        let mut config = make_test_config();
        config.max_pages = 0;

        let output = CrawlCommand::new(config).execute_with_source(&source).await.unwrap();
        assert!(output.contains("Crawl completed: 1 pages"));
        assert_eq!(source.call_count(), 1);
    }
}
