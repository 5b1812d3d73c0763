//! Multi-page catalogue crawl.

use crate::catalog::models::ProductRecord;
use crate::catalog::parser;
use crate::client::{fetch_document, PageSource};
use crate::config::Config;
use anyhow::{Context, Result};
use chrono::Utc;
use rand::Rng;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Why a crawl ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every requested page was crawled.
    Completed,
    /// A page could not be fetched; earlier pages are kept.
    FetchFailed { page: u32 },
    /// A page had no product nodes; earlier pages are kept.
    EmptyListing { page: u32 },
}

impl StopReason {
    /// True when the crawl ended before the requested page count.
    pub fn is_partial(&self) -> bool {
        !matches!(self, StopReason::Completed)
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Completed => write!(f, "completed"),
            StopReason::FetchFailed { page } => write!(f, "stopped at page {}: fetch failed", page),
            StopReason::EmptyListing { page } => {
                write!(f, "stopped at page {}: no products found", page)
            }
        }
    }
}

/// Outcome of a crawl pass.
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Records in page order, then document order
    pub records: Vec<ProductRecord>,
    /// Pages that contributed records
    pub pages_crawled: u32,
    /// How the loop ended
    pub stop: StopReason,
}

/// Walks the catalogue listing pages one at a time.
pub struct CatalogCrawler<'a> {
    source: &'a dyn PageSource,
    base_url: String,
    base: Url,
    delay_ms: u64,
    delay_jitter_ms: u64,
}

impl<'a> CatalogCrawler<'a> {
    /// Creates a crawler over the configured catalogue.
    pub fn new(config: &Config, source: &'a dyn PageSource) -> Result<Self> {
        let base = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid catalogue URL: {}", config.base_url))?;

        Ok(Self {
            source,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            base,
            delay_ms: config.delay_ms,
            delay_jitter_ms: config.delay_jitter_ms,
        })
    }

    /// URL of a listing page: the bare root for page 1, the page template after that.
    pub fn page_url(&self, page: u32) -> String {
        if page <= 1 {
            self.base_url.clone()
        } else {
            format!("{}/catalogue/page-{}.html", self.base_url, page)
        }
    }

    /// Crawls pages `1..=max_pages`, stopping early on a failed or empty page.
    pub async fn crawl(&self, max_pages: u32) -> CrawlReport {
        info!("Starting crawl of {} pages", max_pages);

        let mut collected: Vec<ProductRecord> = Vec::new();
        let mut pages_crawled = 0;
        let mut stop = StopReason::Completed;
        let mut current_page = 1;

        while current_page <= max_pages {
            let url = self.page_url(current_page);
            info!("Processing page {}", current_page);

            let Some(document) = fetch_document(self.source, &url).await else {
                warn!("Stopping crawl: page {} could not be fetched", current_page);
                stop = StopReason::FetchFailed { page: current_page };
                break;
            };

            if current_page == 1 {
                if let Some(title) = parser::page_title(&document) {
                    info!("Connected to catalogue: {}", title);
                }
            }

            let page_records = {
                let nodes = parser::product_nodes(&document);
                if nodes.is_empty() {
                    warn!("Stopping crawl: no products found on page {}", current_page);
                    stop = StopReason::EmptyListing { page: current_page };
                    break;
                }

                let captured_at = Utc::now();
                let mut page_records = Vec::with_capacity(nodes.len());
                for node in nodes {
                    match parser::extract_product(node, &self.base, current_page, captured_at) {
                        Ok(record) => page_records.push(record),
                        Err(e) => debug!("Skipping product on page {}: {}", current_page, e),
                    }
                }

                if !parser::has_next_page(&document) {
                    debug!("Page {} has no next-page link", current_page);
                }

                page_records
            };
            drop(document);

            info!("Extracted {} products from page {}", page_records.len(), current_page);
            collected.extend(page_records);
            pages_crawled += 1;

            self.pause().await;
            current_page += 1;
        }

        info!("Crawl finished: {} records from {} pages", collected.len(), pages_crawled);

        CrawlReport { records: collected, pages_crawled, stop }
    }

    /// Politeness delay between page fetches.
    async fn pause(&self) {
        if self.delay_ms == 0 && self.delay_jitter_ms == 0 {
            return;
        }

        let jitter = if self.delay_jitter_ms > 0 {
            rand::rng().random_range(0..=self.delay_jitter_ms)
        } else {
            0
        };

        let total_delay = self.delay_ms + jitter;
        debug!("Delaying {}ms", total_delay);
        tokio::time::sleep(Duration::from_millis(total_delay)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock page source keyed by URL; unknown URLs fail like a 404.
    struct MockSource {
        pages: HashMap<String, String>,
        requested: Mutex<Vec<String>>,
    }

    impl MockSource {
        fn new(pages: Vec<(String, String)>) -> Self {
            Self { pages: pages.into_iter().collect(), requested: Mutex::new(Vec::new()) }
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageSource for MockSource {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.requested.lock().unwrap().push(url.to_string());
            match self.pages.get(url) {
                Some(body) => Ok(body.clone()),
                None => anyhow::bail!("Request to {} failed with status: 404 Not Found", url),
            }
        }
    }

    const BASE: &str = "http://books.test";

    fn make_test_config() -> Config {
        Config { base_url: BASE.to_string(), delay_ms: 0, ..Config::default() }
    }

    fn listing(products: &[(&str, &str, &str)]) -> String {
        let mut html = String::from("<html><body><ol class=\"row\">");
        for (title, price, rating) in products {
            html.push_str(&format!(
                r#"<li><article class="product_pod">
                    <p class="star-rating {rating}"></p>
                    <h3><a href="catalogue/{slug}/index.html" title="{title}">{title}</a></h3>
                    <p class="price_color">{price}</p>
                    <p class="instock availability">In stock</p>
                </article></li>"#,
                rating = rating,
                slug = title.to_lowercase().replace(' ', "-"),
                title = title,
                price = price,
            ));
        }
        html.push_str("</ol></body></html>");
        html
    }

    fn page(n: u32) -> String {
        if n == 1 {
            BASE.to_string()
        } else {
            format!("{}/catalogue/page-{}.html", BASE, n)
        }
    }

    #[test]
    fn test_page_url() {
        let source = MockSource::new(Vec::new());
        let config = Config { base_url: "http://books.test/".to_string(), ..make_test_config() };
        let crawler = CatalogCrawler::new(&config, &source).unwrap();

        assert_eq!(crawler.page_url(1), "http://books.test");
        assert_eq!(crawler.page_url(2), "http://books.test/catalogue/page-2.html");
        assert_eq!(crawler.page_url(50), "http://books.test/catalogue/page-50.html");
    }

    #[test]
    fn test_invalid_base_url() {
        let source = MockSource::new(Vec::new());
        let config = Config { base_url: "not a url".to_string(), ..make_test_config() };
        let err = CatalogCrawler::new(&config, &source).err().unwrap();
        assert!(err.to_string().contains("Invalid catalogue URL"));
    }

    #[tokio::test]
    async fn test_crawl_all_pages_in_order() {
        let source = MockSource::new(vec![
            (page(1), listing(&[("A", "£10.00", "One"), ("B", "£20.00", "Two")])),
            (page(2), listing(&[("C", "£30.00", "Three")])),
            (page(3), listing(&[("D", "£40.00", "Four"), ("E", "£50.00", "Five")])),
        ]);
        let crawler = CatalogCrawler::new(&make_test_config(), &source).unwrap();

        let report = crawler.crawl(3).await;
        assert_eq!(report.stop, StopReason::Completed);
        assert!(!report.stop.is_partial());
        assert_eq!(report.stop.to_string(), "completed");
        assert_eq!(report.pages_crawled, 3);

        let pages: Vec<u32> = report.records.iter().map(|r| r.page_index).collect();
        assert_eq!(pages, vec![1, 1, 2, 3, 3]);

        let titles: Vec<&str> = report.records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C", "D", "E"]);

        assert_eq!(source.requested(), vec![page(1), page(2), page(3)]);
    }

    #[tokio::test]
    async fn test_crawl_stops_on_fetch_failure() {
        let source = MockSource::new(vec![
            (page(1), listing(&[("A", "£10.00", "One")])),
            (page(3), listing(&[("C", "£30.00", "Three")])),
        ]);
        let crawler = CatalogCrawler::new(&make_test_config(), &source).unwrap();

        let report = crawler.crawl(3).await;
        assert_eq!(report.stop, StopReason::FetchFailed { page: 2 });
        assert!(report.stop.is_partial());
        assert_eq!(report.stop.to_string(), "stopped at page 2: fetch failed");
        assert_eq!(report.pages_crawled, 1);
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].title, "A");

        // No retry and no skipping ahead
        assert_eq!(source.requested(), vec![page(1), page(2)]);
    }

    #[tokio::test]
    async fn test_crawl_stops_on_empty_listing() {
        let source = MockSource::new(vec![
            (page(1), listing(&[("A", "£10.00", "One")])),
            (page(2), listing(&[("B", "£20.00", "Two")])),
            (page(3), "<html><body><ol class=\"row\"></ol></body></html>".to_string()),
            (page(4), listing(&[("D", "£40.00", "Four")])),
        ]);
        let crawler = CatalogCrawler::new(&make_test_config(), &source).unwrap();

        let report = crawler.crawl(5).await;
        assert_eq!(report.stop, StopReason::EmptyListing { page: 3 });
        assert_eq!(report.pages_crawled, 2);
        assert_eq!(report.records.len(), 2);
        assert_eq!(source.requested().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_crawl_pauses_after_each_page() {
        let source = MockSource::new(vec![
            (page(1), listing(&[("A", "£10.00", "One")])),
            (page(2), listing(&[("B", "£20.00", "Two")])),
            (page(3), listing(&[("C", "£30.00", "Three")])),
        ]);
        let config = Config { delay_ms: 60, ..make_test_config() };
        let crawler = CatalogCrawler::new(&config, &source).unwrap();

        let start = tokio::time::Instant::now();
        let report = crawler.crawl(3).await;

        let elapsed = start.elapsed();
        assert_eq!(report.pages_crawled, 3);
        assert!(elapsed >= Duration::from_millis(180), "elapsed {:?}", elapsed);
        assert!(elapsed < Duration::from_millis(190), "elapsed {:?}", elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_crawl_pause_includes_jitter() {
        let source = MockSource::new(vec![
            (page(1), listing(&[("A", "£10.00", "One")])),
            (page(2), listing(&[("B", "£20.00", "Two")])),
        ]);
        let config = Config { delay_ms: 100, delay_jitter_ms: 50, ..make_test_config() };
        let crawler = CatalogCrawler::new(&config, &source).unwrap();

        let start = tokio::time::Instant::now();
        crawler.crawl(2).await;

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(200), "elapsed {:?}", elapsed);
        assert!(elapsed < Duration::from_millis(310), "elapsed {:?}", elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_crawl_no_pause_after_failed_page() {
        let source = MockSource::new(vec![(page(1), listing(&[("A", "£10.00", "One")]))]);
        let config = Config { delay_ms: 100, ..make_test_config() };
        let crawler = CatalogCrawler::new(&config, &source).unwrap();

        let start = tokio::time::Instant::now();
        let report = crawler.crawl(3).await;

        let elapsed = start.elapsed();
        assert_eq!(report.stop, StopReason::FetchFailed { page: 2 });
        assert!(elapsed >= Duration::from_millis(100), "elapsed {:?}", elapsed);
        assert!(elapsed < Duration::from_millis(110), "elapsed {:?}", elapsed);
    }

    #[tokio::test]
    async fn test_crawl_first_page_fails() {
        let source = MockSource::new(Vec::new());
        let crawler = CatalogCrawler::new(&make_test_config(), &source).unwrap();

        let report = crawler.crawl(3).await;
        assert_eq!(report.stop, StopReason::FetchFailed { page: 1 });
        assert!(report.records.is_empty());
        assert_eq!(report.pages_crawled, 0);
    }

    #[tokio::test]
    async fn test_crawl_skips_malformed_products() {
        let mut html = listing(&[("A", "£10.00", "One"), ("B", "£20.00", "Two")]);
        html = html.replace(
            "</ol>",
            r#"<li><article class="product_pod"><p class="price_color">£5.00</p></article></li></ol>"#,
        );
        let source = MockSource::new(vec![(page(1), html)]);
        let crawler = CatalogCrawler::new(&make_test_config(), &source).unwrap();

        let report = crawler.crawl(1).await;
        assert_eq!(report.stop, StopReason::Completed);
        assert_eq!(report.records.len(), 2);
    }

    #[tokio::test]
    async fn test_crawl_price_values() {
        let source = MockSource::new(vec![(
            page(1),
            listing(&[("A", "£51.77", "Three"), ("B", "£53.74", "One"), ("C", "N/A", "Two")]),
        )]);
        let crawler = CatalogCrawler::new(&make_test_config(), &source).unwrap();

        let report = crawler.crawl(1).await;
        let values: Vec<f64> = report.records.iter().map(|r| r.price_value).collect();
        assert_eq!(values, vec![51.77, 53.74, 0.0]);
    }

    #[tokio::test]
    async fn test_crawl_resolves_urls_against_base() {
        let source = MockSource::new(vec![(page(1), listing(&[("Sharp Objects", "£47.82", "Four")]))]);
        let crawler = CatalogCrawler::new(&make_test_config(), &source).unwrap();

        let report = crawler.crawl(1).await;
        assert_eq!(
            report.records[0].source_url,
            "http://books.test/catalogue/sharp-objects/index.html"
        );
    }
}
