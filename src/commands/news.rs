//! News front-page command implementation.

use super::crawl::describe_exports;
use crate::client::{HttpFetcher, PageSource};
use crate::config::{Config, OutputFormat};
use crate::export::Exporter;
use crate::extract::PageContext;
use crate::filters::FilterChainBuilder;
use crate::format::Formatter;
use crate::news::{parse_front_page, NewsAnalysis, NewsItem};
use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use url::Url;

/// Default export base name for stories.
pub const DEFAULT_OUTPUT: &str = "hacker_news";

/// Scrapes the configured news front page.
pub struct NewsCommand {
    config: Config,
}

impl NewsCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the scrape and returns formatted output.
    pub async fn execute(&self) -> Result<String> {
        let fetcher = HttpFetcher::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_source(&fetcher).await
    }

    /// Executes the scrape against a provided page source (for testing).
    pub async fn execute_with_source(&self, source: &dyn PageSource) -> Result<String> {
        let front_page = Url::parse(&self.config.news_url)
            .with_context(|| format!("Invalid news URL: {}", self.config.news_url))?;
        let formatter = Formatter::new(self.config.format);

        info!("Fetching front page {}", front_page);
        let body = match source.fetch(front_page.as_str()).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Could not fetch front page: {:#}", e);
                return Ok(formatter.format_news(&[]));
            }
        };

        let context = PageContext::new(front_page.clone());
        let items = parse_front_page(&body, &context);
        info!("Extracted {} stories", items.len());

        let analysis = NewsAnalysis::from_items(&items, &front_page);

        let filters = FilterChainBuilder::<NewsItem>::new()
            .keywords(self.config.news_keywords.clone())
            .min_score(self.config.min_score)
            .build();
        if !filters.is_empty() {
            debug!("Active filters: {}", filters.descriptions().join(", "));
        }
        let matching = filters.apply(&items);

        let exports = if self.config.export {
            Some(Exporter::new(self.config.news_output_or(DEFAULT_OUTPUT)).export_csv(&items))
        } else {
            debug!("Export disabled");
            None
        };

        let mut output = formatter.format_news(&matching);

        if matches!(self.config.format, OutputFormat::Table | OutputFormat::Markdown) {
            output.push_str("\n\n");
            output.push_str(analysis.summary_text().trim_end());
            if let Some(exports) = &exports {
                output.push_str(&describe_exports(exports));
            }
        }

        Ok(output)
    }
}
