//! HTTP page fetching.

use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use scraper::Html;
use std::time::Duration;
use tracing::{debug, warn};
use wreq::Client;

/// Source of raw HTML pages - enables mocking for tests.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches a page and returns its body. Non-success statuses are errors.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Plain HTTP fetcher sending a fixed browser-like header set.
pub struct HttpFetcher {
    client: Client,
    user_agent: String,
}

impl HttpFetcher {
    /// Creates a fetcher from the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, user_agent: config.user_agent.clone() })
    }
}

#[async_trait]
impl PageSource for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("User-Agent", self.user_agent.as_str())
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            anyhow::bail!("Request to {} failed with status: {}", url, status);
        }

        response.text().await.context("Failed to read response body")
    }
}

/// Fetches and parses a page, logging and swallowing any failure.
///
/// One attempt per call; callers decide what a missing page means.
pub async fn fetch_document(source: &dyn PageSource, url: &str) -> Option<Html> {
    match source.fetch(url).await {
        Ok(body) => Some(Html::parse_document(&body)),
        Err(e) => {
            warn!("Error fetching {}: {:#}", url, e);
            None
        }
    }
}
