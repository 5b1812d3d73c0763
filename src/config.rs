//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::catalog::models::Rating;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Catalogue served by default.
pub const DEFAULT_BASE_URL: &str = "http://books.toscrape.com";

/// News front page served by default.
pub const DEFAULT_NEWS_URL: &str = "https://news.ycombinator.com";

/// Browser-like User-Agent sent with every request.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Upper bound for `--pages`; the catalogue has fifty listing pages.
pub const MAX_PAGES_LIMIT: u32 = 50;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Catalogue root URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// News front page URL
    #[serde(default = "default_news_url")]
    pub news_url: String,

    /// User-Agent header value
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Politeness delay between page fetches in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Random jitter added to the delay (0 to this value)
    #[serde(default)]
    pub delay_jitter_ms: u64,

    /// Listing pages to crawl
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Base path for exported files, without extension
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Base path for the news CSV, kept apart from the catalogue exports
    #[serde(default)]
    pub news_output: Option<PathBuf>,

    /// Whether to write export files at all
    #[serde(default = "default_export")]
    pub export: bool,

    /// Output format for stdout
    #[serde(default)]
    pub format: OutputFormat,

    /// Currency symbol used in summaries
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Entries in the most-expensive ranking
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Filter: whitespace-separated title keywords, any may match
    #[serde(default)]
    pub keywords: Option<String>,

    /// Filter: minimum price
    #[serde(default)]
    pub min_price: Option<f64>,

    /// Filter: maximum price
    #[serde(default)]
    pub max_price: Option<f64>,

    /// Filter: minimum star rating label
    #[serde(default)]
    pub min_rating: Option<Rating>,

    /// News filter: title keywords, any may match
    #[serde(default)]
    pub news_keywords: Vec<String>,

    /// News filter: minimum points
    #[serde(default)]
    pub min_score: Option<u32>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_news_url() -> String {
    DEFAULT_NEWS_URL.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_max_pages() -> u32 {
    3
}

fn default_export() -> bool {
    true
}

fn default_currency_symbol() -> String {
    "£".to_string()
}

fn default_top_n() -> usize {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            news_url: default_news_url(),
            user_agent: default_user_agent(),
            delay_ms: default_delay_ms(),
            delay_jitter_ms: 0,
            max_pages: default_max_pages(),
            output: None,
            news_output: None,
            export: default_export(),
            format: OutputFormat::Table,
            currency_symbol: default_currency_symbol(),
            top_n: default_top_n(),
            keywords: None,
            min_price: None,
            max_price: None,
            min_rating: None,
            news_keywords: Vec::new(),
            min_score: None,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("catalog-crawler").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(base_url) = std::env::var("CATALOG_BASE_URL") {
            if !base_url.trim().is_empty() {
                self.base_url = base_url;
            }
        }

        if let Ok(user_agent) = std::env::var("CATALOG_USER_AGENT") {
            if !user_agent.trim().is_empty() {
                self.user_agent = user_agent;
            }
        }

        if let Ok(delay) = std::env::var("CATALOG_DELAY") {
            if let Ok(d) = delay.parse() {
                self.delay_ms = d;
            }
        }

        self
    }

    /// Export base path, falling back to the given default name.
    pub fn output_or(&self, default_name: &str) -> PathBuf {
        self.output.clone().unwrap_or_else(|| PathBuf::from(default_name))
    }

    /// News export base path, falling back to the given default name.
    pub fn news_output_or(&self, default_name: &str) -> PathBuf {
        self.news_output.clone().unwrap_or_else(|| PathBuf::from(default_name))
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
