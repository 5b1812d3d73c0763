//! catalog-crawler - Sequential book catalogue and news front-page scraper CLI

use anyhow::Result;
use catalog_crawler::catalog::Rating;
use catalog_crawler::commands::{CrawlCommand, NewsCommand};
use catalog_crawler::config::{Config, OutputFormat, MAX_PAGES_LIMIT};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "catalog-crawler",
    version,
    about = "Polite book catalogue and news front-page scraper",
    long_about = "Crawls catalogue listing pages one at a time, analyses and filters the records, \
                  and exports them to CSV, JSON, XLSX and a text summary."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Delay between page fetches in milliseconds
    #[arg(long, global = true, env = "CATALOG_DELAY")]
    delay: Option<u64>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl catalogue listing pages
    #[command(alias = "c")]
    Crawl {
        /// Number of listing pages to crawl
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=MAX_PAGES_LIMIT as i64))]
        pages: Option<u32>,

        /// Base path for exported files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Title keywords, any of which may match (space-separated)
        #[arg(long)]
        keywords: Option<String>,

        /// Minimum price filter
        #[arg(long)]
        min_price: Option<f64>,

        /// Maximum price filter
        #[arg(long)]
        max_price: Option<f64>,

        /// Minimum star rating (One..Five)
        #[arg(long)]
        min_rating: Option<Rating>,

        /// Entries in the most-expensive ranking
        #[arg(long)]
        top: Option<usize>,

        /// Skip writing export files
        #[arg(long)]
        no_export: bool,
    },

    /// Scrape the news front page
    #[command(alias = "n")]
    News {
        /// Base path for the exported CSV (config key `news_output`)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Title keywords, any of which may match (comma-separated)
        #[arg(long, value_delimiter = ',')]
        keywords: Option<Vec<String>>,

        /// Minimum score in points
        #[arg(long)]
        min_score: Option<u32>,

        /// Skip writing export files
        #[arg(long)]
        no_export: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }

    match cli.command {
        Commands::Crawl {
            pages,
            output,
            keywords,
            min_price,
            max_price,
            min_rating,
            top,
            no_export,
        } => {
            if let Some(pages) = pages {
                config.max_pages = pages;
            }
            if output.is_some() {
                config.output = output;
            }
            if keywords.is_some() {
                config.keywords = keywords;
            }
            if min_price.is_some() {
                config.min_price = min_price;
            }
            if max_price.is_some() {
                config.max_price = max_price;
            }
            if min_rating.is_some() {
                config.min_rating = min_rating;
            }
            if let Some(top) = top {
                config.top_n = top;
            }
            if no_export {
                config.export = false;
            }

            let cmd = CrawlCommand::new(config);
            let output = cmd.execute().await?;
            println!("{}", output);
        }

        Commands::News { output, keywords, min_score, no_export } => {
            if output.is_some() {
                config.news_output = output;
            }
            if let Some(kw) = keywords {
                config.news_keywords = kw;
            }
            if min_score.is_some() {
                config.min_score = min_score;
            }
            if no_export {
                config.export = false;
            }

            let cmd = NewsCommand::new(config);
            let output = cmd.execute().await?;
            println!("{}", output);
        }
    }

    Ok(())
}
