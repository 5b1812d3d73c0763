//! catalog-crawler - Sequential book catalogue and news front-page scraper
//!
//! Crawls listing pages politely, extracts typed records, analyses and filters
//! them, and exports CSV, JSON, spreadsheet and summary files.

pub mod analysis;
pub mod catalog;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod filters;
pub mod format;
pub mod news;

pub use analysis::Analysis;
pub use catalog::{ProductRecord, Rating};
pub use config::Config;
pub use error::{ExportError, ExtractError};
pub use news::NewsItem;
