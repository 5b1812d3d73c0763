//! Book catalogue crawling: selectors, record extraction and the page loop.

pub mod crawler;
pub mod models;
pub mod parser;
pub mod selectors;

pub use crawler::{CatalogCrawler, CrawlReport, StopReason};
pub use models::{ProductRecord, Rating};
