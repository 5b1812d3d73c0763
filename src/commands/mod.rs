//! CLI command implementations.

pub mod crawl;
pub mod news;

pub use crawl::CrawlCommand;
pub use news::NewsCommand;
