//! News front-page scraping: story extraction with fallback strategies.

pub mod analysis;
pub mod models;
pub mod parser;

pub use analysis::NewsAnalysis;
pub use models::NewsItem;
pub use parser::parse_front_page;
