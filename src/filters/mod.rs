//! Record filtering with composable predicates.

pub mod keyword;
pub mod price;
pub mod rating;
pub mod score;

use crate::catalog::models::{ProductRecord, Rating};
use crate::config::Config;
use crate::news::NewsItem;
use std::marker::PhantomData;

pub use keyword::KeywordFilter;
pub use price::PriceFilter;
pub use rating::RatingFilter;
pub use score::ScoreFilter;

/// Items with a headline that keyword filters can search.
pub trait Titled {
    fn title(&self) -> &str;
}

impl Titled for ProductRecord {
    fn title(&self) -> &str {
        &self.title
    }
}

impl Titled for NewsItem {
    fn title(&self) -> &str {
        &self.title
    }
}

/// Trait for filtering items.
pub trait Filter<T>: Send + Sync {
    /// Returns true if the item passes the filter.
    fn matches(&self, item: &T) -> bool;

    /// Returns a description of this filter.
    fn description(&self) -> String;
}

/// A chain of filters that must all pass.
pub struct FilterChain<T> {
    filters: Vec<Box<dyn Filter<T>>>,
}

impl<T> FilterChain<T> {
    /// Creates an empty filter chain.
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Adds a filter to the chain.
    pub fn add(&mut self, filter: impl Filter<T> + 'static) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Checks if an item passes all filters.
    pub fn matches(&self, item: &T) -> bool {
        self.filters.iter().all(|f| f.matches(item))
    }

    /// Returns the matching items as a new collection; the source is left as is.
    pub fn apply(&self, items: &[T]) -> Vec<T>
    where
        T: Clone,
    {
        items.iter().filter(|i| self.matches(i)).cloned().collect()
    }

    /// Returns true if no filters are configured.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns the number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns descriptions of all filters.
    pub fn descriptions(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.description()).collect()
    }
}

impl<T> Default for FilterChain<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a FilterChain from optional settings.
pub struct FilterChainBuilder<T> {
    chain: FilterChain<T>,
    _item: PhantomData<fn(&T)>,
}

impl<T: Titled + 'static> FilterChainBuilder<T> {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self { chain: FilterChain::new(), _item: PhantomData }
    }

    /// Adds a filter on whitespace-separated title keywords, any of which may match.
    pub fn keyword_phrase(mut self, phrase: Option<&str>) -> Self {
        if let Some(phrase) = phrase {
            let filter = KeywordFilter::from_phrase(phrase);
            if !filter.is_empty() {
                self.chain.add(filter);
            }
        }
        self
    }

    /// Adds a filter on a keyword list, any of which may match.
    pub fn keywords(mut self, keywords: Vec<String>) -> Self {
        if !keywords.is_empty() {
            self.chain.add(KeywordFilter::any(keywords));
        }
        self
    }

    /// Builds the filter chain.
    pub fn build(self) -> FilterChain<T> {
        self.chain
    }
}

impl<T: Titled + 'static> Default for FilterChainBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterChainBuilder<ProductRecord> {
    /// Adds a price range filter.
    pub fn price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        if min.is_some() || max.is_some() {
            self.chain.add(PriceFilter::new(min, max));
        }
        self
    }

    /// Adds a minimum rating filter.
    pub fn min_rating(mut self, min: Option<Rating>) -> Self {
        if let Some(min) = min {
            self.chain.add(RatingFilter::new(min));
        }
        self
    }
}

impl FilterChainBuilder<NewsItem> {
    /// Adds a minimum score filter.
    pub fn min_score(mut self, min: Option<u32>) -> Self {
        if let Some(min) = min {
            self.chain.add(ScoreFilter::new(min));
        }
        self
    }
}

/// Optional record predicates, applied together. Absent options impose nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub keywords: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<Rating>,
}

impl FilterCriteria {
    /// Reads the record filter settings from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            keywords: config.keywords.clone(),
            min_price: config.min_price,
            max_price: config.max_price,
            min_rating: config.min_rating,
        }
    }

    /// Builds the matching filter chain.
    pub fn build(&self) -> FilterChain<ProductRecord> {
        FilterChainBuilder::new()
            .keyword_phrase(self.keywords.as_deref())
            .price_range(self.min_price, self.max_price)
            .min_rating(self.min_rating)
            .build()
    }

    /// Filters records, returning the matching subset in order.
    pub fn apply(&self, records: &[ProductRecord]) -> Vec<ProductRecord> {
        self.build().apply(records)
    }
}
