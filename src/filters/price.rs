//! Price range filter.

use super::Filter;
use crate::catalog::models::ProductRecord;

/// Filters records by inclusive bounds on the numeric price.
///
/// Unpriced records count as `0.0`, so they pass a maximum and fail a positive minimum.
pub struct PriceFilter {
    min: Option<f64>,
    max: Option<f64>,
}

impl PriceFilter {
    /// Creates a new price filter with optional min/max bounds.
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// Creates a filter with only minimum price.
    pub fn min(price: f64) -> Self {
        Self { min: Some(price), max: None }
    }

    /// Creates a filter with only maximum price.
    pub fn max(price: f64) -> Self {
        Self { min: None, max: Some(price) }
    }

    /// Creates a filter with both min and max.
    pub fn range(min: f64, max: f64) -> Self {
        Self { min: Some(min), max: Some(max) }
    }
}

impl Filter<ProductRecord> for PriceFilter {
    fn matches(&self, record: &ProductRecord) -> bool {
        let price = record.price_value;

        if let Some(min) = self.min {
            if price < min {
                return false;
            }
        }

        if let Some(max) = self.max {
            if price > max {
                return false;
            }
        }

        true
    }

    fn description(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("Price: {:.2} - {:.2}", min, max),
            (Some(min), None) => format!("Price: >= {:.2}", min),
            (None, Some(max)) => format!("Price: <= {:.2}", max),
            (None, None) => "Price: any".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::Rating;
    use chrono::Utc;

    fn make_record(price_value: f64) -> ProductRecord {
        ProductRecord {
            title: "Test".to_string(),
            price_text: format!("£{:.2}", price_value),
            price_value,
            rating: Rating::Three,
            availability: "In stock".to_string(),
            source_url: "http://books.toscrape.com/catalogue/test/index.html".to_string(),
            page_index: 1,
            captured_at: Utc::now(),
        }
    }

    #[test]
    fn test_price_range() {
        let filter = PriceFilter::range(10.0, 50.0);

        assert!(!filter.matches(&make_record(5.0)));
        assert!(filter.matches(&make_record(10.0)));
        assert!(filter.matches(&make_record(30.0)));
        assert!(filter.matches(&make_record(50.0)));
        assert!(!filter.matches(&make_record(55.0)));
    }

    #[test]
    fn test_unpriced_record() {
        assert!(PriceFilter::max(10.0).matches(&make_record(0.0)));
        assert!(!PriceFilter::min(0.01).matches(&make_record(0.0)));
    }

    #[test]
    fn test_min_only() {
        let filter = PriceFilter::min(20.0);
        assert!(!filter.matches(&make_record(10.0)));
        assert!(filter.matches(&make_record(20.0)));
        assert!(filter.matches(&make_record(100.0)));
    }

    #[test]
    fn test_max_only() {
        let filter = PriceFilter::max(50.0);
        assert!(filter.matches(&make_record(10.0)));
        assert!(filter.matches(&make_record(50.0)));
        assert!(!filter.matches(&make_record(100.0)));
    }

    #[test]
    fn test_new_no_bounds() {
        let filter = PriceFilter::new(None, None);
        assert!(filter.matches(&make_record(0.0)));
        assert!(filter.matches(&make_record(1000000.0)));
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(PriceFilter::range(10.0, 50.0).description(), "Price: 10.00 - 50.00");
        assert_eq!(PriceFilter::min(20.0).description(), "Price: >= 20.00");
        assert_eq!(PriceFilter::max(50.0).description(), "Price: <= 50.00");
        assert_eq!(PriceFilter::new(None, None).description(), "Price: any");
    }

    #[test]
    fn test_boundary_values() {
        let filter = PriceFilter::range(10.0, 50.0);
        assert!(!filter.matches(&make_record(9.99)));
        assert!(!filter.matches(&make_record(50.01)));
    }
}
