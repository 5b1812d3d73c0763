//! HTML extraction for catalogue listing pages.

use crate::catalog::models::{
    ProductRecord, Rating, AVAILABILITY_UNKNOWN, PRICE_UNAVAILABLE,
};
use crate::catalog::selectors;
use crate::error::ExtractError;
use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html};
use tracing::trace;
use url::Url;

/// Returns every product node of a listing page, in document order.
pub fn product_nodes(document: &Html) -> Vec<ElementRef<'_>> {
    document.select(&selectors::PRODUCT).collect()
}

/// Returns the trimmed `<title>` text of a page.
pub fn page_title(document: &Html) -> Option<String> {
    document
        .select(&selectors::PAGE_TITLE)
        .next()
        .map(|e| collapse_whitespace(&e.text().collect::<String>()))
        .filter(|t| !t.is_empty())
}

/// True when the pager links to another listing page.
pub fn has_next_page(document: &Html) -> bool {
    document.select(&selectors::NEXT_PAGE).next().is_some()
}

/// Extracts one product record from a product node.
///
/// The title link and the price element are required; rating, availability and the
/// link target fall back to their sentinels.
pub fn extract_product(
    node: ElementRef,
    base: &Url,
    page_index: u32,
    captured_at: DateTime<Utc>,
) -> Result<ProductRecord, ExtractError> {
    let link = node.select(&selectors::TITLE_LINK).next().ok_or(ExtractError::MissingTitle)?;

    let title = link
        .value()
        .attr("title")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .unwrap_or_else(|| collapse_whitespace(&link.text().collect::<String>()));

    if title.is_empty() {
        return Err(ExtractError::MissingTitle);
    }

    let href = link.value().attr("href").unwrap_or_default();
    let source_url = base.join(href).map(String::from).unwrap_or_else(|_| base.to_string());

    let price_text = node
        .select(&selectors::PRICE)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string())
        .ok_or(ExtractError::MissingPrice)?;
    let price_text = if price_text.is_empty() { PRICE_UNAVAILABLE.to_string() } else { price_text };
    let price_value = parse_price_value(&price_text);

    let rating = node
        .select(&selectors::STAR_RATING)
        .next()
        .and_then(|e| e.value().classes().find(|c| *c != selectors::STAR_RATING_CLASS))
        .map(Rating::from_label)
        .unwrap_or(Rating::Unrated);

    let availability = node
        .select(&selectors::AVAILABILITY)
        .next()
        .map(|e| collapse_whitespace(&e.text().collect::<String>()))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| AVAILABILITY_UNKNOWN.to_string());

    trace!("Extracted product: {} - {}", title, price_text);

    Ok(ProductRecord {
        title,
        price_text,
        price_value,
        rating,
        availability,
        source_url,
        page_index,
        captured_at,
    })
}

/// Parses the numeric value of a price text.
///
/// Everything but ASCII digits and `.` is dropped before parsing. The unavailable
/// sentinel and anything unparsable yield `0.0`.
pub fn parse_price_value(text: &str) -> f64 {
    if text.trim() == PRICE_UNAVAILABLE {
        return 0.0;
    }

    let cleaned: String = text.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => 0.0,
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
