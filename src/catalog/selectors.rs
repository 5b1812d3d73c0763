//! CSS selectors for catalogue listing pages.
//!
//! Update this file when the catalogue markup changes.

use scraper::Selector;
use std::sync::LazyLock;

/// One product card in a listing.
pub static PRODUCT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("article.product_pod").unwrap());

/// Title link; carries the full title in its `title` attribute.
pub static TITLE_LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h3 > a").unwrap());

/// Price as displayed, e.g. `£51.77`.
pub static PRICE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p.price_color").unwrap());

/// Star rating; the second class word is the label (`star-rating Three`).
pub static STAR_RATING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p.star-rating").unwrap());

/// Stock line.
pub static AVAILABILITY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p.instock.availability").unwrap());

/// Document title.
pub static PAGE_TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());

/// Pager link to the next listing page.
pub static NEXT_PAGE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("li.next > a").unwrap());

/// Class marking the rating element.
pub const STAR_RATING_CLASS: &str = "star-rating";
