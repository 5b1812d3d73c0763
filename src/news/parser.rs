//! Story extraction for a news front page.

use super::models::NewsItem;
use crate::extract::{first_non_empty, PageContext, Strategy};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

// Selectors for the front-page table layout
mod selectors {
    use super::*;

    pub static STORY_ROW: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("tr.athing").unwrap());

    pub static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

    pub static SCORE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span.score").unwrap());

    pub static ITEM_LINK: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("a[href*='item?id=']").unwrap());
}

/// Fallback link scan keeps at most this many stories.
pub const LINK_SCAN_LIMIT: usize = 20;

const STRATEGIES: [(&str, Strategy<NewsItem>); 2] =
    [("story rows", story_rows), ("link scan", story_links)];

/// Parses a front page, trying the row layout first and a plain link scan second.
pub fn parse_front_page(html: &str, context: &PageContext) -> Vec<NewsItem> {
    let document = Html::parse_document(html);
    let items = first_non_empty(&document, context, &STRATEGIES);
    debug!("Parsed {} stories", items.len());
    items
}

/// Stories from `tr.athing` rows, with score and comments from the following row.
pub fn story_rows(document: &Html, context: &PageContext) -> Vec<NewsItem> {
    let mut items = Vec::new();

    for row in document.select(&selectors::STORY_ROW) {
        let Some((title, href)) = row.select(&selectors::LINK).find_map(|link| {
            let text = trimmed_text(link);
            (text.chars().count() > 5).then(|| (text, link.value().attr("href").unwrap_or_default()))
        }) else {
            continue;
        };

        let mut item = NewsItem::new(title, context.absolute(href), context.captured_at);

        if let Some(subtext) = next_row(row) {
            item.score = subtext
                .select(&selectors::SCORE)
                .next()
                .map(trimmed_text)
                .filter(|t| !t.is_empty());

            item.comments = subtext
                .select(&selectors::ITEM_LINK)
                .map(trimmed_text)
                .find(|t| {
                    let lower = t.to_lowercase();
                    lower.contains("comment") || lower.contains("discuss")
                });
        }

        items.push(item);
    }

    items
}

/// Stories from every link that looks like a headline.
pub fn story_links(document: &Html, context: &PageContext) -> Vec<NewsItem> {
    document
        .select(&selectors::LINK)
        .filter_map(|link| {
            let href = link.value().attr("href").unwrap_or_default();
            let text = trimmed_text(link);
            looks_like_story(href, &text)
                .then(|| NewsItem::new(text, context.absolute(href), context.captured_at))
        })
        .take(LINK_SCAN_LIMIT)
        .collect()
}

/// True for links with a headline-length text that do not point at site navigation.
pub fn looks_like_story(href: &str, text: &str) -> bool {
    !href.is_empty()
        && text.chars().count() > 10
        && !href.starts_with('#')
        && !href.starts_with("javascript:")
        && !href.contains("item?id=")
        && !href.contains("user?id=")
        && !href.contains("show")
}

fn next_row(row: ElementRef) -> Option<ElementRef> {
    row.next_siblings().filter_map(ElementRef::wrap).find(|e| e.value().name() == "tr")
}

fn trimmed_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}


    #[test]
    fn test_story_links_limit() {
        let html: String = (0..30)
            .map(|i| format!(r#"<a href="https://example.org/{i}">Headline number {i} here</a>"#))
            .collect();
        let document = Html::parse_document(&html);
        assert_eq!(story_links(&document, &context()).len(), LINK_SCAN_LIMIT);
    }

    #[test]
    fn test_parse_front_page_prefers_rows() {
        let items = parse_front_page(FRONT_PAGE, &context());
        assert_eq!(items.len(), 2);
        assert!(items[0].score.is_some());
    }

    #[test]
    fn test_parse_front_page_falls_back_to_links() {
        let html = r#"<div><a href="https://example.org/story">A perfectly good story headline</a></div>"#;
        let items = parse_front_page(html, &context());
        assert_eq!(items.len(), 1);
        assert!(items[0].score.is_none());
    }

    #[test]
    fn test_parse_front_page_nothing() {
        assert!(parse_front_page("<html></html>", &context()).is_empty());
    }
}
