//! Structural extraction of listing rows from rendered HTML
//!
//! Extraction operates on HTML text so it can be exercised against fixture
//! documents without any network traffic. The expected structure is a
//! repeated listing-row element, each optionally containing a title element,
//! a price element, a detail-link element, and an info element whose text
//! contains a relative-date substring.

use crate::record::ListingRecord;
use crate::scrape::timestamp::normalize_start_date;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

/// Case-insensitive "new listing" badge marker embedded in title text
static BADGE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)new listing").ok());

/// Compiled selectors for the listing-row structure
struct RowSelectors {
    row: Selector,
    title: Selector,
    price: Selector,
    link: Selector,
    info: Selector,
}

static SELECTORS: LazyLock<Option<RowSelectors>> = LazyLock::new(|| {
    Some(RowSelectors {
        row: Selector::parse(".s-item").ok()?,
        title: Selector::parse(".s-item__title").ok()?,
        price: Selector::parse(".s-item__price").ok()?,
        link: Selector::parse(".s-item__link").ok()?,
        info: Selector::parse(".s-item__info").ok()?,
    })
});

/// Extracts every complete listing row from a rendered page, in document order
///
/// Rows missing a title or a detail link are skipped entirely; no partial
/// record is emitted. Detail-link hrefs are resolved against `base_url` so
/// every emitted record carries an absolute URL.
pub fn extract_listings(html: &str, base_url: &Url) -> Vec<ListingRecord> {
    let Some(selectors) = SELECTORS.as_ref() else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let mut records = Vec::new();

    for row in document.select(&selectors.row) {
        let Some(title) = row
            .select(&selectors.title)
            .next()
            .map(|e| clean_title(&element_text(&e)))
            .filter(|t| !t.is_empty())
        else {
            continue;
        };

        let Some(url) = row
            .select(&selectors.link)
            .next()
            .and_then(|e| e.value().attr("href"))
            .and_then(|href| resolve_detail_url(href, base_url))
        else {
            continue;
        };

        let price = row
            .select(&selectors.price)
            .next()
            .map(|e| element_text(&e))
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| ListingRecord::NOT_AVAILABLE.to_string());

        let start_date = row
            .select(&selectors.info)
            .next()
            .map(|e| normalize_start_date(&element_text(&e)))
            .unwrap_or_else(|| ListingRecord::NOT_AVAILABLE.to_string());

        records.push(ListingRecord {
            start_date,
            title,
            price,
            url,
        });
    }

    records
}

/// Collects the visible text of an element, whitespace-trimmed
fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Strips the "new listing" badge marker from a title, then trims
///
/// The marker is matched case-insensitively anywhere in the text; a title
/// without the marker is unchanged apart from trimming.
pub fn clean_title(raw: &str) -> String {
    let trimmed = raw.trim();
    match BADGE_PATTERN.as_ref() {
        Some(pattern) => pattern.replace(trimmed, "").trim().to_string(),
        None => trimmed.to_string(),
    }
}

/// Resolves a detail-link href to an absolute HTTP(S) URL
fn resolve_detail_url(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute.to_string())
        }
        _ => None,
    }
}
