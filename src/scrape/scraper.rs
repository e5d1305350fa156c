//! Seller listing scrape loop
//!
//! Derives a working URL from the seller storefront URL by forcing the
//! newest-first sort order, then walks exactly three result pages and
//! concatenates the extracted rows in page order.

use crate::record::ListingRecord;
use crate::scrape::extract::extract_listings;
use crate::scrape::fetcher::PageFetcher;
use crate::Result;
use url::Url;

/// Sort-order query parameter and its "newly listed" value
const SORT_PARAM: &str = "_sop";
const SORT_NEWEST_FIRST: &str = "10";

/// Page-number query parameter
const PAGE_PARAM: &str = "_pgn";

/// The fixed set of result pages fetched per seller, in fetch order
pub const LISTING_PAGES: [u32; 3] = [1, 2, 3];

/// Scrapes all listing pages for one seller
///
/// Always issues exactly three page fetches (pages 1 through 3) regardless
/// of how many items each page yields; there is no early termination and no
/// dynamic page-count detection. Results are concatenated in page order,
/// preserving document order within each page.
pub async fn scrape_seller(
    fetcher: &dyn PageFetcher,
    seller_url: &Url,
) -> Result<Vec<ListingRecord>> {
    let mut records = Vec::new();

    for page in LISTING_PAGES {
        let page_url = listing_page_url(seller_url, page);
        tracing::info!("Scraping URL: {}", page_url);

        let html = fetcher.fetch_page(&page_url).await?;
        let page_records = extract_listings(&html, &page_url);

        tracing::debug!("Page {} yielded {} listings", page, page_records.len());
        records.extend(page_records);
    }

    Ok(records)
}

/// Builds the working URL for one result page
///
/// Any existing sort-order or page-number parameters on the seller URL are
/// replaced; all other query parameters are preserved as configured.
pub fn listing_page_url(seller_url: &Url, page: u32) -> Url {
    let mut url = seller_url.clone();

    let retained: Vec<(String, String)> = seller_url
        .query_pairs()
        .filter(|(key, _)| key != SORT_PARAM && key != PAGE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair(SORT_PARAM, SORT_NEWEST_FIRST)
        .append_pair(PAGE_PARAM, &page.to_string());

    url
}
