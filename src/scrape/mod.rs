//! Scrape pipeline for seller listing pages
//!
//! This module contains the page-fetch capability seam, the structural
//! extraction of listing rows, timestamp normalization, and the
//! three-page scrape loop.

mod extract;
mod fetcher;
mod scraper;
mod timestamp;

pub use extract::{clean_title, extract_listings};
pub use fetcher::{build_http_client, HttpFetcher, PageFetcher};
pub use scraper::{listing_page_url, scrape_seller, LISTING_PAGES};
pub use timestamp::normalize_start_date;
