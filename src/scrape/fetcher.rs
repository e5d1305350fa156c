//! Page fetching for the scrape pipeline
//!
//! The fetch capability is a trait seam: "given a target URL, return the
//! page HTML". Production code uses [`HttpFetcher`] backed by a shared
//! `reqwest` client; tests substitute fixture-backed implementations so the
//! structural extraction logic never needs live traffic.

use crate::config::ScrapeConfig;
use crate::{HarvestError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Capability interface for loading a listing page
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Loads the page at `url` and returns its HTML body
    ///
    /// Waiting only for the base document is sufficient; the extraction
    /// step does not depend on asynchronous sub-resources.
    async fn fetch_page(&self, url: &Url) -> Result<String>;
}

/// Production fetcher backed by an HTTP client
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &Url) -> Result<String> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|source| HarvestError::Http {
                url: url.to_string(),
                source,
            })?;

        response.text().await.map_err(|source| HarvestError::Http {
            url: url.to_string(),
            source,
        })
    }
}

/// Builds the HTTP client shared by page fetches and service calls
///
/// # Example
///
/// ```no_run
/// use listing_harvester::config::ScrapeConfig;
/// use listing_harvester::scrape::build_http_client;
///
/// let client = build_http_client(&ScrapeConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &ScrapeConfig) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}
