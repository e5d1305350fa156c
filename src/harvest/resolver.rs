//! Seller URL resolution against the external service
//!
//! Each sheet stores the storefront URL of the seller it tracks; the
//! external service exposes it through a plain-text read endpoint.

use crate::config::ServiceConfig;
use reqwest::Client;
use url::Url;

/// Literal substring in a response body that signals a lookup error
const ERROR_INDICATOR: &str = "Error";

/// URL-scheme prefix a valid response body must start with
const SCHEME_PREFIX: &str = "http";

/// Resolves the seller storefront URL configured for a sheet
///
/// Issues a single read request parameterized by the sheet identifier. Any
/// failure (transport error, error indicator in the body, a body that does
/// not look like a URL) yields `None` rather than an error; the caller is
/// expected to skip the sheet. There is no retry.
pub async fn resolve_seller_url(
    client: &Client,
    service: &ServiceConfig,
    sheet: &str,
) -> Option<Url> {
    let response = match client
        .get(&service.read_url)
        .query(&[("sheetName", sheet)])
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Seller URL request for {} failed: {}", sheet, e);
            return None;
        }
    };

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("Seller URL response for {} unreadable: {}", sheet, e);
            return None;
        }
    };

    tracing::debug!("Seller URL response for {}: {}", sheet, body);

    let candidate = parse_seller_response(&body)?;

    match Url::parse(&candidate) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::warn!("Seller URL for {} is malformed ({}): {}", sheet, e, candidate);
            None
        }
    }
}

/// Validates a raw response body and returns the trimmed URL string
///
/// The body must start with a recognized URL-scheme prefix and must not
/// contain the literal error-indicator substring; any other content is
/// treated as failure.
pub fn parse_seller_response(body: &str) -> Option<String> {
    if body.contains(ERROR_INDICATOR) || !body.starts_with(SCHEME_PREFIX) {
        return None;
    }
    Some(body.trim().to_string())
}
