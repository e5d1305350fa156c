//! Listing Harvester: a seller-storefront listing scraper
//!
//! This crate scrapes listing data from a set of seller storefront pages,
//! normalizes the extracted records, and forwards them to an external
//! spreadsheet-backed service for storage and deduplication.

pub mod auth;
pub mod config;
pub mod harvest;
pub mod record;
pub mod scrape;

use thiserror::Error;

/// Main error type for harvester operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Extraction error for {url}: {message}")]
    Extract { url: String, message: String },

    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for harvester operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use harvest::{RunSummary, SheetOutcome, SheetReport};
pub use record::ListingRecord;
