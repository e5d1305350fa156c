//! Configuration module for the harvester
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Endpoint URLs, the sheet list, and OAuth credentials all live in
//! the config file rather than in source.
//!
//! # Example
//!
//! ```no_run
//! use listing_harvester::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Sheets to process: {}", config.sheets.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, OauthConfig, ScrapeConfig, ServiceConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
