use crate::config::types::{Config, OauthConfig, ScrapeConfig, ServiceConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_sheets(&config.sheets)?;
    validate_service_config(&config.service)?;
    validate_scrape_config(&config.scrape)?;
    if let Some(oauth) = &config.oauth {
        validate_oauth_config(oauth)?;
    }
    Ok(())
}

/// Validates the sheet identifier list
fn validate_sheets(sheets: &[String]) -> Result<(), ConfigError> {
    if sheets.is_empty() {
        return Err(ConfigError::Validation(
            "sheets list cannot be empty".to_string(),
        ));
    }

    for sheet in sheets {
        if sheet.trim().is_empty() {
            return Err(ConfigError::Validation(
                "sheet identifiers cannot be empty or whitespace".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates the external service endpoints
fn validate_service_config(config: &ServiceConfig) -> Result<(), ConfigError> {
    validate_endpoint("read-url", &config.read_url)?;
    validate_endpoint("write-url", &config.write_url)?;
    Ok(())
}

fn validate_endpoint(name: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: {}", name, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "{} must use an HTTP(S) scheme, got '{}'",
            name,
            url.scheme()
        )));
    }

    Ok(())
}

/// Validates scrape behavior configuration
fn validate_scrape_config(config: &ScrapeConfig) -> Result<(), ConfigError> {
    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates OAuth configuration when present
fn validate_oauth_config(config: &OauthConfig) -> Result<(), ConfigError> {
    if config.client_id.is_empty() {
        return Err(ConfigError::Validation(
            "oauth client-id cannot be empty".to_string(),
        ));
    }

    if config.client_secret.is_empty() {
        return Err(ConfigError::Validation(
            "oauth client-secret cannot be empty".to_string(),
        ));
    }

    validate_endpoint("redirect-uri", &config.redirect_uri)?;
    validate_endpoint("authorize-url", &config.authorize_url)?;
    validate_endpoint("token-url", &config.token_url)?;

    if config.scope.is_empty() {
        return Err(ConfigError::Validation(
            "oauth scope cannot be empty".to_string(),
        ));
    }

    Ok(())
}
