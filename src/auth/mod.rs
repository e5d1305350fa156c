//! OAuth2 authorization-code exchange against the commerce platform's
//! identity service
//!
//! A stateless two-step flow: build the authorize URL the user is sent to,
//! then exchange the returned code for tokens at the token endpoint.
//! Credentials come from the `[oauth]` section of the configuration file.

use crate::config::OauthConfig;
use crate::{HarvestError, Result};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

/// Token endpoint response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,

    #[serde(default)]
    pub refresh_token: Option<String>,

    /// Access token lifetime in seconds
    pub expires_in: u64,
}

/// Assembles the identity provider's authorization URL
///
/// `state` is the caller's CSRF token; it is echoed back on the redirect.
pub fn build_authorize_url(config: &OauthConfig, state: &str) -> Result<Url> {
    let mut url = Url::parse(&config.authorize_url)?;

    url.query_pairs_mut()
        .append_pair("client_id", &config.client_id)
        .append_pair("redirect_uri", &config.redirect_uri)
        .append_pair("response_type", "code")
        .append_pair("scope", &config.scope)
        .append_pair("state", state);

    Ok(url)
}

/// Exchanges an authorization code for an access token
///
/// Sends a form-encoded POST to the token endpoint with HTTP Basic
/// authentication from the client id and secret. A non-success status is
/// reported with the raw response body.
pub async fn exchange_code(
    client: &Client,
    config: &OauthConfig,
    code: &str,
) -> Result<TokenResponse> {
    let response = client
        .post(&config.token_url)
        .basic_auth(&config.client_id, Some(&config.client_secret))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(HarvestError::TokenExchange(format!(
            "HTTP {}: {}",
            status, body
        )));
    }

    Ok(response.json::<TokenResponse>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> OauthConfig {
        OauthConfig {
            client_id: "client-abc".to_string(),
            client_secret: "secret-xyz".to_string(),
            redirect_uri: "http://localhost:3000/callback".to_string(),
            authorize_url: "https://auth.example.com/oauth2/authorize".to_string(),
            token_url: "https://api.example.com/identity/v1/oauth2/token".to_string(),
            scope: "https://api.example.com/oauth/api_scope".to_string(),
        }
    }

    #[test]
    fn test_authorize_url_carries_all_parameters() {
        let url = build_authorize_url(&test_config(), "abc123").unwrap();

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert!(url.as_str().starts_with("https://auth.example.com/oauth2/authorize?"));
        assert!(pairs.contains(&("client_id".to_string(), "client-abc".to_string())));
        assert!(pairs.contains(&(
            "redirect_uri".to_string(),
            "http://localhost:3000/callback".to_string()
        )));
        assert!(pairs.contains(&("response_type".to_string(), "code".to_string())));
        assert!(pairs.contains(&("state".to_string(), "abc123".to_string())));
    }

    #[test]
    fn test_authorize_url_rejects_malformed_endpoint() {
        let mut config = test_config();
        config.authorize_url = "not a url".to_string();
        assert!(build_authorize_url(&config, "abc123").is_err());
    }

    #[test]
    fn test_token_response_deserializes_without_refresh_token() {
        let json = r#"{"access_token": "tok", "expires_in": 7200}"#;
        let response: TokenResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.access_token, "tok");
        assert_eq!(response.refresh_token, None);
        assert_eq!(response.expires_in, 7200);
    }
}
