use serde::Deserialize;

/// Main configuration structure for the harvester
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Ordered list of sheet identifiers to process, in run order
    pub sheets: Vec<String>,

    pub service: ServiceConfig,

    #[serde(default)]
    pub scrape: ScrapeConfig,

    /// OAuth credentials for the commerce platform's identity service.
    /// Optional: the harvest run itself does not need them.
    #[serde(default)]
    pub oauth: Option<OauthConfig>,
}

/// Endpoints of the external spreadsheet-backed service
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the read endpoint (seller URL lookup and dedup trigger)
    #[serde(rename = "read-url")]
    pub read_url: String,

    /// Base URL of the write endpoint (record ingestion)
    #[serde(rename = "write-url")]
    pub write_url: String,
}

/// Scrape behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeConfig {
    /// User agent string sent with every page fetch
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds for page fetches and service calls
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_user_agent() -> String {
    format!("listing-harvester/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

/// OAuth2 authorization-code flow configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OauthConfig {
    #[serde(rename = "client-id")]
    pub client_id: String,

    #[serde(rename = "client-secret")]
    pub client_secret: String,

    /// Redirect URI registered with the identity provider
    #[serde(rename = "redirect-uri")]
    pub redirect_uri: String,

    /// Authorization endpoint of the identity provider
    #[serde(rename = "authorize-url")]
    pub authorize_url: String,

    /// Token endpoint of the identity provider
    #[serde(rename = "token-url")]
    pub token_url: String,

    /// Space-separated scope list requested during authorization
    pub scope: String,
}
