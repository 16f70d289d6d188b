//! CodeVF API client using reqwest

use url::Url;

use crate::{Error, Result};

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "CODEVF_API_KEY";

/// Environment variable overriding the API base URL
pub const BASE_URL_ENV: &str = "CODEVF_BASE_URL";

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.codevf.com/api/v1/";

/// Network/auth configuration for the client
///
/// Kept out of the core on purpose: the poll loop never sees where the key
/// or base URL came from.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// API key; falls back to `CODEVF_API_KEY` when built from the environment
    pub api_key: Option<String>,
    /// Base URL; falls back to `CODEVF_BASE_URL`, then the default
    pub base_url: Option<String>,
}

impl ClientConfig {
    /// Read configuration from the environment
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV).ok(),
            base_url: std::env::var(BASE_URL_ENV).ok(),
        }
    }

}

/// HTTP client for the CodeVF review API
pub struct CodeVfClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl CodeVfClient {
    /// Create a client from explicit configuration
    ///
    /// Fails with an auth error if no API key is configured, and with a URL
    /// error if the base URL does not parse.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let api_key = config.api_key.ok_or_else(|| {
            Error::Auth(format!(
                "CodeVF API key not found. Pass --api-key or set {}",
                API_KEY_ENV
            ))
        })?;

        let base_url = parse_base_url(config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

        tracing::info!(base_url = %base_url, "created CodeVF client");

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        })
    }

    /// Create a client from environment configuration
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// The resolved base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Resolve an endpoint path against the base URL
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }
}

impl std::fmt::Debug for CodeVfClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeVfClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Parse a base URL, normalizing to a trailing slash so joins append
fn parse_base_url(raw: &str) -> Result<Url> {
    if raw.ends_with('/') {
        Ok(Url::parse(raw)?)
    } else {
        Ok(Url::parse(&format!("{}/", raw))?)
    }
}
