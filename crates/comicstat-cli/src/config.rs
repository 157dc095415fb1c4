//! Configuration loading and resolution.

use comicstat::types::{CatalogError, CatalogResult};

/// Default catalog gateway.
pub const DEFAULT_BASE_URL: &str = "https://gateway.marvel.com/v1/public";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Fully resolved client configuration.
///
/// Constructed once and passed into the client; nothing reads process-wide
/// state after resolution.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    /// Endpoint bases tried in order until one succeeds.
    pub endpoints: Vec<String>,
    pub timeout_ms: u64,
}

impl ClientConfig {
    /// Resolve configuration with flag > environment > default precedence.
    ///
    /// `proxy` is an optional URL prefix prepended to the base URL as a
    /// second endpoint, tried only after a direct attempt fails.
    pub fn resolve(
        api_key: Option<&str>,
        base_url: Option<&str>,
        proxy: Option<&str>,
        timeout_ms: Option<u64>,
    ) -> CatalogResult<Self> {
        let api_key = match api_key {
            Some(key) => key.to_string(),
            None => std::env::var("COMICSTAT_API_KEY").map_err(|_| CatalogError::MissingApiKey)?,
        };
        // Keys pasted into env files sometimes keep their quotes.
        let api_key = api_key.trim().trim_matches('"').to_string();
        if api_key.is_empty() {
            return Err(CatalogError::MissingApiKey);
        }

        let base_url = match base_url {
            Some(url) => url.to_string(),
            None => std::env::var("COMICSTAT_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        };
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut endpoints = vec![base_url.clone()];
        if let Some(prefix) = proxy {
            endpoints.push(format!("{prefix}{base_url}"));
        }

        Ok(Self {
            api_key,
            endpoints,
            timeout_ms: timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS),
        })
    }

    /// Configuration for a single known endpoint (used by tests).
    pub fn single_endpoint(api_key: &str, base_url: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            endpoints: vec![base_url.trim_end_matches('/').to_string()],
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}
