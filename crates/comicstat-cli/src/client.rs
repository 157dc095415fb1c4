//! Catalog API client over reqwest.
//!
//! Builds `{base}/{endpoint}` URLs with the access credential and
//! pass-through query parameters, parses the API envelope, and tries the
//! configured endpoint bases in order until one succeeds.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use comicstat::sample::{CharacterSource, PageQuery};
use comicstat::types::{CatalogError, CatalogResult, CharacterRecord, ComicRecord};

use crate::config::ClientConfig;

/// One page of results as carried inside the API envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub count: u32,
    pub results: Vec<T>,
}

/// The outer response envelope. The `code`/`status` fields are ignored;
/// only the nested page matters to callers.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Page<T>,
}

/// Outcome of probing one endpoint base.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeAttempt {
    pub base: String,
    pub ok: bool,
    pub detail: String,
}

/// HTTP client for the comics catalog.
pub struct CatalogClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl CatalogClient {
    pub fn new(config: ClientConfig) -> CatalogResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(concat!("comicstat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CatalogError::Transport(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// List characters at a page offset.
    pub async fn get_characters(&self, limit: u32, offset: u32) -> CatalogResult<Page<CharacterRecord>> {
        self.get_page(
            "characters",
            &[("limit", limit.to_string()), ("offset", offset.to_string())],
        )
        .await
    }

    /// Characters whose name starts with the given prefix.
    pub async fn search_characters(&self, name: &str, limit: u32) -> CatalogResult<Page<CharacterRecord>> {
        self.get_page(
            "characters",
            &[
                ("nameStartsWith", name.to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    /// A single character by id, if the catalog knows it.
    pub async fn get_character(&self, id: u64) -> CatalogResult<Option<CharacterRecord>> {
        let page: Page<CharacterRecord> = self.get_page(&format!("characters/{id}"), &[]).await?;
        Ok(page.results.into_iter().next())
    }

    /// Comics featuring a character.
    pub async fn get_character_comics(&self, id: u64, limit: u32) -> CatalogResult<Page<ComicRecord>> {
        self.get_page(
            &format!("characters/{id}/comics"),
            &[("limit", limit.to_string())],
        )
        .await
    }

    /// List comics at a page offset.
    pub async fn get_comics(&self, limit: u32, offset: u32) -> CatalogResult<Page<ComicRecord>> {
        self.get_page(
            "comics",
            &[("limit", limit.to_string()), ("offset", offset.to_string())],
        )
        .await
    }

    /// Comics whose title starts with the given prefix.
    pub async fn search_comics(&self, title: &str, limit: u32) -> CatalogResult<Page<ComicRecord>> {
        self.get_page(
            "comics",
            &[
                ("titleStartsWith", title.to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    /// Issue a limit-1 characters request against every configured base,
    /// reporting each attempt instead of stopping at the first success.
    pub async fn probe(&self) -> Vec<ProbeAttempt> {
        let mut attempts = Vec::with_capacity(self.config.endpoints.len());
        for base in &self.config.endpoints {
            let attempt = match self
                .get_page_from::<CharacterRecord>(base, "characters", &[("limit", "1".to_string())])
                .await
            {
                Ok(page) => ProbeAttempt {
                    base: base.clone(),
                    ok: true,
                    detail: format!("{} characters in catalog", page.total),
                },
                Err(e) => ProbeAttempt {
                    base: base.clone(),
                    ok: false,
                    detail: e.to_string(),
                },
            };
            attempts.push(attempt);
        }
        attempts
    }

    /// GET one endpoint, trying each configured base in order.
    ///
    /// The first success wins; when every base fails, the error from the
    /// last attempt is returned.
    async fn get_page<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> CatalogResult<Page<T>> {
        let mut last_err = None;
        for base in &self.config.endpoints {
            match self.get_page_from(base, endpoint, params).await {
                Ok(page) => {
                    debug!(base, endpoint, count = page.count, "catalog request succeeded");
                    return Ok(page);
                }
                Err(e) => {
                    warn!(base, endpoint, error = %e, "catalog request failed");
                    last_err = Some(e);
                }
            }
        }
        Err(last_err.unwrap_or_else(|| CatalogError::Transport("no endpoints configured".to_string())))
    }

    async fn get_page_from<T: DeserializeOwned>(
        &self,
        base: &str,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> CatalogResult<Page<T>> {
        let url = self.build_url(base, endpoint, params)?;

        let resp = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        let envelope: Envelope<T> = serde_json::from_str(&body)
            .map_err(|e| CatalogError::MalformedResponse(e.to_string()))?;
        Ok(envelope.data)
    }

    fn build_url(&self, base: &str, endpoint: &str, params: &[(&str, String)]) -> CatalogResult<Url> {
        let mut url = Url::parse(&format!("{base}/{endpoint}"))
            .map_err(|e| CatalogError::Transport(format!("invalid request URL: {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("apikey", &self.config.api_key);
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl CharacterSource for CatalogClient {
    async fn fetch_page(&self, query: &PageQuery) -> CatalogResult<Vec<CharacterRecord>> {
        let mut params = vec![
            ("limit", query.limit.to_string()),
            ("offset", query.offset.to_string()),
        ];
        if let Some(name) = &query.name_starts_with {
            params.push(("nameStartsWith", name.clone()));
        }
        let page: Page<CharacterRecord> = self.get_page("characters", &params).await?;
        Ok(page.results)
    }
}
