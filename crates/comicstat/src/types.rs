//! Core data types for catalog records and errors.

use serde::{Deserialize, Serialize};

/// Thumbnail path used by the catalog when no real image exists.
const PLACEHOLDER_THUMBNAIL: &str = "image_not_available";

/// A character record as returned by the catalog API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
    #[serde(default)]
    pub comics: ResourceCount,
    #[serde(default)]
    pub series: ResourceCount,
    #[serde(default)]
    pub stories: ResourceCount,
    #[serde(default)]
    pub events: ResourceCount,
}

/// A comic-issue record as returned by the catalog API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComicRecord {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub issue_number: Option<f64>,
    #[serde(default)]
    pub page_count: Option<u32>,
    #[serde(default)]
    pub prices: Vec<ComicPrice>,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
}

/// A single price entry on a comic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComicPrice {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    pub price: f64,
}

/// How many related resources the catalog knows about.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ResourceCount {
    #[serde(default)]
    pub available: u64,
}

/// Split image reference: `{path}.{extension}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thumbnail {
    pub path: String,
    pub extension: String,
}

impl Thumbnail {
    /// Full image URL.
    pub fn url(&self) -> String {
        format!("{}.{}", self.path, self.extension)
    }

    /// True when the catalog substituted its "not available" placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.path.ends_with(PLACEHOLDER_THUMBNAIL)
    }
}

/// Errors that can occur while talking to the catalog.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Status error: HTTP {status} from {endpoint}")]
    Status { status: u16, endpoint: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("No API key configured (pass --api-key or set COMICSTAT_API_KEY)")]
    MissingApiKey,
}

/// Convenience result type.
pub type CatalogResult<T> = Result<T, CatalogError>;
