//! Sample building over a paged character source.

use std::collections::HashSet;

use async_trait::async_trait;
use tracing::debug;

use crate::types::{CatalogResult, CharacterRecord};

/// Query parameters for one page request against the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub limit: u32,
    pub offset: u64,
    pub name_starts_with: Option<String>,
}

/// A paged source of character records.
///
/// The real implementation talks HTTP; tests script page responses.
#[async_trait]
pub trait CharacterSource {
    async fn fetch_page(&self, query: &PageQuery) -> CatalogResult<Vec<CharacterRecord>>;
}

/// How many pages to fetch and how large the final sample may be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplePlan {
    pub page_count: u32,
    pub page_size: u32,
    pub sample_cap: usize,
}

impl Default for SamplePlan {
    /// The dashboard's fetch shape: three 20-record pages kept to 15 records.
    fn default() -> Self {
        Self {
            page_count: 3,
            page_size: 20,
            sample_cap: 15,
        }
    }
}

/// Build a deduplicated, size-capped sample of character records.
///
/// Pages are requested strictly one after another at offsets
/// `0, page_size, 2 * page_size, ...`, so concatenation order is request
/// order. Duplicate ids keep their first occurrence. Any page failure
/// aborts the whole build; partial results are never returned.
pub async fn build_sample<S>(source: &S, plan: &SamplePlan) -> CatalogResult<Vec<CharacterRecord>>
where
    S: CharacterSource + Sync + ?Sized,
{
    let mut working = Vec::new();

    for page in 0..plan.page_count {
        let query = PageQuery {
            limit: plan.page_size,
            offset: u64::from(page) * u64::from(plan.page_size),
            name_starts_with: None,
        };
        let mut records = source.fetch_page(&query).await?;
        debug!(page, offset = query.offset, fetched = records.len(), "fetched catalog page");
        working.append(&mut records);
    }

    let mut sample = dedupe_by_id(working);
    sample.truncate(plan.sample_cap);
    Ok(sample)
}

/// Drop records whose id was already seen, keeping first-seen order.
pub fn dedupe_by_id(records: Vec<CharacterRecord>) -> Vec<CharacterRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    records.into_iter().filter(|r| seen.insert(r.id)).collect()
}
