//! comicstat — core library for catalog record sampling and summary statistics.

pub mod sample;
pub mod stats;
pub mod types;

pub use sample::{build_sample, dedupe_by_id, CharacterSource, PageQuery, SamplePlan};
pub use stats::{compute_stats, Quartiles, SampleStats};
pub use types::*;
