//! Summary statistics over a character sample.

use serde::{Deserialize, Serialize};

use crate::types::CharacterRecord;

/// Nearest-rank quartiles of the comics-available distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quartiles {
    pub q1: u64,
    pub median: u64,
    pub q3: u64,
}

/// Summary metrics derived from one sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleStats {
    pub total_count: usize,
    pub total_comics: u64,
    pub avg_comics: u64,
    pub max_comics: u64,
    pub min_comics: u64,
    pub with_description: usize,
    pub description_coverage_pct: u64,
    pub avg_series: u64,
    pub max_series: u64,
    pub avg_stories: u64,
    pub quartiles: Quartiles,
}

/// Compute summary statistics over a sample of character records.
///
/// Pure function over the given slice; returns `None` for an empty sample
/// so callers never divide by zero. Averages round half away from zero.
pub fn compute_stats(sample: &[CharacterRecord]) -> Option<SampleStats> {
    if sample.is_empty() {
        return None;
    }

    let total_count = sample.len();

    let comic_counts: Vec<u64> = sample.iter().map(|c| c.comics.available).collect();
    let total_comics: u64 = comic_counts.iter().sum();
    let avg_comics = round_mean(total_comics, total_count);
    let max_comics = comic_counts.iter().copied().max().unwrap_or(0);
    let min_comics = comic_counts.iter().copied().min().unwrap_or(0);

    let with_description = sample
        .iter()
        .filter(|c| {
            c.description
                .as_deref()
                .is_some_and(|d| !d.trim().is_empty())
        })
        .count();
    let description_coverage_pct =
        (with_description as f64 / total_count as f64 * 100.0).round() as u64;

    let series_counts: Vec<u64> = sample.iter().map(|c| c.series.available).collect();
    let avg_series = round_mean(series_counts.iter().sum(), total_count);
    let max_series = series_counts.iter().copied().max().unwrap_or(0);

    let story_total: u64 = sample.iter().map(|c| c.stories.available).sum();
    let avg_stories = round_mean(story_total, total_count);

    let mut sorted_comics = comic_counts;
    sorted_comics.sort_unstable();
    let quartiles = Quartiles {
        q1: nearest_rank(&sorted_comics, 0.25),
        median: nearest_rank(&sorted_comics, 0.5),
        q3: nearest_rank(&sorted_comics, 0.75),
    };

    Some(SampleStats {
        total_count,
        total_comics,
        avg_comics,
        max_comics,
        min_comics,
        with_description,
        description_coverage_pct,
        avg_series,
        max_series,
        avg_stories,
        quartiles,
    })
}

/// Mean of `total` over `count` items, rounded half away from zero.
fn round_mean(total: u64, count: usize) -> u64 {
    (total as f64 / count as f64).round() as u64
}

/// Nearest-rank quantile: the sorted value at index `floor(n * fraction)`,
/// clamped to the last element. No interpolation.
fn nearest_rank(sorted: &[u64], fraction: f64) -> u64 {
    let idx = (sorted.len() as f64 * fraction).floor() as usize;
    sorted[idx.min(sorted.len() - 1)]
}
