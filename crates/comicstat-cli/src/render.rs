//! Terminal rendering of samples, statistics, and listings.

use comicstat::stats::SampleStats;
use comicstat::types::{CharacterRecord, ComicRecord};

use crate::client::ProbeAttempt;

/// Longest description snippet shown in list rows.
const SNIPPET_LEN: usize = 100;

pub fn print_dashboard(sample: &[CharacterRecord], stats: &SampleStats) {
    println!("Character dashboard ({} records)", stats.total_count);
    println!();
    println!("  Total characters:       {}", stats.total_count);
    println!(
        "  Comics per character:   avg {} (range {} - {}, total {})",
        stats.avg_comics, stats.min_comics, stats.max_comics, stats.total_comics
    );
    println!(
        "  Description coverage:   {}% ({} of {})",
        stats.description_coverage_pct, stats.with_description, stats.total_count
    );
    println!(
        "  Series per character:   avg {} (max {})",
        stats.avg_series, stats.max_series
    );
    println!("  Stories per character:  avg {}", stats.avg_stories);
    println!(
        "  Comics quartiles:       q1 {}, median {}, q3 {}",
        stats.quartiles.q1, stats.quartiles.median, stats.quartiles.q3
    );
    println!();
    print_characters(sample);
}

pub fn print_characters(records: &[CharacterRecord]) {
    for (index, rec) in records.iter().enumerate() {
        println!(
            "{:>3}. {} (id {})",
            index + 1,
            rec.name,
            rec.id
        );
        println!(
            "     comics {}  series {}  stories {}  events {}",
            rec.comics.available, rec.series.available, rec.stories.available, rec.events.available
        );
        println!("     {}", snippet(rec.description.as_deref()));
    }
}

pub fn print_character_detail(rec: &CharacterRecord) {
    println!("{} (id {})", rec.name, rec.id);
    println!("  comics:  {}", rec.comics.available);
    println!("  series:  {}", rec.series.available);
    println!("  stories: {}", rec.stories.available);
    println!("  events:  {}", rec.events.available);
    if let Some(thumb) = rec.thumbnail.as_ref().filter(|t| !t.is_placeholder()) {
        println!("  image:   {}", thumb.url());
    }
    println!("  {}", snippet(rec.description.as_deref()));
}

pub fn print_comics(records: &[ComicRecord]) {
    for (index, comic) in records.iter().enumerate() {
        println!("{:>3}. {} (id {})", index + 1, comic.title, comic.id);

        let issue = comic
            .issue_number
            .map(|n| format!("#{n}"))
            .unwrap_or_else(|| "N/A".to_string());
        let pages = comic
            .page_count
            .map(|p| p.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let price = comic
            .prices
            .first()
            .map(|p| format!("${:.2}", p.price))
            .unwrap_or_else(|| "N/A".to_string());
        println!("     issue {issue}  pages {pages}  price {price}");
        println!("     {}", snippet(comic.description.as_deref()));
    }
}

pub fn print_probe(attempts: &[ProbeAttempt]) {
    for attempt in attempts {
        let mark = if attempt.ok { "ok " } else { "FAIL" };
        println!("[{mark}] {} — {}", attempt.base, attempt.detail);
    }
    if attempts.iter().any(|a| a.ok) {
        println!("Connection test passed.");
    } else {
        println!("Connection test failed on every endpoint.");
    }
}

/// First `SNIPPET_LEN` characters of a description, or a stock line.
fn snippet(description: Option<&str>) -> String {
    match description.map(str::trim).filter(|d| !d.is_empty()) {
        Some(text) if text.chars().count() > SNIPPET_LEN => {
            let cut: String = text.chars().take(SNIPPET_LEN).collect();
            format!("{cut}...")
        }
        Some(text) => text.to_string(),
        None => "No description available".to_string(),
    }
}
