//! Search-result types, deduplication and final ordering.
//!
//! Defines:
//! - `SearchResult` struct and `ResultSource` enum
//! - `deduplicate` to collapse duplicate URLs, keeping the highest score
//! - `sort_descending` / result caps for the final sequence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How many enriched results a bookmark-mode search returns.
pub const BOOKMARK_RESULT_CAP: usize = 25;
/// How many results a history-mode search asks the host index for.
pub const HISTORY_RESULT_CAP: usize = 50;

/// A scored entry headed for the popup list. `score` is recomputed per query
/// and never persisted; history-mode results carry no score at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub subtitle: String,
    pub source: ResultSource,
    pub score: Option<f64>,
    pub visit_count: Option<u32>,
    pub last_visit: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultSource {
    Bookmark,
    History,
}

/// Collapse duplicate URLs, keeping the highest-scoring entry per URL.
/// Relative order of the survivors is left to the caller's sort.
pub fn deduplicate(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut best: HashMap<String, SearchResult> = HashMap::new();

    for result in results {
        let replace = best
            .get(&result.url)
            .map_or(true, |kept| result.score.unwrap_or(0.0) > kept.score.unwrap_or(0.0));
        if replace {
            best.insert(result.url.clone(), result);
        }
    }

    best.into_values().collect()
}

/// Sort descending by score, ties broken by title so ordering is stable
/// across runs.
pub fn sort_descending(results: &mut [SearchResult]) {
    results.sort_by(|a, b| {
        b.score
            .unwrap_or(0.0)
            .partial_cmp(&a.score.unwrap_or(0.0))
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.title.cmp(&b.title))
    });
}
