//! Pass 2: history enrichment of the provisional top results.
//!
//! Takes the Pass-1 ranking, keeps the top 25, and folds in visit-count and
//! recency bonuses. Visit stats come from the shared `VisitCache` when a
//! fresh entry exists, otherwise from a batch of history lookups fanned out
//! with rayon and joined before the pass returns. Misses are written back to
//! the cache; failed or empty lookups are not (a later search may retry).

use crate::config::Weights;
use crate::host::HistoryIndex;
use crate::results::{self, SearchResult, BOOKMARK_RESULT_CAP};
use chrono::{DateTime, Duration, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How long a cached visit-count entry stays valid, in hours.
pub const CACHE_TTL_HOURS: i64 = 24;

/// Cached visit stats for one URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitEntry {
    pub visit_count: u32,
    pub last_visit: Option<DateTime<Utc>>,
    pub cached_at: DateTime<Utc>,
}

/// URL -> visit stats, shared across searches within a popup session and
/// persisted by the session cache.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct VisitCache {
    entries: HashMap<String, VisitEntry>,
}

impl VisitCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The entry for a URL, if it exists and has not outlived the TTL.
    pub fn get_valid(&self, url: &str, now: DateTime<Utc>) -> Option<&VisitEntry> {
        self.entries
            .get(url)
            .filter(|entry| now - entry.cached_at < Duration::hours(CACHE_TTL_HOURS))
    }

    pub fn insert(
        &mut self,
        url: &str,
        visit_count: u32,
        last_visit: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) {
        self.entries.insert(
            url.to_string(),
            VisitEntry {
                visit_count,
                last_visit,
                cached_at: now,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Enrich the provisional ranking with visit-count and recency bonuses.
///
/// Sorts descending, caps at 25, resolves visit stats for every survivor
/// (cache first, then one concurrent lookup batch for the misses) and applies
/// the bonuses. The returned list is not re-sorted; the caller dedups and
/// sorts once at the end.
pub fn enrich(
    mut provisional: Vec<SearchResult>,
    index: &dyn HistoryIndex,
    cache: &mut VisitCache,
    weights: &Weights,
    now: DateTime<Utc>,
) -> Vec<SearchResult> {
    results::sort_descending(&mut provisional);
    provisional.truncate(BOOKMARK_RESULT_CAP);

    // Split into cache hits and URLs that need a lookup.
    let misses: Vec<String> = provisional
        .iter()
        .filter(|r| cache.get_valid(&r.url, now).is_none())
        .map(|r| r.url.clone())
        .collect();

    log::trace!(
        "Enriching {} results ({} cache misses)",
        provisional.len(),
        misses.len()
    );

    // One concurrent batch; nothing proceeds until every lookup resolved.
    let fetched: Vec<(String, Option<(u32, Option<DateTime<Utc>>)>)> = misses
        .par_iter()
        .map(|url| {
            let stats = match index.visits(url) {
                // Visits arrive newest first, so the head is the last visit.
                Ok(visits) if !visits.is_empty() => {
                    Some((visits.len() as u32, visits.first().copied()))
                }
                Ok(_) => None,
                Err(e) => {
                    log::error!("History lookup failed for {}: {}", url, e);
                    None
                }
            };
            (url.clone(), stats)
        })
        .collect();

    // Single writer: apply the batch to the shared cache sequentially.
    for (url, stats) in fetched {
        if let Some((visit_count, last_visit)) = stats {
            cache.insert(&url, visit_count, last_visit, now);
        }
    }

    for result in &mut provisional {
        let Some(entry) = cache.get_valid(&result.url, now) else {
            continue;
        };

        let mut bonus = (1.0 + entry.visit_count as f64).ln() * weights.visit_count;
        if let Some(last_visit) = entry.last_visit {
            let days_since = (now - last_visit).num_seconds() as f64 / 86_400.0;
            bonus += (weights.recency - days_since).max(0.0);
        }

        result.score = Some(result.score.unwrap_or(0.0) + bonus);
        result.visit_count = Some(entry.visit_count);
        result.last_visit = entry.last_visit;
    }

    provisional
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHistoryIndex;
    use crate::results::ResultSource;

    fn result(url: &str, score: f64) -> SearchResult {
        SearchResult {
            title: url.into(),
            url: url.into(),
            subtitle: String::new(),
            source: ResultSource::Bookmark,
            score: Some(score),
            visit_count: None,
            last_visit: None,
        }
    }

    #[test]
    fn caps_at_twenty_five() {
        let provisional: Vec<SearchResult> = (0..40)
            .map(|i| result(&format!("https://x.com/{}", i), i as f64))
            .collect();
        let index = MemoryHistoryIndex::new();
        let mut cache = VisitCache::new();
        let out = enrich(
            provisional,
            &index,
            &mut cache,
            &Weights::default(),
            Utc::now(),
        );
        assert_eq!(out.len(), 25);
        // the cap keeps the highest provisional scores
        assert!(out.iter().all(|r| r.score.unwrap() >= 15.0));
    }

    #[test]
    fn lookup_results_are_cached_and_scored() {
        let now = Utc::now();
        let mut index = MemoryHistoryIndex::new();
        index.add_visits(
            "https://a.com",
            vec![now - Duration::hours(1), now - Duration::days(3)],
        );

        let mut cache = VisitCache::new();
        let out = enrich(
            vec![result("https://a.com", 10.0)],
            &index,
            &mut cache,
            &Weights::default(),
            now,
        );

        // ln(1+2)*5 visit bonus plus ~(10 - 1/24 days) recency bonus
        let score = out[0].score.unwrap();
        let expected = 10.0 + 3.0_f64.ln() * 5.0 + (10.0 - 1.0 / 24.0);
        assert!((score - expected).abs() < 1e-6);
        assert_eq!(out[0].visit_count, Some(2));

        let entry = cache.get_valid("https://a.com", now).unwrap();
        assert_eq!(entry.visit_count, 2);
    }

    #[test]
    fn expired_cache_entry_triggers_a_fresh_lookup() {
        let now = Utc::now();
        let mut cache = VisitCache::new();
        // Stale entry from 25 hours ago claiming 100 visits.
        cache.insert("https://a.com", 100, None, now - Duration::hours(25));
        assert!(cache.get_valid("https://a.com", now).is_none());

        let mut index = MemoryHistoryIndex::new();
        index.add_visits("https://a.com", vec![now]);

        let out = enrich(
            vec![result("https://a.com", 10.0)],
            &index,
            &mut cache,
            &Weights::default(),
            now,
        );

        // Fresh lookup found 1 visit, not the stale 100.
        assert_eq!(out[0].visit_count, Some(1));
        let entry = cache.get_valid("https://a.com", now).unwrap();
        assert_eq!(entry.visit_count, 1);
        assert_eq!(entry.cached_at, now);
    }

    #[test]
    fn valid_cache_entry_skips_the_lookup() {
        let now = Utc::now();
        let mut cache = VisitCache::new();
        cache.insert("https://a.com", 4, None, now - Duration::hours(23));

        // Index knows nothing about the URL; the cache must carry it.
        let index = MemoryHistoryIndex::new();
        let out = enrich(
            vec![result("https://a.com", 10.0)],
            &index,
            &mut cache,
            &Weights::default(),
            now,
        );
        let expected = 10.0 + 5.0_f64.ln() * 5.0;
        assert!((out[0].score.unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn empty_lookup_adds_nothing_and_is_not_cached() {
        let now = Utc::now();
        let index = MemoryHistoryIndex::new();
        let mut cache = VisitCache::new();
        let out = enrich(
            vec![result("https://never-visited.com", 10.0)],
            &index,
            &mut cache,
            &Weights::default(),
            now,
        );
        assert_eq!(out[0].score, Some(10.0));
        assert!(cache.is_empty());
    }

    #[test]
    fn recency_bonus_decays_to_zero() {
        let now = Utc::now();
        let mut cache = VisitCache::new();
        // Last visited 30 days ago, past the 10-day recency window.
        cache.insert(
            "https://a.com",
            1,
            Some(now - Duration::days(30)),
            now,
        );

        let index = MemoryHistoryIndex::new();
        let out = enrich(
            vec![result("https://a.com", 10.0)],
            &index,
            &mut cache,
            &Weights::default(),
            now,
        );
        let expected = 10.0 + 2.0_f64.ln() * 5.0;
        assert!((out[0].score.unwrap() - expected).abs() < 1e-9);
    }
}
