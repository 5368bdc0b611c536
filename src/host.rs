//! Collaborator seams for host-provided data.
//!
//! The core only ever talks to browsing history through the `HistoryIndex`
//! trait, so tests and offline runs can substitute the in-memory
//! `MemoryHistoryIndex` for the real SQLite-backed adapter in `db`.

use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A browsing-history entry as the host index reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub title: String,
    pub url: String,
    pub last_visit_time: Option<DateTime<Utc>>,
}

/// Read access to the host's browsing history.
///
/// `Sync` because Pass 2 fans visit lookups out across a rayon batch.
pub trait HistoryIndex: Sync {
    /// Full-text search ordered by the host's own relevance metric.
    fn search(
        &self,
        query: &str,
        max_results: usize,
        start_time: DateTime<Utc>,
    ) -> Result<Vec<HistoryRecord>>;

    /// Visit timestamps for one URL, newest first.
    fn visits(&self, url: &str) -> Result<Vec<DateTime<Utc>>>;
}

/// In-memory history index. Matches by simple substring containment against
/// title and URL, which is close enough to how browsers filter.
#[derive(Debug, Default)]
pub struct MemoryHistoryIndex {
    records: Vec<HistoryRecord>,
    visits: HashMap<String, Vec<DateTime<Utc>>>,
}

impl MemoryHistoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_record(&mut self, record: HistoryRecord) {
        self.records.push(record);
    }

    /// Register visit timestamps for a URL; stored newest first.
    pub fn add_visits(&mut self, url: &str, mut timestamps: Vec<DateTime<Utc>>) {
        timestamps.sort_by(|a, b| b.cmp(a));
        self.visits.insert(url.to_string(), timestamps);
    }
}

impl HistoryIndex for MemoryHistoryIndex {
    fn search(
        &self,
        query: &str,
        max_results: usize,
        start_time: DateTime<Utc>,
    ) -> Result<Vec<HistoryRecord>> {
        let needle = query.to_lowercase();
        Ok(self
            .records
            .iter()
            .filter(|r| {
                r.last_visit_time.map_or(true, |t| t >= start_time)
                    && (r.title.to_lowercase().contains(&needle)
                        || r.url.to_lowercase().contains(&needle))
            })
            .take(max_results)
            .cloned()
            .collect())
    }

    fn visits(&self, url: &str) -> Result<Vec<DateTime<Utc>>> {
        Ok(self.visits.get(url).cloned().unwrap_or_default())
    }
}
