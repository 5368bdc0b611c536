//! History-mode search.
//!
//! The sibling of bookmark mode: no tag filtering, no scoring, no
//! enrichment. The raw query goes straight to the host history index with an
//! unrestricted time window and the host's own relevance order is kept.

use crate::host::HistoryIndex;
use crate::results::{ResultSource, SearchResult, HISTORY_RESULT_CAP};
use crate::Result;
use chrono::{TimeZone, Utc};

/// Search browsing history for the given query.
pub fn search(raw_query: &str, index: &dyn HistoryIndex) -> Result<Vec<SearchResult>> {
    log::trace!("Beginning history search for {:?}", raw_query);

    let epoch = Utc.timestamp_opt(0, 0).single().unwrap_or_else(Utc::now);
    let records = index.search(raw_query, HISTORY_RESULT_CAP, epoch)?;

    Ok(records
        .into_iter()
        .map(|record| SearchResult {
            title: record.title,
            subtitle: record.url.clone(),
            url: record.url,
            source: ResultSource::History,
            score: None,
            visit_count: None,
            last_visit: record.last_visit_time,
        })
        .collect())
}
