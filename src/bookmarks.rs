//! Bookmark-mode search.
//!
//! Orchestrates the full pipeline over the cached bookmark list:
//! tag filter -> lexical pass -> top-25 history enrichment -> dedup ->
//! final descending order. The candidate list itself is maintained by the
//! host-side cache collaborator; the core only reads it.

use crate::enrich;
use crate::host::HistoryIndex;
use crate::query::{self, Query};
use crate::results::{self, SearchResult};
use crate::score;
use crate::session::Session;
use crate::tags;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A flattened bookmark as the tree-cache collaborator supplies it. `url` is
/// the join key across every side table; `path` is the folder ancestry
/// joined for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmark {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub path: String,
}

/// Search the bookmark list for a query.
///
/// Mutates the session's visit cache in place (the caller persists it after
/// the query). Never fails: collaborator trouble degrades to missing bonuses
/// and a hopeless query comes back as an empty list.
pub fn search(
    raw_query: &str,
    bookmarks: &[Bookmark],
    session: &mut Session,
    index: &dyn HistoryIndex,
) -> Vec<SearchResult> {
    search_at(raw_query, bookmarks, session, index, Utc::now())
}

/// `search` with an explicit clock, so cache-expiry behavior is testable.
pub fn search_at(
    raw_query: &str,
    bookmarks: &[Bookmark],
    session: &mut Session,
    index: &dyn HistoryIndex,
    now: DateTime<Utc>,
) -> Vec<SearchResult> {
    log::trace!("Beginning bookmark search for {:?}", raw_query);

    let mut parsed = query::parse(raw_query);
    if parsed.web_escape {
        return Vec::new();
    }

    // An empty query surfaces the user's pinned items, nothing else.
    if parsed.is_empty() {
        parsed = Query {
            terms: Vec::new(),
            tag_filters: vec!["pin".to_string()],
            web_escape: false,
        };
    }

    let candidates: Vec<&Bookmark> = bookmarks.iter().collect();
    let candidates = tags::filter_candidates(&candidates, &parsed.tag_filters, &session.tags);

    let provisional = score::lexical_pass(
        &candidates,
        &parsed,
        &session.tags,
        &session.domains,
        &session.weights,
    );
    if provisional.is_empty() {
        return Vec::new();
    }
    log::debug!("{} candidates scored above zero", provisional.len());

    let enriched = enrich::enrich(
        provisional,
        index,
        &mut session.visits,
        &session.weights,
        now,
    );

    let mut finished = results::deduplicate(enriched);
    results::sort_descending(&mut finished);
    finished
}
