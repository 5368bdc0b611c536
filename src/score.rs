//! Pass 1: the cheap lexical scorer.
//!
//! Runs over every candidate that survived the tag filter and produces a
//! provisional ranking from term matches against tags, title, URL and folder
//! path, a fuzzy title fallback for near-misses, and the learned
//! domain-affinity multiplier. Candidates that score zero or below are
//! dropped here and never reach enrichment.

use crate::bookmarks::Bookmark;
use crate::config::Weights;
use crate::distance::edit_distance;
use crate::domains::DomainScores;
use crate::query::Query;
use crate::results::{ResultSource, SearchResult};
use crate::tags::TagStore;
use std::collections::HashSet;

/// Score every candidate, returning one result per candidate with a positive
/// score. Order of the output is unspecified; the caller sorts.
pub fn lexical_pass(
    candidates: &[&Bookmark],
    query: &Query,
    tags: &TagStore,
    domains: &DomainScores,
    weights: &Weights,
) -> Vec<SearchResult> {
    candidates
        .iter()
        .filter_map(|bookmark| {
            let owned = tags.tags_for(&bookmark.url);
            let lexical = score_candidate(bookmark, query, owned, weights)?;
            let score = lexical * domains.multiplier(&bookmark.url);
            Some(SearchResult {
                title: bookmark.title.clone(),
                url: bookmark.url.clone(),
                subtitle: bookmark.path.clone(),
                source: ResultSource::Bookmark,
                score: Some(score),
                visit_count: None,
                last_visit: None,
            })
        })
        .collect()
}

/// The per-candidate lexical score before the domain multiplier, or `None`
/// when the candidate has no lexical relevance at all.
fn score_candidate(
    bookmark: &Bookmark,
    query: &Query,
    owned_tags: Option<&HashSet<String>>,
    weights: &Weights,
) -> Option<f64> {
    // Tag-only query: a flat tag score, so ordering falls to the domain and
    // recency multipliers.
    if query.is_tag_only() {
        return Some(weights.tag_match);
    }

    let title = bookmark.title.to_lowercase();
    let url = bookmark.url.to_lowercase();
    let path = bookmark.path.to_lowercase();

    let mut score = 0.0;
    let mut matched_tokens = 0usize;

    for token in &query.terms {
        let mut matched = false;

        // Tag check is independent of the title/url/path chain.
        if owned_tags.is_some_and(|tags| tags.iter().any(|t| t.contains(token))) {
            score += weights.tag_match;
            matched = true;
        }

        if title.contains(token) {
            score += weights.title_match;
            if title.split_whitespace().any(|word| word.starts_with(token)) {
                score += weights.starts_with_bonus;
            }
            matched = true;
        } else if url.contains(token) {
            score += weights.url_match;
            matched = true;
        } else if path.contains(token) {
            score += weights.path_match;
            matched = true;
        }

        if matched {
            matched_tokens += 1;
        }
    }

    let all_matched = matched_tokens == query.terms.len();

    // Fuzzy fallback: compare the joined terms against the title prefix of
    // the same length. Only for queries that did not fully match.
    if !all_matched && !query.terms.is_empty() {
        let term_string = query.term_string();
        let term_len = term_string.chars().count();
        let prefix: String = title.chars().take(term_len).collect();
        let dist = edit_distance(&term_string, &prefix);
        if dist <= term_len / 4 {
            score += 20.0 - 5.0 * dist as f64;
        }
    }

    if score <= 0.0 {
        return None;
    }

    if all_matched && query.terms.len() > 1 {
        score *= weights.all_words_bonus;
    }

    Some(score)
}
