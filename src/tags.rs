//! Tag storage and `#tag` filtering.
//!
//! Tags are free-text strings owned per URL, edited by the user and persisted
//! by the session cache. Filtering is an AND across filter tags and an OR
//! across a candidate's own tags per filter, so adding filters only narrows.

use crate::bookmarks::Bookmark;
use crate::distance::edit_distance;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Mapping from URL to the set of tags the user assigned to it.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TagStore {
    entries: HashMap<String, HashSet<String>>,
}

impl TagStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tags_for(&self, url: &str) -> Option<&HashSet<String>> {
        self.entries.get(url)
    }

    /// Replace the tag set for a URL. An empty set removes the entry.
    pub fn set_tags<I: IntoIterator<Item = String>>(&mut self, url: &str, tags: I) {
        let set: HashSet<String> = tags
            .into_iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        if set.is_empty() {
            self.entries.remove(url);
        } else {
            self.entries.insert(url.to_string(), set);
        }
    }

    pub fn add_tag(&mut self, url: &str, tag: &str) {
        let tag = tag.trim().to_lowercase();
        if tag.is_empty() {
            return;
        }
        self.entries.entry(url.to_string()).or_default().insert(tag);
    }

    pub fn remove_tag(&mut self, url: &str, tag: &str) {
        if let Some(set) = self.entries.get_mut(url) {
            set.remove(&tag.to_lowercase());
            if set.is_empty() {
                self.entries.remove(url);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Does an owned tag satisfy a filter tag? Exact substring containment, or
/// close enough by edit distance (2 for tags longer than 5 chars, else 1).
pub fn tag_matches(filter: &str, owned: &str) -> bool {
    if owned.contains(filter) {
        return true;
    }
    let threshold = if owned.len() > 5 { 2 } else { 1 };
    edit_distance(filter, owned) <= threshold
}

/// Keep only candidates whose tag set satisfies every filter tag. Untagged
/// candidates never match a filter.
pub fn filter_candidates<'a>(
    candidates: &[&'a Bookmark],
    filters: &[String],
    store: &TagStore,
) -> Vec<&'a Bookmark> {
    if filters.is_empty() {
        return candidates.to_vec();
    }

    candidates
        .iter()
        .filter(|bookmark| {
            let Some(owned) = store.tags_for(&bookmark.url) else {
                return false;
            };
            filters
                .iter()
                .all(|filter| owned.iter().any(|tag| tag_matches(filter, tag)))
        })
        .copied()
        .collect()
}
