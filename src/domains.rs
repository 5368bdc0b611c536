//! Domain-preference learning.
//!
//! Every time the user picks a result we bump a counter for its hostname;
//! Pass 1 multiplies lexical scores by a logarithmic affinity factor so
//! domains the user keeps choosing float upward. Counts only ever grow,
//! short of an explicit reset.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

/// Extract the hostname from a URL, if it parses.
pub fn get_domain(url_str: &str) -> Option<String> {
    Url::parse(url_str)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
}

/// Hostname -> selection count.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DomainScores {
    counts: HashMap<String, u32>,
}

impl DomainScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the user selected a result at this URL. Malformed URLs are
    /// skipped silently.
    pub fn record_selection(&mut self, url: &str) {
        if let Some(domain) = get_domain(url) {
            *self.counts.entry(domain).or_insert(0) += 1;
        }
    }

    pub fn count(&self, domain: &str) -> u32 {
        self.counts.get(domain).copied().unwrap_or(0)
    }

    /// The affinity multiplier for a URL: `1 + ln(1 + count) * 0.1`, or 1.0
    /// when the hostname is unknown or the URL does not parse.
    pub fn multiplier(&self, url: &str) -> f64 {
        match get_domain(url).and_then(|d| self.counts.get(&d)) {
            Some(&count) => 1.0 + (1.0 + count as f64).ln() * 0.1,
            None => 1.0,
        }
    }

    /// Forget all learned preferences.
    pub fn reset(&mut self) {
        self.counts.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
