//! Scoring weights.
//!
//! A flat set of numeric coefficients supplied externally (settings UI,
//! config file). Missing keys fall back to the documented defaults; a
//! malformed config falls back wholesale.

use serde::{Deserialize, Serialize};

fn default_title_match() -> f64 {
    10.0
}
fn default_starts_with_bonus() -> f64 {
    15.0
}
fn default_tag_match() -> f64 {
    20.0
}
fn default_url_match() -> f64 {
    3.0
}
fn default_path_match() -> f64 {
    5.0
}
fn default_all_words_bonus() -> f64 {
    1.5
}
fn default_visit_count() -> f64 {
    5.0
}
fn default_recency() -> f64 {
    10.0
}

/// Coefficients for every scoring term. Treated as opaque parameters by the
/// scorer; only non-negative values make sense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Weights {
    #[serde(default = "default_title_match")]
    pub title_match: f64,
    #[serde(default = "default_starts_with_bonus")]
    pub starts_with_bonus: f64,
    #[serde(default = "default_tag_match")]
    pub tag_match: f64,
    #[serde(default = "default_url_match")]
    pub url_match: f64,
    #[serde(default = "default_path_match")]
    pub path_match: f64,
    #[serde(default = "default_all_words_bonus")]
    pub all_words_bonus: f64,
    #[serde(default = "default_visit_count")]
    pub visit_count: f64,
    #[serde(default = "default_recency")]
    pub recency: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            title_match: default_title_match(),
            starts_with_bonus: default_starts_with_bonus(),
            tag_match: default_tag_match(),
            url_match: default_url_match(),
            path_match: default_path_match(),
            all_words_bonus: default_all_words_bonus(),
            visit_count: default_visit_count(),
            recency: default_recency(),
        }
    }
}

impl Weights {
    /// Parse a JSON weights object, merging recognized keys over the
    /// defaults. A config that does not parse at all yields the defaults.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(weights) => weights,
            Err(e) => {
                log::warn!("Malformed weights config, using defaults: {}", e);
                Self::default()
            }
        }
    }
}
