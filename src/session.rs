//! Long-lived per-popup-session state.
//!
//! Everything the search mutates or reads across invocations lives here and
//! is passed in explicitly rather than hiding in statics. One logical thread
//! of execution, so no locking.

use crate::config::Weights;
use crate::domains::DomainScores;
use crate::enrich::VisitCache;
use crate::tags::TagStore;
use serde::{Deserialize, Serialize};

/// The shared side tables plus scoring weights for one session.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Session {
    pub tags: TagStore,
    pub domains: DomainScores,
    pub visits: VisitCache,
    pub weights: Weights,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: Weights) -> Self {
        Self {
            weights,
            ..Self::default()
        }
    }

    /// The user opened a result: learn its domain.
    pub fn record_selection(&mut self, url: &str) {
        self.domains.record_selection(url);
    }
}
