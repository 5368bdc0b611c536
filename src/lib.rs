//! Fuzzy bookmark search core.
//!
//! Takes a raw query plus a candidate set of bookmarks (annotated with folder
//! path, tags, visit counts and domain affinity) and produces an ordered,
//! deduplicated result list:
//!
//! - `query` parses term tokens and `#tag` filters
//! - `tags` narrows candidates by tag filters
//! - `score` runs the cheap lexical pass over every candidate
//! - `enrich` adds visit-count/recency bonuses for the provisional top 25
//! - `results` dedups by URL and applies the final ordering and caps
//!
//! Shared mutable state (tag store, domain scores, visit cache, weights) lives
//! in a [`Session`] owned by the caller and passed into each search.

use thiserror::Error;

pub mod bookmarks;
pub mod cache;
pub mod config;
pub mod db;
pub mod distance;
pub mod domains;
pub mod enrich;
pub mod history;
pub mod host;
pub mod query;
pub mod results;
pub mod score;
pub mod session;
pub mod tags;

pub use bookmarks::Bookmark;
pub use config::Weights;
pub use host::{HistoryIndex, HistoryRecord};
pub use results::{ResultSource, SearchResult};
pub use session::Session;

/// Errors surfaced by the library API.
///
/// Collaborator failures inside a running search (bad URLs, empty history
/// lookups) never show up here; they degrade to "no bonus" locally.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("history database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("cache codec error: {0}")]
    Cache(#[from] bincode::Error),
    #[error("no platform data directory available")]
    NoDataDir,
}

pub type Result<T> = std::result::Result<T, Error>;
