// src/main.rs
use std::env;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use quickmark::db::SqliteHistoryIndex;
use quickmark::host::{HistoryIndex, MemoryHistoryIndex};
use quickmark::{bookmarks, cache, history, Bookmark};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let start = Instant::now();

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("bookmarks");
    let query = args.get(2).map(|s| s.as_str()).unwrap_or("");

    // The real popup talks to the browser's history service; the CLI reads a
    // copied Chromium History database when one is pointed at.
    let index: Box<dyn HistoryIndex> = match env::var("QUICKMARK_HISTORY_DB") {
        Ok(path) => Box::new(SqliteHistoryIndex::open(&PathBuf::from(path))?),
        Err(_) => Box::new(MemoryHistoryIndex::new()),
    };

    let results = match command {
        "history" => history::search(query, index.as_ref())?,
        _ => {
            let mut session = cache::load_session()?;
            let marks = load_bookmarks()?;
            let results = bookmarks::search(query, &marks, &mut session, index.as_ref());
            cache::save_session(&session)?;
            results
        }
    };

    println!("{}", serde_json::to_string(&results)?);
    log::debug!("Search completed in {:?}", start.elapsed());
    Ok(())
}

/// Read the flattened bookmark list maintained by the tree-cache side.
fn load_bookmarks() -> Result<Vec<Bookmark>, Box<dyn Error>> {
    let path = match env::var("QUICKMARK_BOOKMARKS") {
        Ok(path) => PathBuf::from(path),
        Err(_) => cache::default_store_dir()?.join("bookmarks.json"),
    };

    if !path.exists() {
        log::warn!("No bookmark list at {:?}", path);
        return Ok(Vec::new());
    }

    let raw = fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&raw)?)
}
