//! SQLite-backed history index for Chromium-family browsers.
//!
//! Browsers keep the `History` database locked while running, so we read
//! through a temporary copy. Timestamps in the `urls`/`visits` tables are
//! microseconds since 1601-01-01 (the WebKit epoch) and get converted to
//! UTC on the way out.

use crate::host::{HistoryIndex, HistoryRecord};
use crate::Result;
use chrono::{DateTime, TimeZone, Utc};
use rusqlite::{params, Connection};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Seconds between the WebKit epoch (1601-01-01) and the Unix epoch.
const WEBKIT_EPOCH_OFFSET: i64 = 11_644_473_600;

fn webkit_to_utc(micros: i64) -> Option<DateTime<Utc>> {
    let secs = micros / 1_000_000 - WEBKIT_EPOCH_OFFSET;
    Utc.timestamp_opt(secs, 0).single()
}

fn utc_to_webkit(time: DateTime<Utc>) -> i64 {
    (time.timestamp() + WEBKIT_EPOCH_OFFSET) * 1_000_000
}

/// Create a temporary copy of an SQLite database for safe reading.
pub fn create_temp_db_copy(db_path: &Path) -> Result<(NamedTempFile, Connection)> {
    log::trace!("Copying history database {:?}", db_path);
    let temp_file = NamedTempFile::new()?;
    fs::copy(db_path, temp_file.path())?;
    let conn = Connection::open(temp_file.path())?;
    Ok((temp_file, conn))
}

/// A `HistoryIndex` over a copied Chromium `History` database.
///
/// The connection sits behind a mutex so the enrichment batch can share the
/// index across its rayon workers.
pub struct SqliteHistoryIndex {
    _temp: NamedTempFile,
    conn: Mutex<Connection>,
}

impl SqliteHistoryIndex {
    /// Open a browser's `History` database by copying it first.
    pub fn open(db_path: &Path) -> Result<Self> {
        let (temp, conn) = create_temp_db_copy(db_path)?;
        Ok(Self {
            _temp: temp,
            conn: Mutex::new(conn),
        })
    }
}

impl HistoryIndex for SqliteHistoryIndex {
    fn search(
        &self,
        query: &str,
        max_results: usize,
        start_time: DateTime<Utc>,
    ) -> Result<Vec<HistoryRecord>> {
        let sql = "SELECT title, url, last_visit_time
             FROM urls
             WHERE title IS NOT NULL AND title != ''
               AND last_visit_time >= ?1
               AND (title LIKE ?2 OR url LIKE ?2)
             ORDER BY last_visit_time DESC
             LIMIT ?3";

        let pattern = format!("%{}%", query.trim());
        let conn = self.conn.lock().unwrap_or_else(|e| e.into_inner());
        let mut stmt = conn.prepare(sql)?;
        let records = stmt
            .query_map(
                params![utc_to_webkit(start_time), pattern, max_results as i64],
                |row| {
                    let title: String = row.get(0)?;
                    let url: String = row.get(1)?;
                    let last_visit: i64 = row.get(2)?;
                    Ok(HistoryRecord {
                        title,
                        url,
                        last_visit_time: webkit_to_utc(last_visit),
                    })
                },
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }

    fn visits(&self, url: &str) -> Result<Vec<DateTime<Utc>>> {
        let sql = "SELECT v.visit_time
             FROM visits AS v
             JOIN urls AS u ON v.url = u.id
             WHERE u.url = ?1
             ORDER BY v.visit_time DESC";

        let conn = self.conn.lock().unwrap_or_else(|e| e.into_inner());
        let mut stmt = conn.prepare(sql)?;
        let times = stmt
            .query_map(params![url], |row| row.get::<_, i64>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(times.into_iter().filter_map(webkit_to_utc).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_history(conn: &Connection) {
        conn.execute_batch(
            "CREATE TABLE urls (
                 id INTEGER PRIMARY KEY,
                 url TEXT,
                 title TEXT,
                 visit_count INTEGER,
                 last_visit_time INTEGER
             );
             CREATE TABLE visits (
                 id INTEGER PRIMARY KEY,
                 url INTEGER,
                 visit_time INTEGER
             );",
        )
        .unwrap();
    }

    fn index_with_rows() -> SqliteHistoryIndex {
        let temp = NamedTempFile::new().unwrap();
        let conn = Connection::open(temp.path()).unwrap();
        seed_history(&conn);

        let now = Utc::now();
        let t0 = utc_to_webkit(now);
        let t1 = utc_to_webkit(now - chrono::Duration::days(1));
        conn.execute(
            "INSERT INTO urls (id, url, title, visit_count, last_visit_time)
             VALUES (1, 'https://github.com', 'GitHub', 2, ?1)",
            params![t0],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO visits (url, visit_time) VALUES (1, ?1), (1, ?2)",
            params![t1, t0],
        )
        .unwrap();
        drop(conn);

        SqliteHistoryIndex::open(temp.path()).unwrap()
    }

    #[test]
    fn search_matches_title_or_url() {
        let index = index_with_rows();
        let epoch = Utc.timestamp_opt(0, 0).unwrap();

        let hits = index.search("github", 50, epoch).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "GitHub");
        assert!(hits[0].last_visit_time.is_some());

        assert!(index.search("zzz", 50, epoch).unwrap().is_empty());
    }

    #[test]
    fn visits_are_newest_first() {
        let index = index_with_rows();
        let visits = index.visits("https://github.com").unwrap();
        assert_eq!(visits.len(), 2);
        assert!(visits[0] > visits[1]);
    }

    #[test]
    fn epoch_conversion_round_trips() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        assert_eq!(webkit_to_utc(utc_to_webkit(now)), Some(now));
    }
}
