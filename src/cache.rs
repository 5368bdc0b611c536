//! Durable storage for the session side tables.
//!
//! The search core mutates the tag store, domain scores and visit cache in
//! place; this module is the collaborator half that writes them to disk
//! after a query and loads them back at popup startup. Bincode under the
//! platform data directory.

use crate::session::Session;
use crate::{Error, Result};
use dirs::data_dir;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

const STORE_FILE: &str = "session.cache";

/// The default store directory, `<data_dir>/quickmark`.
pub fn default_store_dir() -> Result<PathBuf> {
    Ok(data_dir().ok_or(Error::NoDataDir)?.join("quickmark"))
}

/// Save a session's side tables under the given directory.
pub fn save_session_to(dir: &Path, session: &Session) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }

    let encoded = bincode::serialize(session)?;
    let mut file = File::create(dir.join(STORE_FILE))?;
    file.write_all(&encoded)?;
    Ok(())
}

/// Load a session from the given directory, or a fresh one when nothing was
/// saved yet. A corrupt store file is treated as absent.
pub fn load_session_from(dir: &Path) -> Session {
    let path = dir.join(STORE_FILE);
    if !path.exists() {
        return Session::new();
    }

    let result = File::open(&path).and_then(|mut file| {
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)?;
        Ok(buffer)
    });

    match result {
        Ok(buffer) => bincode::deserialize(&buffer).unwrap_or_else(|e| {
            log::warn!("Discarding corrupt session store {:?}: {}", path, e);
            Session::new()
        }),
        Err(e) => {
            log::warn!("Could not read session store {:?}: {}", path, e);
            Session::new()
        }
    }
}

/// Save to the default platform location.
pub fn save_session(session: &Session) -> Result<()> {
    save_session_to(&default_store_dir()?, session)
}

/// Load from the default platform location.
pub fn load_session() -> Result<Session> {
    Ok(load_session_from(&default_store_dir()?))
}
