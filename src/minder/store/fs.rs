//! Snapshot persistence.
//!
//! The whole [`Store`] round-trips through one JSON file. Saves go through a
//! sibling temp file followed by a rename, so an interrupted write never
//! corrupts the previous snapshot. A snapshot that exists but cannot be
//! decoded surfaces as [`MinderError::CorruptStore`]; callers choose between
//! [`load`] (strict) and [`load_or_empty`] (start over).

use super::Store;
use crate::error::{MinderError, Result};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

pub const STORE_FILENAME: &str = "store.json";

/// Platform data directory for the snapshot, e.g.
/// `~/.local/share/minder/store.json` on Linux.
pub fn default_store_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "minder", "minder")
        .map(|dirs| dirs.data_dir().join(STORE_FILENAME))
}

/// Load the snapshot at `path`. A missing file is an empty store; a file
/// that cannot be read or decoded is `CorruptStore`.
pub fn load(path: &Path) -> Result<Store> {
    if !path.exists() {
        debug!("no snapshot at {}, starting empty", path.display());
        return Ok(Store::default());
    }
    let content = fs::read_to_string(path)
        .map_err(|e| MinderError::CorruptStore(format!("cannot read {}: {}", path.display(), e)))?;
    serde_json::from_str(&content).map_err(|e| {
        MinderError::CorruptStore(format!("cannot decode {}: {}", path.display(), e))
    })
}

/// Like [`load`], but degrades a corrupt snapshot to an empty store. The
/// old file stays on disk until the next save.
pub fn load_or_empty(path: &Path) -> Store {
    match load(path) {
        Ok(store) => store,
        Err(e) => {
            warn!("discarding corrupt snapshot: {}", e);
            Store::default()
        }
    }
}

pub fn save(store: &Store, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(store)?;

    // temp-then-rename keeps the previous snapshot intact if we die mid-write
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)?;
    debug!("snapshot saved to {}", path.display());
    Ok(())
}
