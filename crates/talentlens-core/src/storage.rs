//! String key/value persistence behind the session store.
//!
//! [`FileStorage`] is the durable backend: one JSON object on disk, loaded
//! once and written through on every change. [`MemoryStorage`] backs tests
//! and is the fallback when the file cannot be used.

use crate::{Error, Result};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Key holding `"light"` or `"dark"`.
pub const THEME_KEY: &str = "theme";

/// Key holding a JSON array of recent queries, newest first.
pub const HISTORY_KEY: &str = "searchHistory";

/// Capability the session store persists through.
///
/// Absence of a key is a normal state and reads as `Ok(None)`. `Err` means
/// the backend itself is unusable.
pub trait StorageBackend: Send {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory backend. Clones share the same entries, so a second store built
/// from a clone observes what the first one persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| Error::StorageUnavailable("memory storage mutex poisoned".to_string()))
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// Durable backend: a flat JSON object of string values.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open (or lazily create) the store at `path`.
    ///
    /// A missing file is an empty store. An unreadable or malformed file is
    /// also read as empty; it is overwritten on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("Ignoring malformed storage file {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!("Unable to read storage file {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        debug!("Opened storage {} ({} keys)", path.display(), entries.len());
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let storage_err = |e: std::io::Error| {
            Error::StorageUnavailable(format!("{}: {}", self.path.display(), e))
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(storage_err)?;
        }

        let content = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content).map_err(storage_err)?;
        std::fs::rename(&tmp, &self.path).map_err(storage_err)?;
        Ok(())
    }
}

impl StorageBackend for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clones_share_entries() {
        let mut a = MemoryStorage::new();
        let b = a.clone();
        a.set(THEME_KEY, "light").unwrap();
        assert_eq!(b.get(THEME_KEY).unwrap().as_deref(), Some("light"));

        a.remove(THEME_KEY).unwrap();
        assert_eq!(b.get(THEME_KEY).unwrap(), None);
    }

    #[test]
    fn file_storage_round_trips_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("storage.json");

        let mut store = FileStorage::open(&path);
        assert_eq!(store.get(THEME_KEY).unwrap(), None);
        store.set(THEME_KEY, "dark").unwrap();
        store.set(HISTORY_KEY, r#"["java"]"#).unwrap();

        let reopened = FileStorage::open(&path);
        assert_eq!(reopened.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(
            reopened.get(HISTORY_KEY).unwrap().as_deref(),
            Some(r#"["java"]"#)
        );
    }

    #[test]
    fn file_storage_remove_drops_key_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let mut store = FileStorage::open(&path);
        store.set(HISTORY_KEY, "[]").unwrap();
        store.remove(HISTORY_KEY).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(!raw.contains(HISTORY_KEY));
        assert_eq!(FileStorage::open(&path).get(HISTORY_KEY).unwrap(), None);
    }

    #[test]
    fn malformed_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "{not json").unwrap();

        let mut store = FileStorage::open(&path);
        assert_eq!(store.get(THEME_KEY).unwrap(), None);
        store.set(THEME_KEY, "light").unwrap();
        assert_eq!(
            FileStorage::open(&path).get(THEME_KEY).unwrap().as_deref(),
            Some("light")
        );
    }

    #[test]
    fn unwritable_location_is_storage_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        // Parent "directory" is a regular file, so creating it fails.
        let mut store = FileStorage::open(blocker.join("storage.json"));
        let err = store.set(THEME_KEY, "dark").unwrap_err();
        assert!(matches!(err, Error::StorageUnavailable(_)));
        // The value is still visible for the rest of the session.
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }
}
