//! Small on-device key-value store.
//!
//! Holds the last known copy of a screen's list as a fallback when the backend cannot be
//! reached. It is never treated as a source of truth: screens always reload from the network
//! first and only consult the store after a failed or empty load.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read local store {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write local store {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode local store value: {0}")]
    Encode(serde_json::Error),
    #[error("failed to decode local store: {0}")]
    Decode(serde_json::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// JSON file of string keys to arbitrary values.
///
/// Every `put` rewrites the whole file; the store only ever holds a handful of entries.
#[derive(Debug)]
pub struct LocalStore {
    path: Option<PathBuf>,
    entries: Mutex<BTreeMap<String, Value>>,
}

impl LocalStore {
    /// Opens (or lazily creates) the store file at `path`.
    ///
    /// A missing file is an empty store; the file and its parent directory are created on the
    /// first `put`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents).map_err(StoreError::Decode)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Read { path, source }),
        };

        Ok(Self {
            path: Some(path),
            entries: Mutex::new(entries),
        })
    }

    /// A store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let entries = self.lock();
        entries
            .get(key)
            .cloned()
            .map(serde_json::from_value)
            .transpose()
            .map_err(StoreError::Decode)
    }

    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> StoreResult<()> {
        let value = serde_json::to_value(value).map_err(StoreError::Encode)?;
        let mut entries = self.lock();
        entries.insert(key.to_string(), value);
        self.flush(&entries)
    }

    fn flush(&self, entries: &BTreeMap<String, Value>) -> StoreResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let contents = serde_json::to_string_pretty(entries).map_err(StoreError::Encode)?;
        std::fs::write(path, contents).map_err(|source| StoreError::Write {
            path: path.clone(),
            source,
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, Value>> {
        // A panic while holding the lock leaves the map itself intact.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("nested").join("app_pref.json");

        let store = LocalStore::open(&path).expect("open should succeed");
        store
            .put("daily_activities", &vec!["📖 Kể chuyện".to_string()])
            .expect("put should succeed");

        let reopened = LocalStore::open(&path).expect("reopen should succeed");
        let value: Option<Vec<String>> = reopened.get("daily_activities").unwrap();
        assert_eq!(value, Some(vec!["📖 Kể chuyện".to_string()]));
    }

    #[test]
    fn test_missing_key_is_none() {
        let store = LocalStore::in_memory();
        let value: Option<u32> = store.get("nothing").unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_corrupt_file_is_decode_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("app_pref.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(LocalStore::open(&path), Err(StoreError::Decode(_))));
    }
}
