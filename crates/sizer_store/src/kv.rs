//! Key-value storage backends.
//!
//! Repositories keep each collection as one JSON document under a fixed key.
//! The file-backed store writes one `<key>.json` file per key:
//!
//! ```text
//! <data-dir>/
//! ├── dwh_sizer_history.json
//! └── dwh_sizer_saved_configs.json
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};

/// A string key-value store.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&mut self, key: &str) -> StoreResult<()>;
    fn keys(&self) -> StoreResult<Vec<String>>;
}

/// In-memory store, lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

/// Directory-backed store with one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root)?;
        fs::write(&path, value)?;
        debug!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// Read a JSON collection stored under `key`.
///
/// Missing keys and unparseable documents both read as the default value;
/// the latter is logged.
pub(crate) fn read_collection<T, S>(store: &S, key: &str) -> StoreResult<T>
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(T::default());
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!("Ignoring corrupt data under '{}': {}", key, e);
            Ok(T::default())
        }
    }
}

/// Read a collection that is about to be rewritten.
///
/// An unparseable document is copied to a `<key>.corrupt-<timestamp>` key
/// first, so the following write never replaces the only copy. If that copy
/// cannot be stored the error is returned and nothing is rewritten.
pub(crate) fn read_collection_for_update<T, S>(store: &mut S, key: &str) -> StoreResult<T>
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(T::default());
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            let backup = corrupt_backup_key(key);
            store.set(&backup, &raw)?;
            warn!("Moved corrupt data under '{}' to '{}': {}", key, backup, e);
            Ok(T::default())
        }
    }
}

/// Key that a corrupt document under `key` is preserved at.
fn corrupt_backup_key(key: &str) -> String {
    format!("{}.corrupt-{}", key, Utc::now().format("%Y%m%dT%H%M%S%3f"))
}

pub(crate) fn write_collection<T, S>(store: &mut S, key: &str, value: &T) -> StoreResult<()>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string_pretty(value)?;
    store.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a").unwrap(), None);
        store.set("b", "2").unwrap();
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(store.keys().unwrap(), vec!["a", "b"]);
        store.remove("a").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["b"]);
    }

    #[test]
    fn test_file_store_creates_directory() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("nested").join("data");
        let mut store = FileStore::new(&root);

        assert!(store.keys().unwrap().is_empty());
        store.set("dwh_sizer_history", "[]").unwrap();
        assert!(root.join("dwh_sizer_history.json").exists());
        assert_eq!(store.get("dwh_sizer_history").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.keys().unwrap(), vec!["dwh_sizer_history"]);

        store.remove("dwh_sizer_history").unwrap();
        store.remove("dwh_sizer_history").unwrap();
        assert_eq!(store.get("dwh_sizer_history").unwrap(), None);
    }

    #[test]
    fn test_file_store_rejects_path_keys() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        assert!(matches!(store.set("../escape", "x"), Err(StoreError::InvalidKey(_))));
        assert!(matches!(store.get(""), Err(StoreError::InvalidKey(_))));
    }

    #[test]
    fn test_corrupt_collection_is_kept_before_rewrite() {
        let mut store = MemoryStore::new();
        store.set("items", "[\"a\",").unwrap();

        let items: Vec<String> = read_collection_for_update(&mut store, "items").unwrap();
        assert!(items.is_empty());

        let keys = store.keys().unwrap();
        assert_eq!(keys.len(), 2);
        let backup = keys.iter().find(|k| k.starts_with("items.corrupt-")).unwrap();
        assert_eq!(store.get(backup).unwrap().as_deref(), Some("[\"a\","));
    }

    #[test]
    fn test_failed_backup_stops_rewrite() {
        let mut store = MockKeyValueStore::new();
        store.expect_get().returning(|_| Ok(Some("{oops".to_string())));
        store
            .expect_set()
            .returning(|_, _| Err(StoreError::Backend("read-only".to_string())));

        let result: StoreResult<Vec<String>> = read_collection_for_update(&mut store, "items");
        assert!(matches!(result, Err(StoreError::Backend(_))));
    }

    #[test]
    fn test_corrupt_collection_reads_as_default() {
        let mut store = MemoryStore::new();
        store.set("items", "{not json").unwrap();
        let items: Vec<String> = read_collection(&store, "items").unwrap();
        assert!(items.is_empty());
    }
}
