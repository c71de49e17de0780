//! Persistent key/value storage.
//!
//! Storage holds serialized text only; encoding and decoding of values is
//! owned by the `DataManager`. Two backends are provided:
//! - `MemoryStore`: process-local map, handy for tests and ephemeral runs
//! - `DirStore`: one `<key>.json` file per key under a directory

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{DataError, Result};

/// Synchronous key to string storage.
pub trait KeyValueStore: Send + Sync {
    /// Read the text stored under `key`, or `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory-backed storage, one file per key.
#[derive(Debug, Clone)]
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    pub fn new(dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&dir).map_err(|e| DataError::io(&dir, e))?;
        Ok(Self { dir })
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_key(key)))
    }
}

impl KeyValueStore for DirStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.entry_path(key);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DataError::io(path, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.entry_path(key);
        std::fs::write(&path, value).map_err(|e| DataError::io(path, e))
    }
}

/// Map a storage key onto a file stem, percent-escaping anything outside `[A-Za-z0-9_-]`.
fn sanitize_key(key: &str) -> String {
    let mut stem = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            stem.push(byte as char);
        } else {
            stem.push_str(&format!("%{:02X}", byte));
        }
    }
    stem
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_get_set() {
        let store = MemoryStore::new();
        assert_eq!(store.get("cache_hotList").unwrap(), None);

        store.set("cache_hotList", "[1,2]").unwrap();
        assert_eq!(store.get("cache_hotList").unwrap().as_deref(), Some("[1,2]"));

        store.set("cache_hotList", "[]").unwrap();
        assert_eq!(store.get("cache_hotList").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_dir_store_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("storage");

        let store = DirStore::new(dir.clone()).unwrap();
        store.set("cache_chartData", r#"{"dates":[]}"#).unwrap();
        assert!(dir.join("cache_chartData.json").exists());

        let reopened = DirStore::new(dir).unwrap();
        assert_eq!(
            reopened.get("cache_chartData").unwrap().as_deref(),
            Some(r#"{"dates":[]}"#)
        );
    }

    #[test]
    fn test_dir_store_missing_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = DirStore::new(temp_dir.path().to_path_buf()).unwrap();
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_sanitize_key() {
        assert_eq!(sanitize_key("cache_hotList"), "cache_hotList");
        assert_eq!(sanitize_key("../etc"), "%2E%2E%2Fetc");
        assert_eq!(sanitize_key("a b"), "a%20b");
        assert_ne!(sanitize_key("热榜"), sanitize_key("榜热"));
    }
}
