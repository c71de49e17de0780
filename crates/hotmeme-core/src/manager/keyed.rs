use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::options::{LoadOptions, PersistTarget, SaveOptions, Source};
use crate::error::{DataError, Result};
use crate::files::FileStore;
use crate::network::{HttpTransport, RequestOptions};
use crate::storage::KeyValueStore;

/// Where a loaded value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Cache,
    Storage,
    File,
    Network,
    Inline,
}

/// Outcome of a successful load.
#[derive(Debug)]
pub struct Loaded {
    pub value: Value,
    pub origin: Origin,
    /// Set when the value loaded fine but the write-through failed.
    pub persist_error: Option<DataError>,
}

/// Cache-aside manager over storage, file and network sources.
///
/// The cache holds only successfully resolved or explicitly saved values;
/// a load that falls back to its default never populates it.
pub struct DataManager {
    cache: HashMap<String, Value>,
    storage: Box<dyn KeyValueStore>,
    files: FileStore,
    http: Arc<dyn HttpTransport>,
}

impl DataManager {
    pub fn new(
        storage: impl KeyValueStore + 'static,
        files: FileStore,
        http: impl HttpTransport + 'static,
    ) -> Self {
        Self {
            cache: HashMap::new(),
            storage: Box::new(storage),
            files,
            http: Arc::new(http),
        }
    }

    pub fn files(&self) -> &FileStore {
        &self.files
    }

    // ===== Load =====

    /// Load `key`, reporting exactly what happened.
    pub async fn try_load(&mut self, key: &str, options: &LoadOptions) -> Result<Loaded> {
        check_key(key)?;

        if !options.force_refresh {
            if let Some(value) = self.cache.get(key) {
                debug!(key = key, "Cache hit");
                return Ok(Loaded {
                    value: value.clone(),
                    origin: Origin::Cache,
                    persist_error: None,
                });
            }
        }

        let source = options
            .source
            .source()
            .ok_or_else(|| DataError::Config(format!("no data source specified for '{}'", key)))?;

        let (value, origin) = self.resolve(source).await?;
        debug!(key = key, origin = ?origin, "Resolved data");
        self.cache.insert(key.to_string(), value.clone());

        let persist_error = match options.persist_to {
            Some(ref target) => match self.persist(target, &value).await {
                Ok(()) => None,
                Err(e) => {
                    warn!(key = key, persist_to = %target, error = %e, "Write-through after load failed");
                    Some(e)
                }
            },
            None => None,
        };

        Ok(Loaded {
            value,
            origin,
            persist_error,
        })
    }

    /// Load `key`, degrading to the configured default (or `null`) on failure.
    pub async fn load(&mut self, key: &str, options: &LoadOptions) -> Value {
        match self.try_load(key, options).await {
            Ok(loaded) => loaded.value,
            Err(e) => {
                if matches!(e, DataError::Missing(_)) {
                    debug!(key = key, error = %e, "No stored data, using default");
                } else {
                    warn!(key = key, error = %e, "Failed to load data, using default");
                }
                options.default_value.clone().unwrap_or(Value::Null)
            }
        }
    }

    async fn resolve(&self, source: Source<'_>) -> Result<(Value, Origin)> {
        match source {
            Source::Storage(storage_key) => Ok((self.read_storage(storage_key)?, Origin::Storage)),
            Source::File(path) => Ok((self.read_file(path).await?, Origin::File)),
            Source::Network { url, request } => {
                Ok((self.fetch_remote(url, request).await?, Origin::Network))
            }
            Source::Inline(value) => Ok((value.clone(), Origin::Inline)),
        }
    }

    fn read_storage(&self, storage_key: &str) -> Result<Value> {
        match self.storage.get(storage_key)? {
            Some(text) if !text.is_empty() => serde_json::from_str(&text)
                .map_err(|e| DataError::parse(format!("storage key '{}'", storage_key), e)),
            _ => Err(DataError::Missing(storage_key.to_string())),
        }
    }

    async fn read_file(&self, path: &str) -> Result<Value> {
        let text = self.files.read_text(path).await?;
        serde_json::from_str(&text).map_err(|e| DataError::parse(format!("file '{}'", path), e))
    }

    /// Fetch a remote document without touching the cache.
    ///
    /// A 200 body that is not JSON comes back as a JSON string.
    pub async fn fetch_remote(&self, url: &str, request: &RequestOptions) -> Result<Value> {
        let response = self.http.request(url, request).await?;
        if !response.is_ok() {
            return Err(DataError::from_status(response.status, &response.body));
        }
        Ok(serde_json::from_str(&response.body).unwrap_or(Value::String(response.body)))
    }

    // ===== Save =====

    /// Cache `value` under `key` and write it to the named target, if any.
    pub async fn try_save(&mut self, key: &str, value: Value, options: &SaveOptions) -> Result<()> {
        check_key(key)?;
        let result = match options.target {
            Some(ref target) => self.persist(target, &value).await,
            None => Ok(()),
        };
        self.cache.insert(key.to_string(), value);
        result
    }

    pub async fn save(&mut self, key: &str, value: Value, options: &SaveOptions) -> bool {
        match self.try_save(key, value, options).await {
            Ok(()) => true,
            Err(e) => {
                warn!(key = key, error = %e, "Failed to save data");
                false
            }
        }
    }

    async fn persist(&self, target: &PersistTarget, value: &Value) -> Result<()> {
        let written = match target {
            PersistTarget::Storage(storage_key) => serde_json::to_string(value)
                .map_err(|e| DataError::parse("value for storage", e))
                .and_then(|text| self.storage.set(storage_key, &text)),
            PersistTarget::File(path) => match serde_json::to_string_pretty(value) {
                Ok(text) => self.files.write_text(path, &text).await,
                Err(e) => Err(DataError::parse("value for file", e)),
            },
        };
        written.map_err(|e| DataError::persist(target.to_string(), e))
    }

    // ===== Cache access =====

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.cache.get(key)
    }

    /// Typed view of a cached value; `None` when absent or of another shape.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.cache.get(key)?;
        match serde_json::from_value(value.clone()) {
            Ok(typed) => Some(typed),
            Err(e) => {
                warn!(key = key, error = %e, "Cached value has unexpected shape");
                None
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.cache.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Drop one entry, or every entry when `key` is `None`.
    pub fn clear(&mut self, key: Option<&str>) {
        match key {
            Some(key) => {
                self.cache.remove(key);
            }
            None => self.cache.clear(),
        }
    }
}

fn check_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(DataError::Config("data key must not be empty".to_string()));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
