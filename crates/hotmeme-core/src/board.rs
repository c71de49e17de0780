//! Trending-meme board: the data loader the presentation layer talks to.
//!
//! Three documents live in the manager under fixed keys, each mirrored to
//! persistent storage so a refresh survives restarts:
//!
//! | key          | storage mirror     | bundled fallback          |
//! |--------------|--------------------|---------------------------|
//! | `hotList`    | `cache_hotList`    | `snapshot::hot_list()`    |
//! | `chartData`  | `cache_chartData`  | `snapshot::chart_data()`  |
//! | `updateInfo` | `cache_updateInfo` | `snapshot::update_info()` |

use anyhow::Context;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{DataError, Result};
use crate::files::FileStore;
use crate::manager::{DataManager, LoadOptions, PersistTarget, SaveOptions};
use crate::models::{ChartDocument, TrendingItem, UpdateInfo};
use crate::network::{HttpClient, RequestOptions};
use crate::snapshot;
use crate::storage::DirStore;

pub const HOT_LIST_KEY: &str = "hotList";
pub const CHART_DATA_KEY: &str = "chartData";
pub const UPDATE_INFO_KEY: &str = "updateInfo";

struct Slot {
    key: &'static str,
    storage_key: &'static str,
    bundled: fn() -> Value,
}

static SLOTS: [Slot; 3] = [
    Slot {
        key: HOT_LIST_KEY,
        storage_key: "cache_hotList",
        bundled: snapshot::hot_list,
    },
    Slot {
        key: CHART_DATA_KEY,
        storage_key: "cache_chartData",
        bundled: snapshot::chart_data,
    },
    Slot {
        key: UPDATE_INFO_KEY,
        storage_key: "cache_updateInfo",
        bundled: snapshot::update_info,
    },
];

fn slot(key: &str) -> &'static Slot {
    match key {
        HOT_LIST_KEY => &SLOTS[0],
        CHART_DATA_KEY => &SLOTS[1],
        _ => &SLOTS[2],
    }
}

/// Remote bundle shape; every part is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LatestBundle {
    #[serde(default)]
    hot_list: Option<Value>,
    #[serde(default)]
    chart_data: Option<Value>,
    #[serde(default)]
    update_info: Option<Value>,
}

pub struct MemeBoard {
    manager: DataManager,
}

impl MemeBoard {
    pub fn new(manager: DataManager) -> Self {
        Self { manager }
    }

    /// Build a board backed by the directories named in `config`.
    pub fn open(config: &Config) -> anyhow::Result<Self> {
        let storage_dir = config.storage_dir()?;
        let storage = DirStore::new(storage_dir.clone())
            .with_context(|| format!("Failed to open storage at {}", storage_dir.display()))?;
        let files = FileStore::new(config.files_root()?);
        let http = HttpClient::with_timeout(config.request_timeout())
            .context("Failed to build HTTP client")?;
        Ok(Self::new(DataManager::new(storage, files, http)))
    }

    pub fn manager(&self) -> &DataManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut DataManager {
        &mut self.manager
    }

    /// Populate every document, preferring the stored copy from an earlier
    /// refresh and falling back to the bundled snapshot.
    ///
    /// Returns how many documents came from the bundled snapshots.
    pub async fn init_all(&mut self) -> usize {
        let mut from_bundle = 0;
        for slot in &SLOTS {
            let stored = self
                .manager
                .try_load(slot.key, &LoadOptions::from_storage(slot.storage_key))
                .await;
            match stored {
                Ok(_) => {
                    debug!(key = slot.key, "Loaded stored copy");
                    continue;
                }
                Err(DataError::Missing(_)) => {}
                Err(e) => warn!(key = slot.key, error = %e, "Stored copy unusable, using bundled snapshot"),
            }

            let opts = LoadOptions::from_value((slot.bundled)())
                .persist_to(PersistTarget::Storage(slot.storage_key.to_string()));
            self.manager.load(slot.key, &opts).await;
            from_bundle += 1;
        }
        info!(from_bundle = from_bundle, "All data initialized");
        from_bundle
    }

    /// Fetch the latest bundle from `url` and store every part it carries.
    ///
    /// Returns the keys that were updated.
    pub async fn load_latest(&mut self, url: &str) -> Result<Vec<&'static str>> {
        let request = RequestOptions::default().with_header("accept", "application/json");
        let value = self.manager.fetch_remote(url, &request).await?;
        let bundle: LatestBundle =
            serde_json::from_value(value).map_err(|e| DataError::parse("remote bundle", e))?;

        let parts = [
            (HOT_LIST_KEY, bundle.hot_list),
            (CHART_DATA_KEY, bundle.chart_data),
            (UPDATE_INFO_KEY, bundle.update_info),
        ];

        let mut updated = Vec::new();
        for (key, part) in parts {
            let Some(part) = part else { continue };
            let opts = SaveOptions::to_storage(slot(key).storage_key);
            if !self.manager.save(key, part, &opts).await {
                warn!(key = key, "Updated in memory only, storage write failed");
            }
            updated.push(key);
        }

        info!(url = url, updated = ?updated, "Loaded latest data");
        Ok(updated)
    }

    /// Re-read `key` from its storage mirror; a failed re-read keeps the
    /// current cache entry.
    async fn reload(&mut self, key: &str) {
        let opts = LoadOptions::from_storage(slot(key).storage_key).force_refresh();
        if let Err(e) = self.manager.try_load(key, &opts).await {
            debug!(key = key, error = %e, "Reload from storage failed, keeping cached value");
        }
    }

    pub async fn hot_list(&mut self, force_refresh: bool) -> Vec<TrendingItem> {
        if force_refresh {
            self.reload(HOT_LIST_KEY).await;
        }
        self.manager.get_as(HOT_LIST_KEY).unwrap_or_default()
    }

    pub async fn chart_data(&mut self, force_refresh: bool) -> ChartDocument {
        if force_refresh {
            self.reload(CHART_DATA_KEY).await;
        }
        self.manager.get_as(CHART_DATA_KEY).unwrap_or_default()
    }

    pub async fn update_info(&mut self, force_refresh: bool) -> UpdateInfo {
        if force_refresh {
            self.reload(UPDATE_INFO_KEY).await;
        }
        self.manager.get_as(UPDATE_INFO_KEY).unwrap_or_default()
    }

    /// Write `value` as pretty JSON under the file root.
    pub async fn export_to_file(&self, file_name: &str, value: &Value) -> bool {
        let text = match serde_json::to_string_pretty(value) {
            Ok(text) => text,
            Err(e) => {
                warn!(file = file_name, error = %e, "Failed to serialize export");
                return false;
            }
        };
        match self.manager.files().write_text(file_name, &text).await {
            Ok(()) => true,
            Err(e) => {
                warn!(file = file_name, error = %e, "Failed to export data");
                false
            }
        }
    }
}
