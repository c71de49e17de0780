use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::network::RequestOptions;

/// Where a loaded or saved value gets written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistTarget {
    Storage(String),
    File(String),
}

impl fmt::Display for PersistTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistTarget::Storage(key) => write!(f, "storage:{}", key),
            PersistTarget::File(path) => write!(f, "file:{}", path),
        }
    }
}

/// The source a load resolves from, borrowed out of a [`SourceDescriptor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Source<'a> {
    Storage(&'a str),
    File(&'a str),
    Network {
        url: &'a str,
        request: &'a RequestOptions,
    },
    Inline(&'a Value),
}

/// Candidate sources for a load. Exactly one is expected; if several are
/// set, storage wins over file, file over network, network over inline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    #[serde(default)]
    pub storage_key: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub request: RequestOptions,
    #[serde(default)]
    pub inline: Option<Value>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl SourceDescriptor {
    pub fn source(&self) -> Option<Source<'_>> {
        if let Some(key) = non_empty(&self.storage_key) {
            return Some(Source::Storage(key));
        }
        if let Some(path) = non_empty(&self.file_path) {
            return Some(Source::File(path));
        }
        if let Some(url) = non_empty(&self.url) {
            return Some(Source::Network {
                url,
                request: &self.request,
            });
        }
        self.inline.as_ref().map(Source::Inline)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadOptions {
    #[serde(flatten)]
    pub source: SourceDescriptor,
    #[serde(default)]
    pub force_refresh: bool,
    #[serde(default)]
    pub default_value: Option<Value>,
    #[serde(default)]
    pub persist_to: Option<PersistTarget>,
}

impl LoadOptions {
    /// Options with no source; only useful for cache hits.
    pub fn cached() -> Self {
        Self::default()
    }

    pub fn from_storage(key: impl Into<String>) -> Self {
        Self {
            source: SourceDescriptor {
                storage_key: Some(key.into()),
                ..SourceDescriptor::default()
            },
            ..Self::default()
        }
    }

    pub fn from_file(path: impl Into<String>) -> Self {
        Self {
            source: SourceDescriptor {
                file_path: Some(path.into()),
                ..SourceDescriptor::default()
            },
            ..Self::default()
        }
    }

    pub fn from_url(url: impl Into<String>, request: RequestOptions) -> Self {
        Self {
            source: SourceDescriptor {
                url: Some(url.into()),
                request,
                ..SourceDescriptor::default()
            },
            ..Self::default()
        }
    }

    pub fn from_value(value: Value) -> Self {
        Self {
            source: SourceDescriptor {
                inline: Some(value),
                ..SourceDescriptor::default()
            },
            ..Self::default()
        }
    }

    pub fn force_refresh(mut self) -> Self {
        self.force_refresh = true;
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn persist_to(mut self, target: PersistTarget) -> Self {
        self.persist_to = Some(target);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveOptions {
    #[serde(default)]
    pub target: Option<PersistTarget>,
}

impl SaveOptions {
    /// Cache only, no persistence.
    pub fn cache_only() -> Self {
        Self::default()
    }

    pub fn to_storage(key: impl Into<String>) -> Self {
        Self {
            target: Some(PersistTarget::Storage(key.into())),
        }
    }

    pub fn to_file(path: impl Into<String>) -> Self {
        Self {
            target: Some(PersistTarget::File(path.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_source_priority_storage_first() {
        let descriptor = SourceDescriptor {
            storage_key: Some("cache_hotList".into()),
            file_path: Some("hot_list.json".into()),
            url: Some("https://example.com/hot".into()),
            inline: Some(json!([])),
            ..SourceDescriptor::default()
        };
        assert_eq!(descriptor.source(), Some(Source::Storage("cache_hotList")));
    }

    #[test]
    fn test_source_priority_skips_empty_strings() {
        let descriptor = SourceDescriptor {
            storage_key: Some(String::new()),
            file_path: Some(String::new()),
            url: Some("https://example.com/hot".into()),
            inline: Some(json!([])),
            ..SourceDescriptor::default()
        };
        match descriptor.source() {
            Some(Source::Network { url, .. }) => assert_eq!(url, "https://example.com/hot"),
            other => panic!("expected network source, got {other:?}"),
        }
    }

    #[test]
    fn test_source_inline_last() {
        let value = json!({"last_update": "2025-05-26 10:00:00"});
        let opts = LoadOptions::from_value(value.clone());
        assert_eq!(opts.source.source(), Some(Source::Inline(&value)));
    }

    #[test]
    fn test_no_source() {
        assert_eq!(LoadOptions::cached().source.source(), None);
    }

    #[test]
    fn test_load_options_deserialize_flattened() {
        let opts: LoadOptions = serde_json::from_str(
            r#"{"file_path":"chart.json","force_refresh":true,"persist_to":{"storage":"cache_chartData"}}"#,
        )
        .unwrap();
        assert_eq!(opts.source.source(), Some(Source::File("chart.json")));
        assert!(opts.force_refresh);
        assert_eq!(
            opts.persist_to,
            Some(PersistTarget::Storage("cache_chartData".into()))
        );
    }

    #[test]
    fn test_persist_target_display() {
        assert_eq!(PersistTarget::Storage("k".into()).to_string(), "storage:k");
        assert_eq!(PersistTarget::File("a/b.json".into()).to_string(), "file:a/b.json");
    }
}
