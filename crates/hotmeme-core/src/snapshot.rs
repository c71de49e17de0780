//! Bundled offline snapshots.
//!
//! The three documents are embedded at compile time so the board always has
//! something to show, even before the first refresh or with no network.

use serde_json::Value;
use tracing::warn;

const HOT_LIST_JSON: &str = include_str!("../data/hot_list.json");
const CHART_DATA_JSON: &str = include_str!("../data/chart_data.json");
const UPDATE_INFO_JSON: &str = include_str!("../data/update_info.json");

fn parse_bundled(name: &str, text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|e| {
        warn!(snapshot = name, error = %e, "Bundled snapshot is not valid JSON");
        Value::Null
    })
}

/// Ranked list of trending items.
pub fn hot_list() -> Value {
    parse_bundled("hot_list", HOT_LIST_JSON)
}

/// Chart document with dates and named series.
pub fn chart_data() -> Value {
    parse_bundled("chart_data", CHART_DATA_JSON)
}

/// Update metadata for the snapshot.
pub fn update_info() -> Value {
    parse_bundled("update_info", UPDATE_INFO_JSON)
}
