use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Shown when no update time is known.
pub const UNKNOWN_UPDATE: &str = "unknown";

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateInfo {
    pub last_update: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_date: Option<String>,
}

impl Default for UpdateInfo {
    fn default() -> Self {
        Self {
            last_update: UNKNOWN_UPDATE.to_string(),
            data_count: None,
            latest_date: None,
        }
    }
}

impl UpdateInfo {
    /// Parse `last_update` as a local timestamp. Date-only values mean midnight.
    pub fn parsed(&self) -> Option<NaiveDateTime> {
        let raw = self.last_update.trim();
        TIMESTAMP_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
    }

    pub fn age_minutes(&self, now: NaiveDateTime) -> Option<i64> {
        self.parsed().map(|at| (now - at).num_minutes())
    }

    /// Human-readable age relative to `now`, falling back to the raw text.
    pub fn age_display(&self, now: NaiveDateTime) -> String {
        let Some(minutes) = self.age_minutes(now) else {
            return self.last_update.clone();
        };

        if minutes < 1 {
            // Clock skew lands here too
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            let hours = minutes / 60;
            if minutes % 60 >= 30 {
                format!("{}h ago", hours + 1)
            } else {
                format!("{}h ago", hours)
            }
        } else {
            let days = minutes / 1440;
            if (minutes % 1440) / 60 >= 12 {
                format!("{}d ago", days + 1)
            } else {
                format!("{}d ago", days)
            }
        }
    }
}
