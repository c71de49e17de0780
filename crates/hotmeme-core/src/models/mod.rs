//! Data models for the trending-meme snapshots.
//!
//! - `TrendingItem`: one entry of the ranked hot list
//! - `ChartDocument`, `NamedSeries`: per-day heat for the top memes
//! - `UpdateInfo`: when the snapshot was generated

pub mod chart;
pub mod trending;
pub mod update;

pub use chart::{ChartDocument, NamedSeries};
pub use trending::{format_heat, TrendingItem};
pub use update::UpdateInfo;
