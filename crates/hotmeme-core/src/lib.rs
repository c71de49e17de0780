//! hotmeme core library.
//!
//! Provides the keyed data manager behind the trending-meme board, its
//! storage/file/network collaborators, the snapshot models and the bundled
//! offline data.
//!
//! ```no_run
//! use hotmeme_core::{Config, MemeBoard};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let mut board = MemeBoard::open(&Config::load()?)?;
//! board.init_all().await;
//! for item in board.hot_list(false).await {
//!     println!("{} {}", item.name, item.trend_display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod files;
pub mod manager;
pub mod models;
pub mod network;
pub mod snapshot;
pub mod storage;

pub use board::MemeBoard;
pub use config::Config;
pub use error::{DataError, ErrorKind};
pub use files::FileStore;
pub use manager::{DataManager, LoadOptions, Loaded, Origin, PersistTarget, SaveOptions};
pub use network::{HttpClient, HttpTransport, RequestOptions};
pub use storage::{DirStore, KeyValueStore, MemoryStore};
