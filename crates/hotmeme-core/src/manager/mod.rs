//! Keyed data manager.
//!
//! `DataManager` keeps an in-memory cache of JSON documents keyed by name.
//! A load either answers from that cache or resolves from exactly one source:
//! - persistent key/value storage
//! - a file under the sandboxed file root
//! - a remote HTTP endpoint
//! - an inline value supplied by the caller
//!
//! Freshly loaded values can be written through to storage or a file, and
//! saves update the cache and optionally persist. `try_load`/`try_save`
//! report outcomes as `Result`; `load`/`save` swallow failures and degrade
//! to the default value or `false`.

pub mod keyed;
pub mod options;

pub use keyed::{DataManager, Loaded, Origin};
pub use options::{LoadOptions, PersistTarget, SaveOptions, Source, SourceDescriptor};
