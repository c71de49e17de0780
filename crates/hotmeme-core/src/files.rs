//! Sandboxed UTF-8 file store.
//!
//! Every path handed to `FileStore` is interpreted relative to its root.
//! Paths that already carry the root prefix are accepted as-is; anything
//! else that is absolute, or that climbs out with `..`, is rejected.

use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::error::{DataError, Result};

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `path` to a location inside the sandbox root.
    pub fn resolve(&self, path: &str) -> Result<PathBuf> {
        let requested = Path::new(path);
        let relative = requested.strip_prefix(&self.root).unwrap_or(requested);

        let mut resolved = self.root.clone();
        let mut depth = 0usize;
        for component in relative.components() {
            match component {
                Component::Normal(part) => {
                    resolved.push(part);
                    depth += 1;
                }
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(DataError::io(
                        requested,
                        io::Error::new(io::ErrorKind::PermissionDenied, "path escapes the sandbox root"),
                    ));
                }
            }
        }

        if depth == 0 {
            return Err(DataError::io(
                requested,
                io::Error::new(io::ErrorKind::InvalidInput, "path does not name a file"),
            ));
        }
        Ok(resolved)
    }

    pub async fn read_text(&self, path: &str) -> Result<String> {
        let full = self.resolve(path)?;
        debug!(path = %full.display(), "Reading file");
        tokio::fs::read_to_string(&full)
            .await
            .map_err(|e| DataError::io(full, e))
    }

    /// Write `text` to `path`, creating parent directories as needed.
    pub async fn write_text(&self, path: &str, text: &str) -> Result<()> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DataError::io(parent, e))?;
        }
        debug!(path = %full.display(), bytes = text.len(), "Writing file");
        tokio::fs::write(&full, text)
            .await
            .map_err(|e| DataError::io(full, e))
    }
}
