use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Invalid data source: {0}")]
    Config(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {context}: {source}")]
    Parse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Request failed with status {status}: {body}")]
    Request { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Storage key not found: {0}")]
    Missing(String),

    #[error("Failed to persist to {target}: {source}")]
    Persist {
        target: String,
        #[source]
        source: Box<DataError>,
    },
}

/// Fieldless discriminant of [`DataError`], for matching on outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Io,
    Parse,
    Request,
    Network,
    Missing,
    Persist,
}

pub type Result<T> = std::result::Result<T, DataError>;

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl DataError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    /// Build a request error for a non-success status code.
    pub fn from_status(status: u16, body: &str) -> Self {
        DataError::Request {
            status,
            body: Self::truncate_body(body),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DataError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(context: impl Into<String>, source: serde_json::Error) -> Self {
        DataError::Parse {
            context: context.into(),
            source,
        }
    }

    pub fn persist(target: impl Into<String>, source: DataError) -> Self {
        DataError::Persist {
            target: target.into(),
            source: Box::new(source),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DataError::Config(_) => ErrorKind::Config,
            DataError::Io { .. } => ErrorKind::Io,
            DataError::Parse { .. } => ErrorKind::Parse,
            DataError::Request { .. } => ErrorKind::Request,
            DataError::Network(_) => ErrorKind::Network,
            DataError::Missing(_) => ErrorKind::Missing,
            DataError::Persist { .. } => ErrorKind::Persist,
        }
    }

    /// Status code carried by a request error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            DataError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DataError::Network(format!("request timed out: {}", err))
        } else {
            DataError::Network(err.to_string())
        }
    }
}
