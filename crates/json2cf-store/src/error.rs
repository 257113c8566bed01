//! Error types for json2cf-store

use std::path::PathBuf;

/// Result type for json2cf-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in json2cf-store operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse record at {path}: {source}")]
    RecordParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize record {id}: {source}")]
    RecordSerialize {
        id: u64,
        #[source]
        source: serde_json::Error,
    },

    #[error("Record store directory not found: {path}")]
    StoreNotFound { path: PathBuf },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
