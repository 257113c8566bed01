//! Error types for json2cf-sync

use std::path::PathBuf;

/// Result type for json2cf-sync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in json2cf-sync operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file could not be read
    #[error("Failed to read configuration at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration parsed but is unusable
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Profile file could not be read
    #[error("Failed to read profile at {path}: {source}")]
    ProfileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Profile document is malformed
    #[error("Invalid profile at {path}: {source}")]
    Profile {
        path: PathBuf,
        #[source]
        source: json2cf_map::Error,
    },

    /// Profile holds no usable rules
    #[error("Profile at {path} contains no usable rules")]
    EmptyProfile { path: PathBuf },

    /// HTTP client could not be constructed from the `[http]` settings
    #[error("Failed to build HTTP client: {message}")]
    HttpClient { message: String },

    /// Transport-level fetch failure
    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    /// Fetched body is not a usable JSON document
    #[error("Invalid payload: {reason}")]
    InvalidPayload { reason: String },

    /// Record store error from json2cf-store
    #[error(transparent)]
    Store(#[from] json2cf_store::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}

impl Error {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
