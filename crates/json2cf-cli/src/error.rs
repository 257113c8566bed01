//! Error types for json2cf-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from json2cf-sync
    #[error(transparent)]
    Sync(#[from] json2cf_sync::Error),

    /// Error from json2cf-store
    #[error(transparent)]
    Store(#[from] json2cf_store::Error),

    /// Error from json2cf-map
    #[error(transparent)]
    Map(#[from] json2cf_map::Error),

    /// JSON output error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Logging could not be set up
    #[error("Failed to initialize logging: {message}")]
    Logging { message: String },

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
