//! Error types for json2cf-map

/// Result type for json2cf-map operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading a mapping profile
///
/// Reconciliation itself never fails; only turning a profile document into
/// rules can.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Profile must be a JSON array of rules, found {found}")]
    NotAList { found: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
