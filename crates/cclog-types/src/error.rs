use thiserror::Error;

/// Result type for cclog-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug, Error)]
pub enum Error {
    /// A log line was not a JSON record
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
