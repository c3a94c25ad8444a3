use std::path::PathBuf;

/// Result type for cclog-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No session file (or sub-agent file) matched
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// No project matched the given name
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    /// Target uuid is not a top-level entry of the session
    #[error("Entry with UUID {0} not found")]
    EntryNotFound(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Provider layer error
    #[error("Provider error: {0}")]
    Provider(#[from] cclog_providers::Error),

    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
