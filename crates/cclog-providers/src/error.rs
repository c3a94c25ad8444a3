use std::path::PathBuf;

/// Result type for cclog-providers operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the providers layer
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Walkdir error
    #[error("Directory traversal error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// `<claude_dir>/projects` does not exist
    #[error("Projects directory not found: {}", .0.display())]
    ProjectsDirNotFound(PathBuf),
}
