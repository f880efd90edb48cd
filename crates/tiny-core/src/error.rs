use thiserror::Error;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Rejections produced by the input validators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("ID contains illegal characters: {0}")]
    InvalidId(String),
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("tiny URL entry not found: {0}")]
    NotFound(String),
    #[error("ID already in use: {0}")]
    IdInUse(String),
    /// The durable write failed. The in-memory state has been rolled back.
    #[error("failed to persist storage: {0}")]
    Persistence(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}
