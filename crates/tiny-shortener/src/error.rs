use thiserror::Error;
use tiny_core::{StorageError, ValidationError};

pub type Result<T> = std::result::Result<T, ShortenerError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortenerError {
    #[error("tiny URL entry not found: {0}")]
    NotFound(String),
    #[error("ID contains illegal characters: {0}")]
    InvalidId(String),
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("ID already in use: {0}")]
    IdInUse(String),
    #[error("no unused ID found after {0} attempts")]
    ExhaustedIdSpace(usize),
    #[error("storage error: {0}")]
    Storage(StorageError),
    #[error("failed to encode response: {0}")]
    Encode(String),
}

impl ShortenerError {
    /// Returns `true` for errors caused by the caller's input.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            ShortenerError::InvalidId(_) | ShortenerError::InvalidUrl(_) | ShortenerError::IdInUse(_)
        )
    }
}

impl From<ValidationError> for ShortenerError {
    fn from(value: ValidationError) -> Self {
        match value {
            ValidationError::InvalidId(id) => Self::InvalidId(id),
            ValidationError::InvalidUrl(message) => Self::InvalidUrl(message),
        }
    }
}

impl From<StorageError> for ShortenerError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::NotFound(id) => Self::NotFound(id),
            StorageError::IdInUse(id) => Self::IdInUse(id),
            other => Self::Storage(other),
        }
    }
}

impl From<serde_json::Error> for ShortenerError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value.to_string())
    }
}
