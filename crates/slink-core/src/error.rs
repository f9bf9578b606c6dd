use thiserror::Error;

/// Result type for the [`LinkStore`][crate::LinkStore] contract.
pub type Result<T> = std::result::Result<T, LinkError>;

/// Errors raised by a storage backend.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("link id already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("failed to persist link: {0}")]
    PersistFailed(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

/// The coarse classification every [`LinkError`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidRequest,
    NotFound,
    StorageUnavailable,
    PersistFailed,
}

/// Errors surfaced by link creation and lookup.
#[derive(Debug, Clone, Error)]
pub enum LinkError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("link not found: {0}")]
    NotFound(String),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("persist failed: {0}")]
    PersistFailed(String),
}

impl LinkError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LinkError::InvalidRequest(_) => ErrorKind::InvalidRequest,
            LinkError::NotFound(_) => ErrorKind::NotFound,
            LinkError::StorageUnavailable(_) => ErrorKind::StorageUnavailable,
            LinkError::PersistFailed(_) => ErrorKind::PersistFailed,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        LinkError::InvalidRequest(message.into())
    }
}

impl From<StorageError> for LinkError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::Unavailable(_) | StorageError::Timeout(_) => {
                LinkError::StorageUnavailable(value.to_string())
            }
            other => LinkError::PersistFailed(other.to_string()),
        }
    }
}
