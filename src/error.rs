//! Error types for the keywalk namespace engine and its store backends.

use std::time::Duration;
use thiserror::Error;

/// Store-level errors raised by a key-value backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store backend error: {0}")]
    Backend(String),

    #[error("Store deadline of {0:?} exceeded")]
    Timeout(Duration),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<sled::Error> for StoreError {
    fn from(err: sled::Error) -> Self {
        match err {
            sled::Error::Io(io) => StoreError::IoError(io),
            other => StoreError::Backend(other.to_string()),
        }
    }
}

/// Errors surfaced by namespace operations.
///
/// `WrongType` is absorbed while listing; every other kind reaches the caller
/// with the operation name and the path it was attempted on.
#[derive(Debug, Error)]
pub enum NamespaceError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Value at {0} is not a string")]
    WrongType(String),

    #[error("Invalid operation: cannot {op} {path}")]
    InvalidOperation { op: &'static str, path: String },

    #[error("Target already exists: {0}")]
    AlreadyExists(String),

    #[error("Source does not exist: {0}")]
    SourceMissing(String),

    #[error("{op} {path}: {source}")]
    Transport {
        op: &'static str,
        path: String,
        #[source]
        source: StoreError,
    },
}

impl NamespaceError {
    pub(crate) fn transport(op: &'static str, path: impl Into<String>, source: StoreError) -> Self {
        NamespaceError::Transport {
            op,
            path: path.into(),
            source,
        }
    }

    /// True when the store itself failed or stopped answering, as opposed to
    /// an outcome of the request such as a missing key.
    pub fn is_transport(&self) -> bool {
        matches!(self, NamespaceError::Transport { .. })
    }

    /// True when the store round-trip was abandoned because its deadline expired.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            NamespaceError::Transport {
                source: StoreError::Timeout(_),
                ..
            }
        )
    }
}

/// Application-level errors (configuration, CLI input, startup).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Namespace(#[from] NamespaceError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not a folder: {0}")]
    NotADirectory(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
