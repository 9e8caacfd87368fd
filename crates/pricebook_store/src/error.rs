//! Error types for local storage operations.

use std::io;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during local storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The collection could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The key is not usable as a storage name.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The store cannot be reached at all.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
