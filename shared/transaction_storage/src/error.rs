//! Error types for pending queue storage operations

use std::path::PathBuf;

use thiserror::Error;

/// Result type for pending queue storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during pending queue storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to read or write a storage file
    #[error("Storage I/O failed for {path}: {source}")]
    Io {
        /// File the operation was acting on
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the pending queue
    #[error("Failed to serialize pending queue: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Namespace or key cannot be used as a storage slot name
    #[error("Invalid storage slot name: {0:?}")]
    InvalidSlotName(String),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
