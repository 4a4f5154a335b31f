use thiserror::Error;

use crate::domain::value_objects::StorageKey;

/// Errors surfaced by the binary object store.
#[derive(Debug, Clone, Error)]
pub enum ObjectStoreError {
    /// No object exists under the given key.
    #[error("Object not found: {key}")]
    ObjectNotFound { key: StorageKey },

    /// The upload did not complete.
    #[error("Upload failed for '{key}': {message}")]
    UploadFailed { key: StorageKey, message: String },

    /// No download reference could be produced for the key.
    #[error("No download URL available for '{key}': {message}")]
    DownloadUrlUnavailable { key: StorageKey, message: String },

    /// The backing store rejected or failed the operation.
    #[error("Object store error: {message}")]
    Backend {
        message: String,
        cause: Option<String>,
    },
}

/// Result type for object store operations.
pub type ObjectStoreResult<T> = Result<T, ObjectStoreError>;
