use thiserror::Error;

use crate::domain::value_objects::RecordId;

/// Errors surfaced by the document store.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// No document exists under the given id.
    #[error("Record not found: {id}")]
    RecordNotFound { id: RecordId },

    /// The document could not be serialized or deserialized.
    #[error("Invalid record document: {message}")]
    InvalidDocument { message: String },

    /// The backing store rejected or failed the operation.
    ///
    /// The source is kept as a string so the error stays `Clone` and free
    /// of backend crate types.
    #[error("Document store error: {message}")]
    Backend {
        message: String,
        cause: Option<String>,
    },
}

/// Result type for document store operations.
pub type StoreResult<T> = Result<T, StoreError>;
