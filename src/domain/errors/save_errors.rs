use thiserror::Error;

use crate::domain::errors::{ObjectStoreError, StoreError, ValidationError};

/// Failure modes of the image-save pipeline, in pipeline order.
///
/// `Upload` means no document was written. `Document` means the file was
/// uploaded but the metadata write failed, leaving the object orphaned in
/// storage; the caller decides whether and how to surface that.
#[derive(Debug, Clone, Error)]
pub enum SaveError {
    /// The image name produced no usable storage key.
    #[error("Invalid image name: {0}")]
    InvalidImageName(#[from] ValidationError),

    /// The upload (or download-URL retrieval) failed; nothing was persisted.
    #[error("Image upload failed: {0}")]
    Upload(#[source] ObjectStoreError),

    /// The metadata document could not be written after a successful upload.
    #[error("Record write failed after upload: {0}")]
    Document(#[source] StoreError),
}

/// Result type for the save pipeline.
pub type SaveResult<T> = Result<T, SaveError>;
