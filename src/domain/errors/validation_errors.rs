use thiserror::Error;

/// Validation errors for domain value objects
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Image name is empty after removing spaces")]
    EmptyImageName,

    #[error("Image name too long: {actual} bytes (max: {max})")]
    ImageNameTooLong { actual: usize, max: usize },

    #[error("Invalid character in image name: '{0}'")]
    InvalidImageNameCharacter(char),

    #[error("Record id cannot be empty")]
    EmptyRecordId,

    #[error("Invalid character in record id: '{0}'")]
    InvalidRecordIdCharacter(char),
}
