use serde::{Deserialize, Serialize};

use crate::domain::errors::ValidationError;

/// An opaque identifier for an image record, assigned by the document store
/// on creation and stable for the life of the record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap an existing identifier with validation.
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::EmptyRecordId);
        }

        for c in value.chars() {
            if !c.is_alphanumeric() && c != '-' && c != '_' {
                return Err(ValidationError::InvalidRecordIdCharacter(c));
            }
        }

        Ok(Self(value))
    }

    /// Generate a fresh identifier. Used by stores that assign ids locally.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
