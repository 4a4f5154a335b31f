use crate::domain::errors::ValidationError;

/// Prefix under which all image objects live in the object store.
pub const IMAGE_FOLDER: &str = "img";

/// A validated key (path) for an image object in the backing store.
///
/// Keys are derived from the record's image name with every space removed,
/// placed under the `img/` folder. Two names that agree after space removal
/// therefore map to the same key and overwrite each other's object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    /// Derive the storage key for an image name.
    pub fn for_image_name(name: &str) -> Result<Self, ValidationError> {
        let trimmed: String = name.chars().filter(|c| *c != ' ').collect();

        if trimmed.is_empty() {
            return Err(ValidationError::EmptyImageName);
        }

        if trimmed.len() > 1024 {
            return Err(ValidationError::ImageNameTooLong {
                actual: trimmed.len(),
                max: 1024,
            });
        }

        if trimmed.contains('\0') {
            return Err(ValidationError::InvalidImageNameCharacter('\0'));
        }

        if trimmed.contains('/') {
            return Err(ValidationError::InvalidImageNameCharacter('/'));
        }

        Ok(Self(format!("{}/{}", IMAGE_FOLDER, trimmed)))
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The file name part of the key (everything after the folder prefix).
    pub fn file_name(&self) -> &str {
        self.0.rfind('/').map_or(&self.0, |idx| &self.0[idx + 1..])
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
