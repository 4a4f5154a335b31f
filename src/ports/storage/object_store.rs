use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::{
    errors::ObjectStoreResult, models::ProgressSender, value_objects::StorageKey,
};

/// Port for binary object storage.
/// This abstracts the actual storage backend (S3, local disk, memory, ...).
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Upload `data` to `key`, reporting byte counts on `progress` as
    /// chunks complete. Overwrites any existing object at the key.
    ///
    /// The upload runs to completion or failure; no caller-initiated abort.
    async fn upload(
        &self,
        key: &StorageKey,
        data: Bytes,
        content_type: Option<&str>,
        progress: Option<&ProgressSender>,
    ) -> ObjectStoreResult<()>;

    /// Retrieve a download reference URL for an uploaded object.
    async fn download_url(&self, key: &StorageKey) -> ObjectStoreResult<String>;

    /// Delete the object at `key`.
    async fn delete(&self, key: &StorageKey) -> ObjectStoreResult<()>;
}
