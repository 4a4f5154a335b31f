use async_trait::async_trait;
use bytes::Bytes;
use object_store::{
    path::Path as ObjectPath, MultipartUpload, ObjectStore as ApacheObjectStore, PutPayload,
};
use std::sync::Arc;
use tracing::debug;

use crate::{
    domain::{
        errors::{ObjectStoreError, ObjectStoreResult},
        models::ProgressSender,
        value_objects::StorageKey,
    },
    ports::storage::ObjectStore,
};

/// Part size for chunked uploads. S3 requires at least 5 MiB per part
/// except the last.
const UPLOAD_PART_SIZE: usize = 5 * 1024 * 1024;

/// Adapter that implements our ObjectStore port using Apache object_store.
///
/// Uploads larger than one part go through a multipart upload, reporting
/// transferred bytes on the per-call progress channel after each part.
/// Download URLs are formed from a configured public base URL, since not
/// every backend can mint its own links.
pub struct ApacheObjectStoreAdapter {
    inner: Arc<dyn ApacheObjectStore>,
    public_base_url: String,
}

impl ApacheObjectStoreAdapter {
    pub fn new(store: Arc<dyn ApacheObjectStore>, public_base_url: impl Into<String>) -> Self {
        Self {
            inner: store,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn backend_error(action: &str, err: object_store::Error) -> ObjectStoreError {
        ObjectStoreError::Backend {
            message: format!("Failed to {}: {}", action, err),
            cause: Some(err.to_string()),
        }
    }

    async fn upload_multipart(
        &self,
        path: &ObjectPath,
        key: &StorageKey,
        data: Bytes,
        progress: Option<&ProgressSender>,
    ) -> ObjectStoreResult<()> {
        let total = data.len() as u64;

        let mut upload =
            self.inner
                .put_multipart(path)
                .await
                .map_err(|e| ObjectStoreError::UploadFailed {
                    key: key.clone(),
                    message: e.to_string(),
                })?;

        let mut offset = 0usize;
        while offset < data.len() {
            let end = usize::min(offset + UPLOAD_PART_SIZE, data.len());
            let part = data.slice(offset..end);

            if let Err(e) = upload.put_part(PutPayload::from(part)).await {
                upload.abort().await.ok();
                return Err(ObjectStoreError::UploadFailed {
                    key: key.clone(),
                    message: e.to_string(),
                });
            }

            offset = end;
            if let Some(progress) = progress {
                progress.report(offset as u64, total);
            }
        }

        upload
            .complete()
            .await
            .map_err(|e| ObjectStoreError::UploadFailed {
                key: key.clone(),
                message: e.to_string(),
            })?;

        Ok(())
    }
}

#[async_trait]
impl ObjectStore for ApacheObjectStoreAdapter {
    async fn upload(
        &self,
        key: &StorageKey,
        data: Bytes,
        _content_type: Option<&str>,
        progress: Option<&ProgressSender>,
    ) -> ObjectStoreResult<()> {
        let path = ObjectPath::from(key.as_str());
        let total = data.len() as u64;

        if let Some(progress) = progress {
            progress.report(0, total);
        }

        if data.len() > UPLOAD_PART_SIZE {
            self.upload_multipart(&path, key, data, progress).await?;
        } else {
            self.inner
                .put(&path, PutPayload::from(data))
                .await
                .map_err(|e| ObjectStoreError::UploadFailed {
                    key: key.clone(),
                    message: e.to_string(),
                })?;

            if let Some(progress) = progress {
                progress.report(total, total);
            }
        }

        debug!(%key, total, "object uploaded");
        Ok(())
    }

    async fn download_url(&self, key: &StorageKey) -> ObjectStoreResult<String> {
        let path = ObjectPath::from(key.as_str());

        // Confirm the object exists before handing out a reference to it.
        self.inner.head(&path).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => {
                ObjectStoreError::ObjectNotFound { key: key.clone() }
            }
            other => ObjectStoreError::DownloadUrlUnavailable {
                key: key.clone(),
                message: other.to_string(),
            },
        })?;

        Ok(format!("{}/{}", self.public_base_url, key.as_str()))
    }

    async fn delete(&self, key: &StorageKey) -> ObjectStoreResult<()> {
        let path = ObjectPath::from(key.as_str());

        self.inner.delete(&path).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => {
                ObjectStoreError::ObjectNotFound { key: key.clone() }
            }
            other => Self::backend_error("delete object", other),
        })?;

        Ok(())
    }
}
