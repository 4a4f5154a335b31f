use async_trait::async_trait;
use futures::StreamExt;
use std::sync::Arc;
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, info, warn};

use crate::{
    domain::{
        errors::{SaveError, SaveResult, StoreResult},
        models::{ImageRecord, PendingFile, ProgressSender, RecordFields},
        value_objects::{RecordId, StorageKey},
    },
    ports::{
        notify::Notifier,
        repositories::RecordStore,
        services::{RecordListStream, RecordService, RecordStream},
        storage::ObjectStore,
    },
};

/// Implementation of RecordService over a document store, an object store
/// and a notifier.
///
/// The two stores are updated independently: nothing here retries, rolls
/// back, or reconciles them, so they can diverge permanently (an orphaned
/// object after a failed document write, or a document whose `img_url`
/// points at a deleted object).
#[derive(Clone)]
pub struct RecordServiceImpl {
    records: Arc<dyn RecordStore>,
    objects: Arc<dyn ObjectStore>,
    notifier: Arc<dyn Notifier>,
}

impl RecordServiceImpl {
    /// Create a new RecordServiceImpl instance
    pub fn new(
        records: Arc<dyn RecordStore>,
        objects: Arc<dyn ObjectStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            records,
            objects,
            notifier,
        }
    }
}

#[async_trait]
impl RecordService for RecordServiceImpl {
    fn list(&self) -> RecordListStream {
        WatchStream::new(self.records.subscribe()).boxed()
    }

    fn get(&self, id: &RecordId) -> RecordStream {
        let id = id.clone();
        WatchStream::new(self.records.subscribe())
            .map(move |records| records.into_iter().find(|record| record.id == id))
            .boxed()
    }

    async fn save(
        &self,
        file: PendingFile,
        fields: RecordFields,
        progress: Option<ProgressSender>,
    ) -> SaveResult<ImageRecord> {
        let key = StorageKey::for_image_name(&fields.nombre_imagen)?;
        let total_bytes = file.data.len();
        debug!(%key, total_bytes, "starting image upload");

        self.objects
            .upload(
                &key,
                file.data,
                file.content_type.as_deref(),
                progress.as_ref(),
            )
            .await
            .map_err(|err| {
                warn!(%key, error = %err, "image upload failed, no document written");
                SaveError::Upload(err)
            })?;

        // Document creation is strictly ordered after upload completion
        // and URL retrieval.
        let img_url = self.objects.download_url(&key).await.map_err(|err| {
            warn!(%key, error = %err, "could not obtain download URL");
            SaveError::Upload(err)
        })?;

        let document = fields.into_document(img_url);
        let id = self
            .records
            .add(document.clone())
            .await
            .map_err(|err| {
                warn!(%key, error = %err, "record write failed, uploaded object is orphaned");
                SaveError::Document(err)
            })?;

        info!(%id, %key, "image record saved");
        Ok(ImageRecord { id, document })
    }

    async fn delete(&self, id: &RecordId, image_name: &str) -> StoreResult<()> {
        // Two independent actions. Only the document outcome is returned;
        // the object outcome is notified or logged and then dropped.
        let object_deletion = async {
            let key = match StorageKey::for_image_name(image_name) {
                Ok(key) => key,
                Err(err) => {
                    warn!(image_name, error = %err, "cannot derive storage key for deletion");
                    return;
                }
            };
            match self.objects.delete(&key).await {
                Ok(()) => {
                    self.notifier
                        .success("Deleted", "The record was deleted successfully");
                }
                Err(err) => {
                    warn!(%key, error = %err, "object deletion failed");
                }
            }
        };

        let document_deletion = self.records.delete(id);

        let (_, document_result) = tokio::join!(object_deletion, document_deletion);
        if let Err(err) = &document_result {
            warn!(%id, error = %err, "document deletion failed");
        }
        document_result
    }

    async fn update(&self, id: &RecordId, fields: RecordFields) -> StoreResult<()> {
        self.records.update(id, &fields).await.map_err(|err| {
            warn!(%id, error = %err, "record update failed");
            err
        })
    }
}

/// Builder for RecordServiceImpl
pub struct RecordServiceBuilder {
    records: Option<Arc<dyn RecordStore>>,
    objects: Option<Arc<dyn ObjectStore>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl RecordServiceBuilder {
    pub fn new() -> Self {
        Self {
            records: None,
            objects: None,
            notifier: None,
        }
    }

    pub fn records(mut self, records: Arc<dyn RecordStore>) -> Self {
        self.records = Some(records);
        self
    }

    pub fn objects(mut self, objects: Arc<dyn ObjectStore>) -> Self {
        self.objects = Some(objects);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn build(self) -> Result<RecordServiceImpl, &'static str> {
        let records = self.records.ok_or("Record store is required")?;
        let objects = self.objects.ok_or("Object store is required")?;
        let notifier = self.notifier.ok_or("Notifier is required")?;

        Ok(RecordServiceImpl::new(records, objects, notifier))
    }
}

impl Default for RecordServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
