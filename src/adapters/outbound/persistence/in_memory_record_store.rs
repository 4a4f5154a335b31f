use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tracing::debug;

use crate::{
    domain::{
        errors::{StoreError, StoreResult},
        models::{ImageRecord, RecordDocument, RecordFields},
        value_objects::RecordId,
    },
    ports::repositories::RecordStore,
};

/// Default collection name for image records.
pub const DEFAULT_COLLECTION: &str = "tbl_face";

/// In-memory implementation of RecordStore for testing and development.
///
/// Keeps documents in insertion order and broadcasts a full snapshot on a
/// watch channel after every mutation, so subscribers behave like a live
/// collection: current snapshot first, then changes.
#[derive(Clone)]
pub struct InMemoryRecordStore {
    collection: String,
    data: Arc<RwLock<Vec<(RecordId, RecordDocument)>>>,
    changes: Arc<watch::Sender<Vec<ImageRecord>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::with_collection(DEFAULT_COLLECTION)
    }

    pub fn with_collection(collection: impl Into<String>) -> Self {
        let (changes, _) = watch::channel(Vec::new());
        Self {
            collection: collection.into(),
            data: Arc::new(RwLock::new(Vec::new())),
            changes: Arc::new(changes),
        }
    }

    fn snapshot(data: &[(RecordId, RecordDocument)]) -> Vec<ImageRecord> {
        data.iter()
            .map(|(id, document)| ImageRecord {
                id: id.clone(),
                document: document.clone(),
            })
            .collect()
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    fn subscribe(&self) -> watch::Receiver<Vec<ImageRecord>> {
        self.changes.subscribe()
    }

    async fn add(&self, document: RecordDocument) -> StoreResult<RecordId> {
        let mut data = self.data.write().await;

        let id = RecordId::generate();
        data.push((id.clone(), document));
        self.changes.send_replace(Self::snapshot(&data));

        debug!(collection = %self.collection, %id, "document added");
        Ok(id)
    }

    async fn update(&self, id: &RecordId, fields: &RecordFields) -> StoreResult<()> {
        let mut data = self.data.write().await;

        let (_, document) = data
            .iter_mut()
            .find(|(record_id, _)| record_id == id)
            .ok_or_else(|| StoreError::RecordNotFound { id: id.clone() })?;

        document.apply(fields);
        self.changes.send_replace(Self::snapshot(&data));

        debug!(collection = %self.collection, %id, "document updated");
        Ok(())
    }

    async fn delete(&self, id: &RecordId) -> StoreResult<()> {
        let mut data = self.data.write().await;

        let index = data
            .iter()
            .position(|(record_id, _)| record_id == id)
            .ok_or_else(|| StoreError::RecordNotFound { id: id.clone() })?;

        data.remove(index);
        self.changes.send_replace(Self::snapshot(&data));

        debug!(collection = %self.collection, %id, "document deleted");
        Ok(())
    }
}
