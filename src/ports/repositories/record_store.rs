use async_trait::async_trait;
use tokio::sync::watch;

use crate::domain::{
    errors::StoreResult,
    models::{ImageRecord, RecordDocument, RecordFields},
    value_objects::RecordId,
};

/// Port for the document store holding image record metadata.
///
/// Models a live collection: `subscribe` hands back a receiver whose first
/// observed value is the current full snapshot, followed by every later
/// snapshot. Ids are assigned by the store on `add`.
#[async_trait]
pub trait RecordStore: Send + Sync + 'static {
    /// Subscribe to the whole collection. Each call gets an independent
    /// receiver; dropping it ends the subscription.
    fn subscribe(&self) -> watch::Receiver<Vec<ImageRecord>>;

    /// Create a new document and return its assigned id.
    async fn add(&self, document: RecordDocument) -> StoreResult<RecordId>;

    /// Apply a partial update to an existing document. Only the fields in
    /// `RecordFields` may change; `img_url` and the id never do.
    async fn update(&self, id: &RecordId, fields: &RecordFields) -> StoreResult<()>;

    /// Delete the document with the given id.
    async fn delete(&self, id: &RecordId) -> StoreResult<()>;
}
