use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::domain::{
    errors::{SaveResult, StoreResult},
    models::{ImageRecord, PendingFile, ProgressSender, RecordFields},
    value_objects::RecordId,
};

/// A live stream of full collection snapshots. Never ends on its own;
/// dropping it cancels the subscription.
pub type RecordListStream = BoxStream<'static, Vec<ImageRecord>>;

/// A live stream of one record's current value. Yields `None` while no
/// document exists under the id.
pub type RecordStream = BoxStream<'static, Option<ImageRecord>>;

/// Service contract for the image record lifecycle.
#[async_trait]
pub trait RecordService: Send + Sync + 'static {
    /// Subscribe to the full record set: current snapshot, then changes.
    fn list(&self) -> RecordListStream;

    /// Follow one record by id.
    fn get(&self, id: &RecordId) -> RecordStream;

    /// Upload the file, obtain its download URL, then persist the metadata
    /// document. Progress for this one upload is reported on `progress`.
    async fn save(
        &self,
        file: PendingFile,
        fields: RecordFields,
        progress: Option<ProgressSender>,
    ) -> SaveResult<ImageRecord>;

    /// Delete the stored object and the metadata document independently.
    /// The returned result reflects only the document deletion; the object
    /// deletion outcome is logged (and notified on success) but never
    /// correlated with it.
    async fn delete(&self, id: &RecordId, image_name: &str) -> StoreResult<()>;

    /// Partially update the metadata fields of an existing record.
    /// Unlike the absorbed failure paths above, this propagates its error.
    async fn update(&self, id: &RecordId, fields: RecordFields) -> StoreResult<()>;
}
