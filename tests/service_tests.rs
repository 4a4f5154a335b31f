use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use image_registry::{
    create_in_memory_app, progress_channel, ApacheObjectStoreAdapter, AppBuilder, Notifier,
    ObjectStore, PendingFile, RecordDocument, RecordFields, RecordId, RecordService,
    RecordServiceBuilder, RecordStore, SaveError, StorageKey, StoreError,
};
use image_registry::{InMemoryRecordStore, LogNotifier};
use image_registry::domain::errors::{ObjectStoreError, ObjectStoreResult, StoreResult};
use image_registry::domain::models::ProgressSender;
use object_store::memory::InMemory;

fn juan_perez() -> RecordFields {
    RecordFields {
        nombre_imagen: "Juan Perez".to_string(),
        fecha_nacimiento: "1990-01-01".to_string(),
        tlf_emergencia: "555-1234".to_string(),
        cedula: "V-12345678".to_string(),
    }
}

fn small_file() -> PendingFile {
    PendingFile::new(Bytes::from_static(b"not really a jpeg")).with_content_type("image/jpeg")
}

#[tokio::test]
async fn save_then_list_yields_record_with_url_and_fields() {
    let services = create_in_memory_app().unwrap();
    let service = services.record_service;

    let saved = service.save(small_file(), juan_perez(), None).await.unwrap();
    assert_eq!(saved.document.img_url, "https://storage.local/img/JuanPerez");

    let snapshot = service.list().next().await.unwrap();
    assert_eq!(snapshot.len(), 1);
    let record = &snapshot[0];
    assert_eq!(record.id, saved.id);
    assert_eq!(record.document.nombre_imagen, "Juan Perez");
    assert_eq!(record.document.fecha_nacimiento, "1990-01-01");
    assert_eq!(record.document.tlf_emergencia, "555-1234");
    assert_eq!(record.document.cedula, "V-12345678");
    assert!(!record.document.img_url.is_empty());
}

#[tokio::test]
async fn get_follows_live_updates_to_one_record() {
    let services = create_in_memory_app().unwrap();
    let service = services.record_service;

    let saved = service.save(small_file(), juan_perez(), None).await.unwrap();

    let mut stream = service.get(&saved.id);
    let current = stream.next().await.unwrap().unwrap();
    assert_eq!(current.document.nombre_imagen, "Juan Perez");

    let mut updated = juan_perez();
    updated.nombre_imagen = "Juan P.".to_string();
    service.update(&saved.id, updated).await.unwrap();

    let current = stream.next().await.unwrap().unwrap();
    assert_eq!(current.document.nombre_imagen, "Juan P.");
    // img_url is never touched by updates
    assert_eq!(current.document.img_url, saved.document.img_url);
}

#[tokio::test]
async fn get_of_missing_id_yields_none() {
    let services = create_in_memory_app().unwrap();
    let service = services.record_service;

    let missing = RecordId::new("abc123".to_string()).unwrap();
    let value = service.get(&missing).next().await.unwrap();
    assert!(value.is_none());
}

#[tokio::test]
async fn names_differing_in_spacing_share_one_storage_key() {
    let services = create_in_memory_app().unwrap();
    let service = services.record_service;

    let first = service.save(small_file(), juan_perez(), None).await.unwrap();

    let mut spaced = juan_perez();
    spaced.nombre_imagen = "Ju an Pe rez".to_string();
    let second = service.save(small_file(), spaced, None).await.unwrap();

    // Same derived key, so the same object URL; two distinct documents.
    assert_eq!(first.document.img_url, second.document.img_url);
    assert_ne!(first.id, second.id);

    let snapshot = service.list().next().await.unwrap();
    assert_eq!(snapshot.len(), 2);
}

#[tokio::test]
async fn update_is_idempotent() {
    let services = create_in_memory_app().unwrap();
    let service = services.record_service;

    let saved = service.save(small_file(), juan_perez(), None).await.unwrap();

    let mut fields = juan_perez();
    fields.nombre_imagen = "Juan P.".to_string();
    fields.tlf_emergencia = "555-9999".to_string();

    service.update(&saved.id, fields.clone()).await.unwrap();
    let once = service.get(&saved.id).next().await.unwrap().unwrap();

    service.update(&saved.id, fields).await.unwrap();
    let twice = service.get(&saved.id).next().await.unwrap().unwrap();

    assert_eq!(once, twice);
}

#[tokio::test]
async fn update_of_missing_id_propagates_the_error() {
    let services = create_in_memory_app().unwrap();
    let service = services.record_service;

    let missing = RecordId::new("abc123".to_string()).unwrap();
    let err = service.update(&missing, juan_perez()).await.unwrap_err();
    assert!(matches!(err, StoreError::RecordNotFound { .. }));
}

#[tokio::test]
async fn save_reports_progress_on_its_own_channel() {
    let services = create_in_memory_app().unwrap();
    let service = services.record_service;

    let (tx, rx) = progress_channel();
    service.save(small_file(), juan_perez(), Some(tx)).await.unwrap();

    let latest = *rx.borrow();
    assert!(latest.is_complete());
    assert_eq!(latest.total_bytes, b"not really a jpeg".len() as u64);
    assert_eq!(latest.percent(), 100.0);
}

#[tokio::test]
async fn concurrent_saves_do_not_share_progress() {
    let services = create_in_memory_app().unwrap();
    let service = Arc::new(services.record_service);

    let (tx_a, rx_a) = progress_channel();
    let (tx_b, rx_b) = progress_channel();

    let mut big = juan_perez();
    big.nombre_imagen = "Grande".to_string();
    let big_file = PendingFile::new(Bytes::from(vec![0u8; 4096]));

    let a = service.save(small_file(), juan_perez(), Some(tx_a));
    let b = service.save(big_file, big, Some(tx_b));
    let (a, b) = tokio::join!(a, b);
    a.unwrap();
    b.unwrap();

    assert_eq!(rx_a.borrow().total_bytes, b"not really a jpeg".len() as u64);
    assert_eq!(rx_b.borrow().total_bytes, 4096);
    assert!(rx_a.borrow().is_complete());
    assert!(rx_b.borrow().is_complete());
}

/// Object store double whose uploads always fail.
struct BrokenUploadStore;

#[async_trait]
impl ObjectStore for BrokenUploadStore {
    async fn upload(
        &self,
        key: &StorageKey,
        _data: Bytes,
        _content_type: Option<&str>,
        _progress: Option<&ProgressSender>,
    ) -> ObjectStoreResult<()> {
        Err(ObjectStoreError::UploadFailed {
            key: key.clone(),
            message: "wire unplugged".to_string(),
        })
    }

    async fn download_url(&self, key: &StorageKey) -> ObjectStoreResult<String> {
        Err(ObjectStoreError::ObjectNotFound { key: key.clone() })
    }

    async fn delete(&self, key: &StorageKey) -> ObjectStoreResult<()> {
        Err(ObjectStoreError::ObjectNotFound { key: key.clone() })
    }
}

#[tokio::test]
async fn failed_upload_writes_no_document() {
    let records = Arc::new(InMemoryRecordStore::new());
    let service = RecordServiceBuilder::new()
        .records(records.clone())
        .objects(Arc::new(BrokenUploadStore))
        .notifier(Arc::new(LogNotifier))
        .build()
        .unwrap();

    let err = service.save(small_file(), juan_perez(), None).await.unwrap_err();
    assert!(matches!(err, SaveError::Upload(_)));
    assert!(records.subscribe().borrow().is_empty());
}

/// Record store double that rejects every write.
struct RejectingRecordStore {
    inner: InMemoryRecordStore,
}

#[async_trait]
impl RecordStore for RejectingRecordStore {
    fn subscribe(&self) -> tokio::sync::watch::Receiver<Vec<image_registry::ImageRecord>> {
        self.inner.subscribe()
    }

    async fn add(&self, _document: RecordDocument) -> StoreResult<RecordId> {
        Err(StoreError::Backend {
            message: "collection unavailable".to_string(),
            cause: None,
        })
    }

    async fn update(&self, id: &RecordId, _fields: &RecordFields) -> StoreResult<()> {
        Err(StoreError::RecordNotFound { id: id.clone() })
    }

    async fn delete(&self, id: &RecordId) -> StoreResult<()> {
        Err(StoreError::RecordNotFound { id: id.clone() })
    }
}

#[tokio::test]
async fn failed_document_write_leaves_object_orphaned() {
    let objects = Arc::new(ApacheObjectStoreAdapter::new(
        Arc::new(InMemory::new()),
        "https://storage.local",
    ));
    let service = RecordServiceBuilder::new()
        .records(Arc::new(RejectingRecordStore {
            inner: InMemoryRecordStore::new(),
        }))
        .objects(objects.clone())
        .notifier(Arc::new(LogNotifier))
        .build()
        .unwrap();

    let err = service.save(small_file(), juan_perez(), None).await.unwrap_err();
    assert!(matches!(err, SaveError::Document(_)));

    // The upload succeeded before the write failed; the object is orphaned.
    let key = StorageKey::for_image_name("Juan Perez").unwrap();
    let url = objects.download_url(&key).await.unwrap();
    assert_eq!(url, "https://storage.local/img/JuanPerez");
}

/// Object store double whose deletes always fail; uploads delegate to a
/// real in-memory store.
struct BrokenDeleteStore {
    inner: ApacheObjectStoreAdapter,
}

#[async_trait]
impl ObjectStore for BrokenDeleteStore {
    async fn upload(
        &self,
        key: &StorageKey,
        data: Bytes,
        content_type: Option<&str>,
        progress: Option<&ProgressSender>,
    ) -> ObjectStoreResult<()> {
        self.inner.upload(key, data, content_type, progress).await
    }

    async fn download_url(&self, key: &StorageKey) -> ObjectStoreResult<String> {
        self.inner.download_url(key).await
    }

    async fn delete(&self, _key: &StorageKey) -> ObjectStoreResult<()> {
        Err(ObjectStoreError::Backend {
            message: "delete refused".to_string(),
            cause: None,
        })
    }
}

/// Notifier double recording whether the success dialog fired.
#[derive(Default)]
struct RecordingNotifier {
    fired: AtomicBool,
    messages: Mutex<Vec<String>>,
}

impl Notifier for RecordingNotifier {
    fn success(&self, _title: &str, message: &str) {
        self.fired.store(true, Ordering::SeqCst);
        self.messages.lock().unwrap().push(message.to_string());
    }
}

#[tokio::test]
async fn delete_result_reflects_only_the_document_outcome() {
    let notifier = Arc::new(RecordingNotifier::default());
    let records = Arc::new(InMemoryRecordStore::new());
    let service = RecordServiceBuilder::new()
        .records(records.clone())
        .objects(Arc::new(BrokenDeleteStore {
            inner: ApacheObjectStoreAdapter::new(Arc::new(InMemory::new()), "https://storage.local"),
        }))
        .notifier(notifier.clone())
        .build()
        .unwrap();

    let saved = service.save(small_file(), juan_perez(), None).await.unwrap();

    // Object delete fails, document delete succeeds: the call reports
    // success and no dialog is shown.
    service.delete(&saved.id, "Juan Perez").await.unwrap();
    assert!(!notifier.fired.load(Ordering::SeqCst));
    assert!(records.subscribe().borrow().is_empty());
}

#[tokio::test]
async fn successful_object_delete_raises_the_dialog() {
    let notifier = Arc::new(RecordingNotifier::default());
    let services = AppBuilder::new().with_notifier(notifier.clone()).build().unwrap();
    let service = services.record_service;

    let saved = service.save(small_file(), juan_perez(), None).await.unwrap();
    service.delete(&saved.id, "Juan Perez").await.unwrap();

    assert!(notifier.fired.load(Ordering::SeqCst));
    assert_eq!(
        notifier.messages.lock().unwrap().as_slice(),
        ["The record was deleted successfully"]
    );

    let snapshot = service.list().next().await.unwrap();
    assert!(snapshot.is_empty());
}

#[tokio::test]
async fn delete_of_missing_document_propagates() {
    let services = create_in_memory_app().unwrap();
    let service = services.record_service;

    let missing = RecordId::new("abc123".to_string()).unwrap();
    let err = service.delete(&missing, "Juan Perez").await.unwrap_err();
    assert!(matches!(err, StoreError::RecordNotFound { .. }));
}
