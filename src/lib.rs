pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - core business entities and value objects
pub use domain::{
    progress_channel,
    ImageRecord,
    // Errors
    ObjectStoreError,
    PendingFile,
    ProgressReceiver,
    ProgressSender,
    RecordDocument,
    RecordFields,
    // Value objects
    RecordId,
    SaveError,
    StorageKey,
    StoreError,
    UploadProgress,
    ValidationError,
};

// Port types - interfaces for external systems
pub use ports::{Notifier, ObjectStore, RecordListStream, RecordService, RecordStore, RecordStream};

// Service implementations - business logic
pub use services::{RecordServiceBuilder, RecordServiceImpl};

// Application factory and configuration
pub use app::{
    create_in_memory_app, create_local_app, create_s3_app, AppBuilder, AppConfig, AppDependencies,
    AppError, AppServices, StorageBackend,
};

// Adapter types - infrastructure implementations
pub use adapters::outbound::{
    notify::LogNotifier,
    persistence::{InMemoryRecordStore, DEFAULT_COLLECTION},
    storage::ApacheObjectStoreAdapter,
};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        create_in_memory_app, create_local_app, create_s3_app, ApacheObjectStoreAdapter,
        AppBuilder, AppServices, ImageRecord, InMemoryRecordStore, LogNotifier, Notifier,
        ObjectStore, PendingFile, RecordFields, RecordId, RecordService, RecordServiceImpl,
        RecordStore, StorageKey,
    };
}
