pub mod notify;
pub mod repositories;
pub mod services;
pub mod storage;

// Re-export all port traits for convenience
pub use notify::Notifier;
pub use repositories::RecordStore;
pub use services::{RecordListStream, RecordService, RecordStream};
pub use storage::ObjectStore;
