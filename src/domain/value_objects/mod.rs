pub mod record_id;
pub mod storage_key;

pub use record_id::RecordId;
pub use storage_key::{StorageKey, IMAGE_FOLDER};
