pub mod progress;
pub mod record;

pub use progress::{progress_channel, ProgressReceiver, ProgressSender, UploadProgress};
pub use record::{ImageRecord, PendingFile, RecordDocument, RecordFields};
