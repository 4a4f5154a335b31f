use tokio::sync::watch;

/// A snapshot of upload progress, updated on every chunk the store reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UploadProgress {
    pub bytes_transferred: u64,
    pub total_bytes: u64,
}

impl UploadProgress {
    /// Percentage complete, 0.0 to 100.0. An empty upload reports 100.
    pub fn percent(&self) -> f64 {
        if self.total_bytes == 0 {
            return 100.0;
        }
        (self.bytes_transferred as f64 / self.total_bytes as f64) * 100.0
    }

    pub fn is_complete(&self) -> bool {
        self.bytes_transferred >= self.total_bytes
    }
}

/// Sending half of a per-upload progress channel.
///
/// Each `save` call gets its own channel, so concurrent uploads cannot
/// overwrite one another's progress. Reporting when every receiver is gone
/// is a no-op.
#[derive(Debug, Clone)]
pub struct ProgressSender {
    tx: watch::Sender<UploadProgress>,
}

/// Receiving half: holds the latest progress snapshot and wakes on change.
pub type ProgressReceiver = watch::Receiver<UploadProgress>;

/// Create a progress channel for one upload.
pub fn progress_channel() -> (ProgressSender, ProgressReceiver) {
    let (tx, rx) = watch::channel(UploadProgress::default());
    (ProgressSender { tx }, rx)
}

impl ProgressSender {
    /// Publish the latest byte counts.
    pub fn report(&self, bytes_transferred: u64, total_bytes: u64) {
        let _ = self.tx.send(UploadProgress {
            bytes_transferred,
            total_bytes,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_tracks_bytes() {
        let progress = UploadProgress {
            bytes_transferred: 25,
            total_bytes: 100,
        };
        assert_eq!(progress.percent(), 25.0);
        assert!(!progress.is_complete());
    }

    #[test]
    fn empty_upload_is_complete() {
        let progress = UploadProgress::default();
        assert_eq!(progress.percent(), 100.0);
        assert!(progress.is_complete());
    }

    #[test]
    fn channel_delivers_latest_snapshot() {
        let (tx, rx) = progress_channel();
        tx.report(10, 40);
        tx.report(40, 40);
        let latest = *rx.borrow();
        assert_eq!(latest.bytes_transferred, 40);
        assert!(latest.is_complete());
    }
}
