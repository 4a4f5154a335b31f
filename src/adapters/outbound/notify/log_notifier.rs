use tracing::info;

use crate::ports::notify::Notifier;

/// Notifier that writes the success dialog to the log. Callers with a real
/// UI supply their own implementation of the port.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, title: &str, message: &str) {
        info!(title, message, "user notification");
    }
}
