/// Port for fire-and-forget user-facing notifications.
///
/// The service only ever raises a success dialog (after a stored object is
/// deleted); failures go to logs, never to the user.
pub trait Notifier: Send + Sync + 'static {
    fn success(&self, title: &str, message: &str);
}
