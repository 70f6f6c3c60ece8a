//! User-facing error notifications

/// Sink for the one notification every failed call raises
pub trait Notifier: Send + Sync {
    /// Show an error message to the user
    fn error(&self, message: &str);
}

/// Notifier that reports through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        error!(target: "cockpit::notify", "{message}");
    }
}

impl<F> Notifier for F
where
    F: Fn(&str) + Send + Sync,
{
    fn error(&self, message: &str) {
        self(message);
    }
}
