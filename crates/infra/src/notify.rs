//! Operator notifications.

use tracing::warn;

use exctrack_core::ExceptionRecord;

/// Tells the team about an exception.
///
/// Real delivery (mail, chat, paging) would sit behind this trait.
pub trait Notifier: Send + Sync {
    fn notify(&self, exception: &ExceptionRecord);
}

impl<N> Notifier for std::sync::Arc<N>
where
    N: Notifier + ?Sized,
{
    fn notify(&self, exception: &ExceptionRecord) {
        (**self).notify(exception)
    }
}

/// Emits the notification as a structured log line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, exception: &ExceptionRecord) {
        warn!(
            exception_id = %exception.id(),
            visit_id = exception.visit_id(),
            retry_count = exception.retry_count(),
            "Notify team: Error {} failed with error {}",
            exception.error_name(),
            exception.reason_message(),
        );
    }
}
