use serde::Serialize;

use exctrack_core::ExceptionRecord;

/// Acknowledgement returned by the retry and notify endpoints.
#[derive(Debug, Serialize)]
pub struct ExceptionActionResponse {
    pub message: &'static str,
    pub exception: ExceptionRecord,
}

impl ExceptionActionResponse {
    pub fn retry_initiated(exception: ExceptionRecord) -> Self {
        Self {
            message: "Retry initiated",
            exception,
        }
    }

    pub fn notification_sent(exception: ExceptionRecord) -> Self {
        Self {
            message: "Notification sent",
            exception,
        }
    }
}
