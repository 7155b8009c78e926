//! Core task types.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use exctrack_core::ExceptionRecord;

/// Unique task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task kind, used for routing and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Re-run the job behind an exception record.
    RetryException,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::RetryException => "retry_exception",
        }
    }
}

/// A unit of deferred work.
///
/// Carries a snapshot of the exception as it was when the task was enqueued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredTask {
    pub id: TaskId,
    pub kind: TaskKind,
    pub exception: ExceptionRecord,
    pub enqueued_at: DateTime<Utc>,
}

impl DeferredTask {
    /// Task that retries the job behind `exception`.
    pub fn retry(exception: ExceptionRecord) -> Self {
        Self {
            id: TaskId::new(),
            kind: TaskKind::RetryException,
            exception,
            enqueued_at: Utc::now(),
        }
    }

    /// Milliseconds since the task was enqueued.
    pub fn queued_ms(&self, now: DateTime<Utc>) -> i64 {
        (now - self.enqueued_at).num_milliseconds().max(0)
    }
}

/// Result of running a task. Never reported back to whoever enqueued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Success,
    Failure(String),
}
