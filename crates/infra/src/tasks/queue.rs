//! Task queues.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use chrono::Utc;
use tracing::{debug, warn};

use super::handler::TaskHandler;
use super::types::{DeferredTask, TaskId, TaskOutcome};

/// Enqueue boundary for deferred work.
///
/// `enqueue` returns as soon as the task is accepted; the caller never waits
/// for, or learns about, the outcome.
pub trait TaskQueue: Send + Sync {
    fn enqueue(&self, task: DeferredTask) -> TaskId;

    /// Runtime counters, for queues that keep them.
    fn stats(&self) -> Option<TaskStats> {
        None
    }
}

impl<Q> TaskQueue for Arc<Q>
where
    Q: TaskQueue + ?Sized,
{
    fn enqueue(&self, task: DeferredTask) -> TaskId {
        (**self).enqueue(task)
    }

    fn stats(&self) -> Option<TaskStats> {
        (**self).stats()
    }
}

/// Queue runtime statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub enqueued: u64,
    pub completed: u64,
    pub failed: u64,
    pub running: usize,
}

#[derive(Debug, Default)]
struct Counters {
    enqueued: AtomicU64,
    completed: AtomicU64,
    failed: AtomicU64,
    running: AtomicUsize,
}

/// In-process queue: every task runs once on its own tokio task.
///
/// No ordering between tasks and no cancellation; a task outlives the request
/// that enqueued it. `enqueue` must be called from within a tokio runtime.
pub struct SpawnedTaskQueue<H> {
    name: String,
    handler: Arc<H>,
    counters: Arc<Counters>,
}

impl<H: TaskHandler> SpawnedTaskQueue<H> {
    pub fn new(handler: H) -> Self {
        Self {
            name: "deferred-tasks".to_string(),
            handler: Arc::new(handler),
            counters: Arc::new(Counters::default()),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }
}

impl<H: TaskHandler> TaskQueue for SpawnedTaskQueue<H> {
    fn stats(&self) -> Option<TaskStats> {
        Some(TaskStats {
            enqueued: self.counters.enqueued.load(Ordering::Relaxed),
            completed: self.counters.completed.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
            running: self.counters.running.load(Ordering::Relaxed),
        })
    }

    fn enqueue(&self, task: DeferredTask) -> TaskId {
        let task_id = task.id;
        self.counters.enqueued.fetch_add(1, Ordering::Relaxed);

        let name = self.name.clone();
        let handler = self.handler.clone();
        let counters = self.counters.clone();

        tokio::spawn(async move {
            counters.running.fetch_add(1, Ordering::Relaxed);
            debug!(
                queue = %name,
                task_id = %task.id,
                kind = task.kind.as_str(),
                exception_id = %task.exception.id(),
                queued_ms = task.queued_ms(Utc::now()),
                "task started"
            );

            let outcome = handler.run(&task).await;
            counters.running.fetch_sub(1, Ordering::Relaxed);

            match outcome {
                TaskOutcome::Success => {
                    counters.completed.fetch_add(1, Ordering::Relaxed);
                    debug!(queue = %name, task_id = %task.id, "task completed");
                }
                TaskOutcome::Failure(error) => {
                    counters.failed.fetch_add(1, Ordering::Relaxed);
                    warn!(queue = %name, task_id = %task.id, error = %error, "task failed");
                }
            }
        });

        task_id
    }
}
