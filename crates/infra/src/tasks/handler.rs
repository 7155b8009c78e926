//! Task handlers: the work behind a deferred task.

use std::time::Duration;

use tracing::debug;

use super::types::{DeferredTask, TaskOutcome};
use crate::config::DEFAULT_RETRY_TASK_DELAY;

/// Executes deferred tasks.
///
/// This is where real retry logic plugs in (re-submitting the failed job,
/// updating the record with the result, ...).
#[async_trait::async_trait]
pub trait TaskHandler: Send + Sync + 'static {
    async fn run(&self, task: &DeferredTask) -> TaskOutcome;
}

/// Placeholder retry: waits for `delay` and succeeds without side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedRetry {
    delay: Duration,
}

impl SimulatedRetry {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedRetry {
    fn default() -> Self {
        Self::new(DEFAULT_RETRY_TASK_DELAY)
    }
}

#[async_trait::async_trait]
impl TaskHandler for SimulatedRetry {
    async fn run(&self, task: &DeferredTask) -> TaskOutcome {
        debug!(
            task_id = %task.id,
            exception_id = %task.exception.id(),
            delay_ms = self.delay.as_millis() as u64,
            "simulating retry work"
        );
        tokio::time::sleep(self.delay).await;
        TaskOutcome::Success
    }
}
