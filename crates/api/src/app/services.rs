//! Service wiring: the store handle, deferred task queue and notifier shared by
//! every request, plus the operations the HTTP handlers call.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use exctrack_core::{DomainError, ExceptionId, ExceptionRecord, NewException};
use exctrack_infra::{
    AppConfig, DeferredTask, ExceptionStore, InMemoryExceptionStore, MongoExceptionStore,
    Notifier, SimulatedRetry, SpawnedTaskQueue, StoreError, TaskQueue, TracingNotifier,
    config::ENV_MONGODB_URI, tasks::TaskStats,
};

/// Failure of a service operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Request-independent dependencies, injected into handlers as
/// `Extension<Arc<AppServices>>`.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn ExceptionStore>,
    tasks: Arc<dyn TaskQueue>,
    notifier: Arc<dyn Notifier>,
}

impl AppServices {
    pub fn new(
        store: Arc<dyn ExceptionStore>,
        tasks: Arc<dyn TaskQueue>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            tasks,
            notifier,
        }
    }

    /// In-memory wiring (dev/test): in-memory store, spawned retry tasks, log notifier.
    pub fn in_memory(retry_task_delay: Duration) -> Self {
        let tasks =
            SpawnedTaskQueue::new(SimulatedRetry::new(retry_task_delay)).with_name("retry-tasks");
        Self::new(
            Arc::new(InMemoryExceptionStore::new()),
            Arc::new(tasks),
            Arc::new(TracingNotifier),
        )
    }

    /// Deferred task counters, when the configured queue keeps them.
    pub fn task_stats(&self) -> Option<TaskStats> {
        self.tasks.stats()
    }

    pub async fn create_exception(
        &self,
        new: NewException,
    ) -> Result<ExceptionRecord, ServiceError> {
        new.validate()?;
        let record = self.store.insert(new).await?;
        info!(
            exception_id = %record.id(),
            error_name = record.error_name(),
            visit_id = record.visit_id(),
            "exception recorded"
        );
        Ok(record)
    }

    pub async fn list_exceptions(&self) -> Result<Vec<ExceptionRecord>, ServiceError> {
        Ok(self.store.find_all().await?)
    }

    pub async fn get_exception(&self, id: ExceptionId) -> Result<ExceptionRecord, ServiceError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found().into())
    }

    /// Count a retry, persist it, and hand the retry work to the task queue.
    ///
    /// Returns the post-increment record. Concurrent retries on one id race;
    /// the last write wins.
    pub async fn retry_exception(&self, id: ExceptionId) -> Result<ExceptionRecord, ServiceError> {
        let mut record = self.get_exception(id).await?;
        record.record_retry();
        self.store.update(&record).await?;

        let task_id = self.tasks.enqueue(DeferredTask::retry(record.clone()));
        info!(
            exception_id = %id,
            retry_count = record.retry_count(),
            task_id = %task_id,
            "retry initiated"
        );
        Ok(record)
    }

    /// Notify the team about a record. Read-only.
    pub async fn notify_exception(&self, id: ExceptionId) -> Result<ExceptionRecord, ServiceError> {
        let record = self.get_exception(id).await?;
        self.notifier.notify(&record);
        Ok(record)
    }
}

/// Build the production service graph from configuration.
///
/// With a connection string the document store must be reachable; the error is
/// returned so the caller can abort startup.
pub async fn build_services(config: &AppConfig) -> Result<AppServices, StoreError> {
    let store: Arc<dyn ExceptionStore> = match &config.store {
        Some(store_config) => Arc::new(MongoExceptionStore::connect(store_config).await?),
        None => {
            warn!(
                "{ENV_MONGODB_URI} not set; using in-memory exception store \
                 (data is lost on exit)"
            );
            Arc::new(InMemoryExceptionStore::new())
        }
    };

    let tasks = SpawnedTaskQueue::new(SimulatedRetry::new(config.retry_task_delay))
        .with_name("retry-tasks");

    Ok(AppServices::new(store, Arc::new(tasks), Arc::new(TracingNotifier)))
}
