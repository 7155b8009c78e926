use std::sync::Arc;

use thiserror::Error;

use exctrack_core::{ExceptionId, ExceptionRecord, NewException};

/// Record store operation error.
///
/// These are **infrastructure errors**. Input validation lives in the domain
/// layer (`DomainError`).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The database could not be reached or rejected the credentials.
    #[error("connection failed: {0}")]
    Connection(String),

    /// An I/O or encoding failure while reading or writing a record.
    #[error("persistence failed: {0}")]
    Persistence(String),

    /// An update targeted a record that does not exist.
    #[error("exception not found: {0}")]
    NotFound(ExceptionId),
}

/// Async store for exception records.
///
/// Every call may perform network I/O; implementations keep no cache, so each
/// read observes the latest persisted state.
#[async_trait::async_trait]
pub trait ExceptionStore: Send + Sync {
    /// Persist a new record with a freshly assigned id and `retry_count = 0`.
    ///
    /// Returns the record exactly as a later `find_by_id` would return it.
    async fn insert(&self, new: NewException) -> Result<ExceptionRecord, StoreError>;

    /// Fetch a single record. `Ok(None)` means no record has this id.
    async fn find_by_id(&self, id: ExceptionId) -> Result<Option<ExceptionRecord>, StoreError>;

    /// Fetch every record in the store's natural order, fully materialized.
    async fn find_all(&self) -> Result<Vec<ExceptionRecord>, StoreError>;

    /// Overwrite the stored record that has the same id.
    ///
    /// Last write wins; there is no concurrency token.
    async fn update(&self, record: &ExceptionRecord) -> Result<(), StoreError>;
}

#[async_trait::async_trait]
impl<S> ExceptionStore for Arc<S>
where
    S: ExceptionStore + ?Sized,
{
    async fn insert(&self, new: NewException) -> Result<ExceptionRecord, StoreError> {
        (**self).insert(new).await
    }

    async fn find_by_id(&self, id: ExceptionId) -> Result<Option<ExceptionRecord>, StoreError> {
        (**self).find_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<ExceptionRecord>, StoreError> {
        (**self).find_all().await
    }

    async fn update(&self, record: &ExceptionRecord) -> Result<(), StoreError> {
        (**self).update(record).await
    }
}
