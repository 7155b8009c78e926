//! MongoDB-backed exception store.
//!
//! One collection, one document per exception record:
//!
//! ```text
//! { _id: ObjectId, error_name: string, reason_message: string,
//!   timestamp: date, retry_count: int64, visit_id: string }
//! ```
//!
//! BSON dates carry millisecond precision. `insert` returns the decoded
//! persisted document, so the record it hands back is the one later reads see.

use bson::{doc, oid::ObjectId};
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use exctrack_core::{ExceptionId, ExceptionRecord, NewException};

use super::r#trait::{ExceptionStore, StoreError};
use crate::config::StoreConfig;

/// Collection holding exception documents.
pub const COLLECTION_NAME: &str = "ExceptionDocument";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ExceptionDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    error_name: String,
    reason_message: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    timestamp: DateTime<Utc>,
    retry_count: i64,
    visit_id: String,
}

impl ExceptionDocument {
    fn from_record(record: &ExceptionRecord) -> Self {
        Self {
            id: *record.id().as_object_id(),
            error_name: record.error_name().to_string(),
            reason_message: record.reason_message().to_string(),
            timestamp: record.timestamp(),
            retry_count: i64::from(record.retry_count()),
            visit_id: record.visit_id().to_string(),
        }
    }

    fn into_record(self) -> Result<ExceptionRecord, StoreError> {
        let retry_count = u32::try_from(self.retry_count).map_err(|_| {
            StoreError::Persistence(format!(
                "document {} has out-of-range retry_count {}",
                self.id, self.retry_count
            ))
        })?;

        Ok(ExceptionRecord::restore(
            ExceptionId::from_object_id(self.id),
            self.error_name,
            self.reason_message,
            self.timestamp,
            retry_count,
            self.visit_id,
        ))
    }
}

fn persistence(err: mongodb::error::Error) -> StoreError {
    StoreError::Persistence(err.to_string())
}

/// Store handle bound to the exception collection.
///
/// `mongodb::Client` pools connections internally and is cheap to clone, so
/// one handle is shared by every request.
#[derive(Clone)]
pub struct MongoExceptionStore {
    collection: Collection<ExceptionDocument>,
}

impl MongoExceptionStore {
    /// Connect, bind the exception collection and verify the deployment answers.
    ///
    /// The driver connects lazily, so a `ping` is issued here to surface an
    /// unreachable host or rejected credentials before the process serves traffic.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(&config.uri)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(&config.database));

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        info!(
            database = %database.name(),
            collection = COLLECTION_NAME,
            "document store connection established"
        );

        Ok(Self {
            collection: database.collection(COLLECTION_NAME),
        })
    }
}

#[async_trait::async_trait]
impl ExceptionStore for MongoExceptionStore {
    async fn insert(&self, new: NewException) -> Result<ExceptionRecord, StoreError> {
        let record = ExceptionRecord::from_new(ExceptionId::new(), new);
        let document = ExceptionDocument::from_record(&record);

        self.collection
            .insert_one(&document)
            .await
            .map_err(persistence)?;
        debug!(exception_id = %record.id(), "exception document inserted");

        // Round-trip through BSON so the returned timestamp has stored precision.
        ExceptionDocument {
            timestamp: bson::DateTime::from_chrono(document.timestamp).to_chrono(),
            ..document
        }
        .into_record()
    }

    async fn find_by_id(&self, id: ExceptionId) -> Result<Option<ExceptionRecord>, StoreError> {
        self.collection
            .find_one(doc! { "_id": *id.as_object_id() })
            .await
            .map_err(persistence)?
            .map(ExceptionDocument::into_record)
            .transpose()
    }

    async fn find_all(&self) -> Result<Vec<ExceptionRecord>, StoreError> {
        let documents: Vec<ExceptionDocument> = self
            .collection
            .find(doc! {})
            .await
            .map_err(persistence)?
            .try_collect()
            .await
            .map_err(persistence)?;

        documents
            .into_iter()
            .map(ExceptionDocument::into_record)
            .collect()
    }

    async fn update(&self, record: &ExceptionRecord) -> Result<(), StoreError> {
        let result = self
            .collection
            .replace_one(
                doc! { "_id": *record.id().as_object_id() },
                ExceptionDocument::from_record(record),
            )
            .await
            .map_err(persistence)?;

        if result.matched_count == 0 {
            return Err(StoreError::NotFound(record.id()));
        }
        debug!(
            exception_id = %record.id(),
            retry_count = record.retry_count(),
            "exception document replaced"
        );
        Ok(())
    }
}
