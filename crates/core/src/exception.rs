//! Exception record: a stored description of a failed job with a retry counter.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::ExceptionId;

/// Create input for an exception record.
///
/// Every field is required and unknown fields are rejected, so malformed
/// payloads fail at deserialization instead of being coerced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewException {
    pub error_name: String,
    pub reason_message: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub visit_id: String,
}

/// Parse an ISO-8601 timestamp.
///
/// RFC 3339 forms carry their own offset. A timestamp without an offset
/// (`2024-01-01T00:00:00`) is taken as UTC.
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| raw.parse::<NaiveDateTime>().map(|naive| Utc.from_utc_datetime(&naive)))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

impl NewException {
    /// Checks the rules serde cannot express.
    pub fn validate(&self) -> DomainResult<()> {
        if self.error_name.trim().is_empty() {
            return Err(DomainError::validation("error_name must not be empty"));
        }
        Ok(())
    }
}

/// A persisted exception record.
///
/// `id` is fixed at creation and `retry_count` only moves through
/// [`ExceptionRecord::record_retry`]. Fields are private to keep both true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionRecord {
    id: ExceptionId,
    error_name: String,
    reason_message: String,
    timestamp: DateTime<Utc>,
    retry_count: u32,
    visit_id: String,
}

impl ExceptionRecord {
    /// Build a freshly created record (`retry_count` starts at zero).
    pub fn from_new(id: ExceptionId, new: NewException) -> Self {
        Self {
            id,
            error_name: new.error_name,
            reason_message: new.reason_message,
            timestamp: new.timestamp,
            retry_count: 0,
            visit_id: new.visit_id,
        }
    }

    /// Rehydrate a record from storage.
    pub fn restore(
        id: ExceptionId,
        error_name: String,
        reason_message: String,
        timestamp: DateTime<Utc>,
        retry_count: u32,
        visit_id: String,
    ) -> Self {
        Self {
            id,
            error_name,
            reason_message,
            timestamp,
            retry_count,
            visit_id,
        }
    }

    pub fn id(&self) -> ExceptionId {
        self.id
    }

    pub fn error_name(&self) -> &str {
        &self.error_name
    }

    pub fn reason_message(&self) -> &str {
        &self.reason_message
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub fn visit_id(&self) -> &str {
        &self.visit_id
    }

    /// Count one more retry of the underlying job and return the new count.
    pub fn record_retry(&mut self) -> u32 {
        self.retry_count = self.retry_count.saturating_add(1);
        self.retry_count
    }
}
