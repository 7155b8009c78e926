//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;

use bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DomainError;

/// Identifier of an exception record.
///
/// Wraps a 12-byte document-store object id, so ids minted by the database and
/// ids minted in-process (in-memory store) share one representation. On the
/// wire it is always the 24-character lowercase hex form.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExceptionId(ObjectId);

impl ExceptionId {
    /// Create a new, process-unique identifier.
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    pub fn from_object_id(oid: ObjectId) -> Self {
        Self(oid)
    }

    pub fn as_object_id(&self) -> &ObjectId {
        &self.0
    }
}

impl Default for ExceptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for ExceptionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl From<ObjectId> for ExceptionId {
    fn from(value: ObjectId) -> Self {
        Self(value)
    }
}

impl From<ExceptionId> for ObjectId {
    fn from(value: ExceptionId) -> Self {
        value.0
    }
}

impl FromStr for ExceptionId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let oid = ObjectId::parse_str(s)
            .map_err(|e| DomainError::invalid_id(format!("ExceptionId: {e}")))?;
        Ok(Self(oid))
    }
}

// `ObjectId`'s own serde impl emits extended JSON (`{"$oid": ...}`) outside of
// BSON, so the API representation is spelled out here.
impl Serialize for ExceptionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for ExceptionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
