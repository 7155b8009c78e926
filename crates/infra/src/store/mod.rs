//! Exception record storage boundary.
//!
//! One collection of exception records, keyed by store-assigned identifier.
//! Backends: an external MongoDB deployment for production and an in-memory
//! list (insertion order) for tests/dev.

pub mod in_memory;
pub mod mongo;
pub mod r#trait;

pub use in_memory::InMemoryExceptionStore;
pub use mongo::{COLLECTION_NAME, MongoExceptionStore};
pub use r#trait::{ExceptionStore, StoreError};
