//! `exctrack-core` — exception record model.
//!
//! This crate contains **pure domain** types (no IO, no HTTP, no storage).

pub mod error;
pub mod exception;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use exception::{ExceptionRecord, NewException};
pub use id::ExceptionId;
