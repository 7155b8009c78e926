//! Deferred (fire-and-forget) task execution.
//!
//! ## Design
//!
//! - Callers hand a `DeferredTask` to a `TaskQueue` and get a `TaskId` back
//!   immediately; enqueueing never fails the caller
//! - A `TaskHandler` does the actual work; the default `SimulatedRetry` only
//!   waits, standing in for a real retry pipeline
//! - `SpawnedTaskQueue` runs every task once on its own tokio task; a durable
//!   queue can replace it behind the same trait
//!
//! ## Components
//!
//! - `DeferredTask`: task payload and metadata
//! - `TaskQueue`: enqueue boundary used by the API layer
//! - `TaskHandler`: work executed per task
//! - `SpawnedTaskQueue`: in-process runner with counters

pub mod handler;
pub mod queue;
pub mod types;

pub use handler::{SimulatedRetry, TaskHandler};
pub use queue::{SpawnedTaskQueue, TaskQueue, TaskStats};
pub use types::{DeferredTask, TaskId, TaskKind, TaskOutcome};
