//! Infrastructure layer: document store, deferred tasks, notifications, config.

pub mod config;
pub mod notify;
pub mod store;
pub mod tasks;

pub use config::{AppConfig, ConfigError, StoreConfig};
pub use notify::{Notifier, TracingNotifier};
pub use store::{ExceptionStore, InMemoryExceptionStore, MongoExceptionStore, StoreError};
pub use tasks::{DeferredTask, SimulatedRetry, SpawnedTaskQueue, TaskHandler, TaskQueue};
