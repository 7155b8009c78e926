//! Tracing/logging setup shared by the service binary and tests.

/// Initialize process-wide observability (JSON logs).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers).
pub mod tracing;
