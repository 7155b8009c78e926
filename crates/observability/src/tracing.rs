//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize JSON logging for the process.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init()
        .is_ok()
}

/// Initialize compact, test-captured logging.
///
/// Output goes through the libtest writer so it only shows for failing tests.
pub fn init_for_tests() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .compact()
        .with_test_writer()
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_is_info() {
        assert_eq!(DEFAULT_FILTER, "info");
        assert!(DEFAULT_FILTER.parse::<EnvFilter>().is_ok());
    }

    #[test]
    fn repeated_initialization_is_a_no_op() {
        init_for_tests();
        assert!(!init_for_tests());
        assert!(!init());
    }
}
