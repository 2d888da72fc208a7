//! Tracing subscriber setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::constants::{DEFAULT_LOG_FILTER, VERBOSE_LOG_FILTER};

/// Initialize the global tracing subscriber.
///
/// Verbose mode forces debug level, otherwise `RUST_LOG` is honoured.
/// Returns `false` when a subscriber was already installed, so test
/// binaries may call this from every test.
pub fn init_tracing(verbose: bool) -> bool {
    let filter = if verbose {
        VERBOSE_LOG_FILTER.to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .with(tracing_subscriber::EnvFilter::new(filter))
        .try_init()
        .is_ok()
}
