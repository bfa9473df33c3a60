#![warn(missing_docs)]
//! Deterministic testing surfaces: fixture data packs, JSON golden snapshots and test
//! logging.

mod fixtures;
mod snapshot;

use std::sync::Once;

pub use fixtures::*;
pub use snapshot::*;

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness writer. Safe to call from every test.
///
/// Honors `RUST_LOG`; defaults to `warn`.
pub fn init_test_tracing() {
    TRACING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
