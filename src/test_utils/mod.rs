//! Test utilities for virtgraph
//!
//! Builders for the element shapes tests need over and over, ready-made batches
//! for the reference scenarios, and a one-time logging setup.
//!
//! # Example
//!
//! ```rust,no_run
//! use virtgraph::resolver::resolve;
//! use virtgraph::test_utils::{BatchFixture, init_test_logging};
//!
//! init_test_logging(None);
//! let graph = resolve(&BatchFixture::pool_and_volume().elements()).unwrap();
//! assert_eq!(graph.len(), 2);
//! ```

pub mod fixtures;

pub use fixtures::{BatchFixture, cloudinit, domain, ignition, network, pool, volume};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests, once per process.
///
/// Uses `level` when given, otherwise `RUST_LOG`. With neither, logging stays off.
///
/// ```bash
/// RUST_LOG=virtgraph=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
