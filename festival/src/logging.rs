//! `tracing` subscriber setup.
//!
//! The library crates only emit events; installing a subscriber is left to
//! the application.

use tracing_subscriber::{fmt, EnvFilter};

/// Install a global `fmt` subscriber.
///
/// The filter is read from `RUST_LOG` (default `info`), e.g.
/// `RUST_LOG=fest_rules=debug` to see which rule strings were dropped.
///
/// # Example
/// ```no_run
/// festival::logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// Install a `debug`-level subscriber that writes through the test harness.
///
/// Safe to call from every test; only the first call takes effect.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
