//! Tracing setup for `circdesk`.
//!
//! The desk reports to the librarian on stdout, so every subscriber built
//! here writes to stderr. Card issues, check-outs and returns log at `info`;
//! listing refreshes and parsed commands log at `debug`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Quiet logging for an interactive session: only warnings, such as a
/// missing collection file falling back to the sample shelf
pub fn init() {
    init_with_level("warn")
}

/// Log desk activity from `default_level` up (`circdesk --verbose` passes
/// `debug`). RUST_LOG, when set, takes precedence.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Route desk logs into the test harness's captured output
///
/// Safe to call from every test; only the first call installs a subscriber.
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("circulation_core=debug"))
        .try_init();
}
