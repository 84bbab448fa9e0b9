//! Diagnostic tracing for the `update-verify` binary.
//!
//! Output goes to stderr so chunk configs written to stdout stay clean.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`; falls back to `default_filter` (from settings) if unset.
///
/// # Example
/// ```bash
/// RUST_LOG=update_verify=debug update-verify check update-verify.cfg
/// ```
pub fn init(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
