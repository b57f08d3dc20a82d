//! Logging initialization for the CLI

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber once, reading `RUST_LOG`
///
/// Diagnostics go to stderr so stdout stays clean for the report output.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
