//! Logging infrastructure for ventes
//!
//! Progress and per-row diagnostics go to stderr so the result listing
//! on stdout stays clean for the operator.

use crate::config::LoggingConfig;
use crate::error::Error;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

/// Initialize the logging system
///
/// The level comes from config and can be overridden with `RUST_LOG`.
pub fn init(config: &LoggingConfig) -> crate::error::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|e| Error::Config(format!("failed to initialize logging: {}", e)))?;

    tracing::debug!(level = %config.level, "Logging initialized");

    Ok(())
}

/// Initialize logging for tests (logs to the test writer)
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .with_span_events(FmtSpan::CLOSE)
        .try_init();
}
