//! Structured logging using **tracing**.
//!
//! Extractors emit one `debug` event per file with its route or call count;
//! the builder emits an `info` summary per run. Events are written to stderr
//! as JSON lines, leaving stdout to the route report so it can be piped or
//! diffed between runs.

use tracing::{info, warn};

/// Installs the JSON subscriber for the `deadroute` binary.
///
/// Must run once, before the first analysis. Nothing is logged unless
/// `RUST_LOG` enables it; `RUST_LOG=deadroute_core=debug` shows per-file
/// extraction counts, `info` shows only the run summary.
pub fn init_structured_logging() {
    tracing_subscriber::fmt()
        .json()
        .with_ansi(false)
        .with_level(true)
        .with_target(true)
        .with_current_span(true)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

/// Logs a warning event.
pub fn log_warn(message: &str) {
    warn!(detail = %message);
}

/// Logs an info event.
pub fn log_info(message: &str) {
    info!(detail = %message);
}
