//! Diagnostic tracing for the CLI.
//!
//! Answers, example listings and timing notices are product output and go
//! to stdout through the dispatcher's report sink. Tracing is diagnostics
//! only and goes to stderr.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`. Defaults to `warn` if unset.
///
/// # Example
/// ```bash
/// RUST_LOG=aoc_dispatch=debug aoc run -y 2020 -d 1 -e
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
