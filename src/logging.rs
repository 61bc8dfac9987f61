//! Diagnostic logging for the `sanitize` binary
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary (or to whatever embeds the library).

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`. Defaults to `warn` if unset or invalid.
/// Output: stderr, compact format, so stdout stays clean JSON.
///
/// # Example
/// ```bash
/// RUST_LOG=sanitize=debug sanitize apply --record user users.json
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
