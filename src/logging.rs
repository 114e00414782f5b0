//! Tracing subscriber setup for the binary.

use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global subscriber. Call once, before anything logs.
///
/// `RUST_LOG` overrides the default `info` level. Log lines go to stderr so
/// they never interleave with the summary printed on stdout.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,chatpurge=info"));

    // A second init (e.g. from tests) is not an error worth reporting.
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
