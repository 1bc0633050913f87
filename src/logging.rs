//! Structured logging setup for the binary.

use tracing_subscriber::EnvFilter;

/// Initialize tracing-subscriber on stderr.
///
/// Uses the `RUST_LOG` env var if set, otherwise falls back to the provided
/// directive. Logs go to stderr so translated text on stdout stays pipeable.
pub fn init(default_directive: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
