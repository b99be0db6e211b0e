//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,rxcart=debug";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=rxcart_store=trace` - Show trace for the store only
/// - Default: INFO, DEBUG for the rxcart crates
///
/// Calling it twice is harmless; the second call does nothing.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // Fails only when a global subscriber is already installed.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
