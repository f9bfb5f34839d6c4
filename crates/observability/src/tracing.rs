//! Tracing/logging initialization.
//!
//! The signal that matters operationally is the catalog boundary: every
//! downgraded lookup (timeout, upstream rejection, unresolvable SKU) is a
//! warn there, so the default filter keeps the caseguard crates at debug
//! while third-party noise stays at info.

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &str = "info,caseguard_api=debug,caseguard_catalog=debug";

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    // JSON logs with targets, so per-crate filtering via RUST_LOG lines up
    // with what operators see in the log stream.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .try_init();
}
