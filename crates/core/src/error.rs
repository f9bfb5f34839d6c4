//! Engine error model.

use thiserror::Error;

/// Result type for configuration parsing.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration-level error.
///
/// The reconciliation functions themselves never fail for well-typed input;
/// data-quality problems degrade (multiplier falls back to 1, availability to
/// unknown) instead of raising. The only fallible step is compiling merchant
/// settings into a [`crate::ResolutionConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The merchant-supplied SKU pattern is not a valid regular expression.
    #[error("invalid sku pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
