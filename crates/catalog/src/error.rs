//! Upstream error taxonomy.

use std::time::Duration;

use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Failure modes of the catalog boundary.
///
/// None of these propagate past the inventory lookup: each downgrades the
/// affected base key to unknown availability (fail-open at the decision
/// engine) and is logged. They exist as a typed enum so the boundary can log
/// precisely and tests can assert on the mode.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No credentials/shop context resolvable for this request.
    #[error("missing catalog credentials")]
    MissingCredentials,

    /// Network-level failure talking to the platform.
    #[error("catalog transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The platform answered with a non-success status.
    #[error("catalog query rejected: http {status}")]
    Upstream { status: u16 },

    /// The response arrived but did not have the expected shape.
    #[error("malformed catalog response: {0}")]
    Malformed(String),

    /// The bounded per-query timeout elapsed.
    #[error("catalog query timed out after {0:?}")]
    Timeout(Duration),
}
