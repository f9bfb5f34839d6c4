//! `caseguard-catalog` — the catalog-client boundary.
//!
//! Everything latency-bearing and fallible lives here: the [`CatalogClient`]
//! trait over the commerce platform's admin API, the GraphQL implementation,
//! and the per-invocation [`InventoryLookup`] cache that turns base keys
//! into an [`caseguard_core::InventorySnapshot`]. Upstream failures are
//! downgraded at this boundary — a broken lookup never aborts validation for
//! unrelated cart lines.

pub mod cache;
pub mod client;
pub mod error;
pub mod shopify;

pub use cache::InventoryLookup;
pub use client::{CatalogClient, StockLevel};
pub use error::{CatalogError, CatalogResult};
pub use shopify::AdminGraphqlClient;

use std::time::Duration;

/// Default bound on each upstream query; this sits in a checkout-blocking
/// path, matching the platform's 2s fetch policy for validation functions.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_millis(2000);
