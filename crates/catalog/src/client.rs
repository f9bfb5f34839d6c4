//! Catalog read-query contract.

use caseguard_core::VariantId;

use crate::error::CatalogResult;

/// Stock for one storage location. A missing quantity contributes 0 to the
/// aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockLevel {
    pub available: Option<i64>,
    pub location: Option<String>,
}

/// Read-only catalog collaborator.
///
/// Both operations are latency-bearing and fallible; "not found" is an
/// explicit `None`, never an error, so callers can tell an absent variant
/// from a broken upstream.
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    /// Find the variant id matching a SKU. At most one match is returned.
    async fn variant_id_by_sku(&self, sku: &str) -> CatalogResult<Option<VariantId>>;

    /// Stock broken down by location for a variant's inventory item.
    async fn stock_levels(&self, variant_id: &VariantId) -> CatalogResult<Vec<StockLevel>>;
}
