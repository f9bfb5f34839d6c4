//! Per-invocation inventory lookup cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use caseguard_core::{Availability, BaseKey, InventorySnapshot, VariantId};
use futures::future::join_all;
use tokio::sync::OnceCell;

use crate::client::CatalogClient;
use crate::error::{CatalogError, CatalogResult};
use crate::DEFAULT_QUERY_TIMEOUT;

/// Memoized base-key → availability accessor, scoped to one validation or
/// rendering invocation.
///
/// Never cached across invocations — stock changes continuously. Within an
/// invocation, each distinct base key issues at most one upstream fetch:
/// repeat requests short-circuit to the cached result and concurrent
/// requests for the same key coalesce onto the in-flight one. Distinct keys
/// fetch concurrently via [`InventoryLookup::snapshot_for`].
pub struct InventoryLookup {
    client: Arc<dyn CatalogClient>,
    query_timeout: Duration,
    cells: Mutex<HashMap<BaseKey, Arc<OnceCell<Availability>>>>,
    resolved: Mutex<HashMap<String, VariantId>>,
}

impl InventoryLookup {
    pub fn new(client: Arc<dyn CatalogClient>) -> Self {
        Self::with_timeout(client, DEFAULT_QUERY_TIMEOUT)
    }

    pub fn with_timeout(client: Arc<dyn CatalogClient>, query_timeout: Duration) -> Self {
        Self {
            client,
            query_timeout,
            cells: Mutex::new(HashMap::new()),
            resolved: Mutex::new(HashMap::new()),
        }
    }

    /// Availability for one base key, fetching on first use.
    ///
    /// Fails soft: any upstream failure (network, malformed payload,
    /// timeout, unresolvable SKU) is logged and downgraded to
    /// [`Availability::Unknown`] for this key, never a hard error that would
    /// abort validation of unrelated lines.
    pub async fn available_for(&self, base_key: &BaseKey) -> Availability {
        let cell = {
            let mut cells = self.cells.lock().unwrap_or_else(|e| e.into_inner());
            Arc::clone(cells.entry(base_key.clone()).or_default())
        };

        *cell
            .get_or_init(|| async {
                match self.fetch(base_key).await {
                    Ok(availability) => availability,
                    Err(err) => {
                        tracing::warn!(base_key = %base_key, error = %err, "inventory lookup failed; treating availability as unknown");
                        Availability::Unknown
                    }
                }
            })
            .await
    }

    /// Build a snapshot for a set of base keys, fetching distinct uncached
    /// keys concurrently. Duplicate keys in the input are deduplicated.
    pub async fn snapshot_for<I>(&self, keys: I) -> InventorySnapshot
    where
        I: IntoIterator<Item = BaseKey>,
    {
        let mut distinct: Vec<BaseKey> = Vec::new();
        for key in keys {
            if !distinct.contains(&key) {
                distinct.push(key);
            }
        }

        let lookups = distinct.iter().map(|key| self.available_for(key));
        let availabilities = join_all(lookups).await;

        distinct.into_iter().zip(availabilities).collect()
    }

    /// SKU → variant-id resolutions discovered during this invocation
    /// (reported back to advisory callers so they can key by variant id).
    pub fn resolved_mapping(&self) -> HashMap<String, VariantId> {
        self.resolved
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    async fn fetch(&self, base_key: &BaseKey) -> CatalogResult<Availability> {
        let variant_id = match base_key {
            BaseKey::Variant(id) => id.clone(),
            BaseKey::DerivedSku(sku) => {
                match self.bounded(self.client.variant_id_by_sku(sku)).await? {
                    Some(id) => {
                        self.resolved
                            .lock()
                            .unwrap_or_else(|e| e.into_inner())
                            .insert(sku.clone(), id.clone());
                        id
                    }
                    // Unresolvable SKU: recorded as unknown so the decision
                    // engine stays open, while the numeric advisory reading
                    // is 0.
                    None => return Ok(Availability::Unknown),
                }
            }
        };

        let levels = self.bounded(self.client.stock_levels(&variant_id)).await?;
        let total: i64 = levels.iter().map(|l| l.available.unwrap_or(0)).sum();
        Ok(Availability::Known(total.max(0)))
    }

    async fn bounded<T>(
        &self,
        fut: impl Future<Output = CatalogResult<T>>,
    ) -> CatalogResult<T> {
        tokio::time::timeout(self.query_timeout, fut)
            .await
            .map_err(|_| CatalogError::Timeout(self.query_timeout))?
    }
}
