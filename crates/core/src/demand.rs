//! Demand aggregation: cart lines → bottle-equivalents per base key.

use serde::{Deserialize, Serialize};

use crate::config::ResolutionConfig;
use crate::resolve::resolve;
use crate::variant::{BaseKey, VariantId, VariantRef};

/// One line of a cart snapshot. Immutable input; never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub variant_id: Option<VariantId>,
    pub sku: Option<String>,
    pub quantity: i64,
    pub product_title: String,
}

impl CartLine {
    pub fn variant_ref(&self) -> VariantRef {
        VariantRef {
            id: self.variant_id.clone(),
            sku: self.sku.clone(),
        }
    }

    /// Negative quantities are defensive-coerced to 0; they should not occur
    /// upstream.
    pub fn effective_quantity(&self) -> i64 {
        self.quantity.max(0)
    }
}

/// Aggregated demand for one base key, in base units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemandEntry {
    pub base_key: BaseKey,
    pub product_title: String,
    pub required_units: i64,
}

/// Demand per base key, in first-seen order.
///
/// Totals are a fold over an unordered bag of lines (permutation- and
/// split-invariant); only the *order of entries* reflects first encounter,
/// which keeps decision output deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartDemand {
    entries: Vec<DemandEntry>,
}

impl CartDemand {
    pub fn entries(&self) -> &[DemandEntry] {
        &self.entries
    }

    pub fn get(&self, base_key: &BaseKey) -> Option<&DemandEntry> {
        self.entries.iter().find(|e| &e.base_key == base_key)
    }

    pub fn base_keys(&self) -> impl Iterator<Item = &BaseKey> {
        self.entries.iter().map(|e| &e.base_key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn add(&mut self, base_key: BaseKey, product_title: &str, required: i64) {
        // Carts are small; a linear scan beats carrying an index map.
        match self.entries.iter_mut().find(|e| e.base_key == base_key) {
            Some(entry) => {
                entry.required_units = entry.required_units.saturating_add(required);
                if entry.product_title.is_empty() {
                    entry.product_title = product_title.to_string();
                }
            }
            None => self.entries.push(DemandEntry {
                base_key,
                product_title: product_title.to_string(),
                required_units: required,
            }),
        }
    }
}

/// Sum bottle-equivalent demand per base key over a cart snapshot.
///
/// Lines with quantity ≤ 0 and unclassifiable lines (no id, no SKU)
/// contribute nothing. `product_title` is informational and comes from the
/// first line encountered for a key.
pub fn aggregate_demand(lines: &[CartLine], config: &ResolutionConfig) -> CartDemand {
    let mut demand = CartDemand::default();
    for line in lines {
        let quantity = line.effective_quantity();
        if quantity == 0 {
            continue;
        }
        let Some(resolution) = resolve(&line.variant_ref(), config) else {
            continue;
        };
        // Saturating: an absurd quantity must still read as huge demand and
        // block, never wrap negative and slip past the decision engine.
        demand.add(
            resolution.base_key,
            &line.product_title,
            quantity.saturating_mul(resolution.multiplier),
        );
    }
    demand
}
