//! Oversell decision engine.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::demand::CartDemand;
use crate::variant::BaseKey;

/// Stable pointer to the cart scope; errors collapse per base key, not per
/// line, so they target the whole cart.
pub const CART_TARGET: &str = "$.cart";

/// Stock availability for one base key.
///
/// Known-zero and unknown are distinct states: the decision engine blocks on
/// known overselling only and is fail-open on `Unknown` (a false block halts
/// checkout outright; a false allow is merchant-recoverable).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Known(i64),
    Unknown,
}

impl Availability {
    /// Numeric reading for advisory clamping: unknown reads as 0 so UI
    /// controls stay conservative even when the decision engine stays open.
    pub fn units(&self) -> i64 {
        match self {
            Availability::Known(n) => *n,
            Availability::Unknown => 0,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Availability::Known(_))
    }
}

/// Point-in-time stock reading per base key, summed across locations.
///
/// Request-scoped and never persisted; inventory may change between snapshot
/// and order commit (accepted race, mitigated by re-validating at the
/// checkout boundary).
#[derive(Debug, Clone)]
pub struct InventorySnapshot {
    availability: HashMap<BaseKey, Availability>,
    taken_at: DateTime<Utc>,
}

impl InventorySnapshot {
    pub fn new() -> Self {
        Self {
            availability: HashMap::new(),
            taken_at: Utc::now(),
        }
    }

    pub fn insert(&mut self, base_key: BaseKey, availability: Availability) {
        self.availability.insert(base_key, availability);
    }

    /// Availability for a key; keys never looked up read as `Unknown`.
    pub fn availability_for(&self, base_key: &BaseKey) -> Availability {
        self.availability
            .get(base_key)
            .copied()
            .unwrap_or(Availability::Unknown)
    }

    pub fn known_entries(&self) -> impl Iterator<Item = (&BaseKey, i64)> {
        self.availability.iter().filter_map(|(k, a)| match a {
            Availability::Known(n) => Some((k, *n)),
            Availability::Unknown => None,
        })
    }

    pub fn taken_at(&self) -> DateTime<Utc> {
        self.taken_at
    }
}

impl Default for InventorySnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<(BaseKey, Availability)> for InventorySnapshot {
    fn from_iter<I: IntoIterator<Item = (BaseKey, Availability)>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for (key, availability) in iter {
            snapshot.insert(key, availability);
        }
        snapshot
    }
}

/// One checkout-blocking validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub message: String,
    pub target: String,
}

/// Compare demand against the snapshot and emit one error per oversold base
/// key, in first-seen aggregation order.
///
/// Only a known, non-negative availability smaller than the required units
/// blocks. Unknown availability never does.
pub fn decide(demand: &CartDemand, snapshot: &InventorySnapshot) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for entry in demand.entries() {
        let Availability::Known(available) = snapshot.availability_for(&entry.base_key) else {
            continue;
        };
        if available >= 0 && entry.required_units > available {
            errors.push(ValidationError {
                message: format!(
                    "You're trying to buy {} bottles (including cases) for '{}', \
                     but only {} are in stock. Reduce singles or cases to proceed.",
                    entry.required_units, entry.product_title, available
                ),
                target: CART_TARGET.to_string(),
            });
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolutionConfig;
    use crate::demand::{aggregate_demand, CartLine};

    fn widget_key() -> BaseKey {
        BaseKey::DerivedSku("WIDGET-1X".to_string())
    }

    fn widget_demand(singles: i64, cases: i64) -> CartDemand {
        let lines = [
            CartLine {
                variant_id: None,
                sku: Some("WIDGET-1X".to_string()),
                quantity: singles,
                product_title: "Widget".to_string(),
            },
            CartLine {
                variant_id: None,
                sku: Some("WIDGET-12X".to_string()),
                quantity: cases,
                product_title: "Widget".to_string(),
            },
        ];
        aggregate_demand(&lines, &ResolutionConfig::default())
    }

    fn snapshot(available: i64) -> InventorySnapshot {
        InventorySnapshot::from_iter([(widget_key(), Availability::Known(available))])
    }

    #[test]
    fn exact_fit_passes() {
        let errors = decide(&widget_demand(12, 0), &snapshot(12));
        assert!(errors.is_empty());
    }

    #[test]
    fn one_over_blocks_with_both_numbers() {
        let errors = decide(&widget_demand(13, 0), &snapshot(12));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("13"));
        assert!(errors[0].message.contains("12"));
        assert_eq!(errors[0].target, CART_TARGET);
    }

    #[test]
    fn cases_count_as_bottle_equivalents() {
        // 5 singles + 1 case of 12 = 17 required against 12 available.
        let errors = decide(&widget_demand(5, 1), &snapshot(12));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("17"));
        assert!(errors[0].message.contains("12"));
        assert!(errors[0].message.contains("Widget"));
    }

    #[test]
    fn many_lines_collapse_to_one_error_per_key() {
        let errors = decide(&widget_demand(10, 2), &snapshot(0));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn unknown_availability_is_fail_open() {
        let errors = decide(&widget_demand(100, 100), &InventorySnapshot::new());
        assert!(errors.is_empty());

        let explicit_unknown =
            InventorySnapshot::from_iter([(widget_key(), Availability::Unknown)]);
        assert!(decide(&widget_demand(100, 100), &explicit_unknown).is_empty());
    }

    #[test]
    fn known_zero_blocks() {
        let errors = decide(&widget_demand(1, 0), &snapshot(0));
        assert_eq!(errors.len(), 1);
    }
}
