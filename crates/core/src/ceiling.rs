//! Advisory quantity ceilings for UI clamping.
//!
//! Advisory only: the authoritative decision always comes from
//! [`crate::decision::decide`] at the validation boundary. Clamping inputs
//! up front reduces, but does not eliminate, server-side rejections. Both
//! paths share the resolver and the arithmetic below, so they cannot drift.

use crate::config::ResolutionConfig;
use crate::decision::{Availability, InventorySnapshot};
use crate::demand::{aggregate_demand, CartLine};
use crate::resolve::resolve;
use crate::variant::BaseKey;

/// Advisory ceiling for one cart line, in the input line order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineCeiling {
    pub base_key: Option<BaseKey>,
    pub multiplier: i64,
    /// `None` when the line is unclassifiable or its availability is
    /// unknown; the UI leaves such lines unclamped.
    pub max_quantity: Option<i64>,
}

/// Per-line maximum quantities such that clamping every line to its ceiling
/// simultaneously keeps total demand within the available stock.
///
/// For a line with multiplier `m`, quantity `q`, family demand `D` and
/// availability `a`: `others = D − q×m`, `remaining = max(0, a − others)`,
/// ceiling `remaining` for singles and `⌊remaining / m⌋` for cases.
pub fn line_ceilings(
    lines: &[CartLine],
    config: &ResolutionConfig,
    snapshot: &InventorySnapshot,
) -> Vec<LineCeiling> {
    let demand = aggregate_demand(lines, config);

    lines
        .iter()
        .map(|line| {
            let Some(resolution) = resolve(&line.variant_ref(), config) else {
                return LineCeiling {
                    base_key: None,
                    multiplier: 1,
                    max_quantity: None,
                };
            };

            let max_quantity = match snapshot.availability_for(&resolution.base_key) {
                Availability::Known(available) => {
                    let family_demand = demand
                        .get(&resolution.base_key)
                        .map(|e| e.required_units)
                        .unwrap_or(0);
                    let others = family_demand
                        .saturating_sub(line.effective_quantity().saturating_mul(resolution.multiplier));
                    let remaining = available.saturating_sub(others).max(0);
                    Some(if resolution.multiplier == 1 {
                        remaining
                    } else {
                        remaining / resolution.multiplier
                    })
                }
                Availability::Unknown => None,
            };

            LineCeiling {
                base_key: Some(resolution.base_key),
                multiplier: resolution.multiplier,
                max_quantity,
            }
        })
        .collect()
}

/// Product-page purchase affordances for one base product sold as singles
/// plus one case size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseAffordance {
    /// No stock data; the advisory layer cannot clamp and leaves controls
    /// alone.
    Unrestricted,
    /// Nothing left: every add-to-cart control is disabled outright.
    OutOfStock,
    /// Some stock, but less than one full case: the case control is disabled
    /// and the message reports the exact remaining single count.
    SinglesOnly { available: i64 },
    /// Both controls active, with their respective ceilings.
    InStock { single_max: i64, case_max: i64 },
}

impl PurchaseAffordance {
    pub fn single_enabled(&self) -> bool {
        matches!(
            self,
            PurchaseAffordance::Unrestricted
                | PurchaseAffordance::SinglesOnly { .. }
                | PurchaseAffordance::InStock { .. }
        )
    }

    pub fn case_enabled(&self) -> bool {
        matches!(
            self,
            PurchaseAffordance::Unrestricted | PurchaseAffordance::InStock { .. }
        )
    }

    pub fn message(&self) -> Option<String> {
        match self {
            PurchaseAffordance::Unrestricted | PurchaseAffordance::InStock { .. } => None,
            PurchaseAffordance::OutOfStock => Some("Out of stock".to_string()),
            PurchaseAffordance::SinglesOnly { available } => Some(format!(
                "Only {available} singles available – not enough for a full case."
            )),
        }
    }
}

/// Classify availability against a case size for product-page controls.
pub fn purchase_affordance(available: Availability, case_size: i64) -> PurchaseAffordance {
    let case_size = case_size.max(1);
    match available {
        Availability::Unknown => PurchaseAffordance::Unrestricted,
        Availability::Known(n) if n <= 0 => PurchaseAffordance::OutOfStock,
        Availability::Known(n) if n < case_size => PurchaseAffordance::SinglesOnly { available: n },
        Availability::Known(n) => PurchaseAffordance::InStock {
            single_max: n,
            case_max: n / case_size,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(sku: &str, quantity: i64) -> CartLine {
        CartLine {
            variant_id: None,
            sku: Some(sku.to_string()),
            quantity,
            product_title: "Widget".to_string(),
        }
    }

    fn widget_snapshot(available: i64) -> InventorySnapshot {
        InventorySnapshot::from_iter([(
            BaseKey::DerivedSku("WIDGET-1X".to_string()),
            Availability::Known(available),
        )])
    }

    #[test]
    fn single_line_ceiling_is_remaining_stock() {
        let lines = [line("WIDGET-1X", 3), line("WIDGET-12X", 1)];
        let ceilings = line_ceilings(&lines, &ResolutionConfig::default(), &widget_snapshot(20));
        // Demand is 15. Singles: others = 12, remaining 8. Case: others = 3,
        // remaining 17, floor(17/12) = 1.
        assert_eq!(ceilings[0].max_quantity, Some(8));
        assert_eq!(ceilings[1].max_quantity, Some(1));
    }

    #[test]
    fn huge_quantities_stay_jointly_consistent_without_overflow() {
        let lines = [line("WIDGET-1X", i64::MAX), line("WIDGET-12X", 2)];
        let config = ResolutionConfig::default();
        let snapshot = widget_snapshot(12);
        let ceilings = line_ceilings(&lines, &config, &snapshot);
        assert_eq!(ceilings[0].max_quantity, Some(12));
        assert_eq!(ceilings[1].max_quantity, Some(0));

        // Clamping both lines simultaneously keeps demand within stock even
        // when the raw quantities saturate the demand sum.
        let clamped = [line("WIDGET-1X", 12), line("WIDGET-12X", 0)];
        let total = aggregate_demand(&clamped, &config)
            .get(&BaseKey::DerivedSku("WIDGET-1X".to_string()))
            .map(|e| e.required_units)
            .unwrap_or(0);
        assert!(total <= 12);
    }

    #[test]
    fn unknown_availability_leaves_lines_unclamped() {
        let lines = [line("WIDGET-1X", 3)];
        let ceilings = line_ceilings(&lines, &ResolutionConfig::default(), &InventorySnapshot::new());
        assert_eq!(ceilings[0].max_quantity, None);
    }

    #[test]
    fn unclassifiable_line_has_no_ceiling() {
        let lines = [CartLine {
            variant_id: None,
            sku: None,
            quantity: 3,
            product_title: String::new(),
        }];
        let ceilings = line_ceilings(&lines, &ResolutionConfig::default(), &widget_snapshot(5));
        assert_eq!(ceilings[0].base_key, None);
        assert_eq!(ceilings[0].max_quantity, None);
    }

    #[test]
    fn affordance_out_of_stock_disables_everything() {
        let a = purchase_affordance(Availability::Known(0), 12);
        assert_eq!(a, PurchaseAffordance::OutOfStock);
        assert!(!a.single_enabled());
        assert!(!a.case_enabled());
        assert_eq!(a.message().as_deref(), Some("Out of stock"));
    }

    #[test]
    fn affordance_below_case_size_disables_case_and_reports_count() {
        let a = purchase_affordance(Availability::Known(5), 12);
        assert!(a.single_enabled());
        assert!(!a.case_enabled());
        assert!(a.message().unwrap().contains('5'));
    }

    #[test]
    fn affordance_case_ceiling_is_floor_division() {
        let a = purchase_affordance(Availability::Known(24), 12);
        assert_eq!(
            a,
            PurchaseAffordance::InStock {
                single_max: 24,
                case_max: 2
            }
        );
        assert_eq!(a.message(), None);
    }

    #[test]
    fn affordance_unknown_is_unrestricted() {
        let a = purchase_affordance(Availability::Unknown, 12);
        assert_eq!(a, PurchaseAffordance::Unrestricted);
        assert!(a.single_enabled());
        assert!(a.case_enabled());
    }

    mod property_tests {
        use proptest::prelude::*;

        use super::*;
        use crate::demand::aggregate_demand;

        fn arb_widget_lines() -> impl Strategy<Value = Vec<CartLine>> {
            prop::collection::vec(
                (prop::sample::select(vec![1i64, 6, 12]), 0i64..30)
                    .prop_map(|(mult, qty)| line(&format!("WIDGET-{mult}X"), qty)),
                1..6,
            )
        }

        proptest! {
            /// Property: ceilings are jointly consistent. Clamping every
            /// line's quantity to min(q, ceiling) simultaneously keeps the
            /// recomputed total demand within the available stock.
            #[test]
            fn ceilings_are_jointly_consistent(lines in arb_widget_lines(), available in 0i64..100) {
                let config = ResolutionConfig::default();
                let snapshot = widget_snapshot(available);
                let ceilings = line_ceilings(&lines, &config, &snapshot);

                let clamped: Vec<CartLine> = lines
                    .iter()
                    .zip(&ceilings)
                    .map(|(l, c)| {
                        let mut l = l.clone();
                        if let Some(max) = c.max_quantity {
                            l.quantity = l.quantity.min(max);
                        }
                        l
                    })
                    .collect();

                let recomputed = aggregate_demand(&clamped, &config);
                let total = recomputed
                    .get(&BaseKey::DerivedSku("WIDGET-1X".to_string()))
                    .map(|e| e.required_units)
                    .unwrap_or(0);
                prop_assert!(total <= available, "clamped demand {} > available {}", total, available);
            }
        }
    }
}
