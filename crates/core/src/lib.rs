//! `caseguard-core` — the bundle-aware inventory reconciliation engine.
//!
//! A product family is sold both as single units ("singles") and as
//! fixed-size multiples ("cases"), but stock is tracked only on the single
//! base variant. This crate holds the **pure decision logic**: resolving any
//! catalog variant to its base variant and unit multiplier, aggregating cart
//! demand into bottle-equivalents, comparing demand against a stock snapshot,
//! and computing advisory per-line quantity ceilings for UI clamping.
//!
//! Everything here is deterministic, side-effect-free, and I/O-free, so the
//! authoritative checkout validation and the advisory UI path can both call
//! it without ever disagreeing.

pub mod ceiling;
pub mod config;
pub mod decision;
pub mod demand;
pub mod error;
pub mod resolve;
pub mod variant;

pub use ceiling::{line_ceilings, purchase_affordance, LineCeiling, PurchaseAffordance};
pub use config::{ExplicitMapping, ResolutionConfig, SettingsDoc, DEFAULT_SKU_PATTERN};
pub use decision::{decide, Availability, InventorySnapshot, ValidationError, CART_TARGET};
pub use demand::{aggregate_demand, CartDemand, CartLine, DemandEntry};
pub use error::{ConfigError, ConfigResult};
pub use resolve::{resolve, Resolution};
pub use variant::{BaseKey, VariantId, VariantRef};
