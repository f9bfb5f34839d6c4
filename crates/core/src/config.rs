//! Merchant resolution configuration.
//!
//! Configuration is owned by merchant-facing tooling and arrives here as a
//! JSON settings document. It is always threaded through the engine as an
//! explicit parameter; there is no ambient process-wide state.

use std::collections::HashMap;

use regex::Regex;
use serde::Deserialize;

use crate::error::ConfigResult;
use crate::variant::VariantId;

/// Default suffix convention: `<prefix>-<N>X`, e.g. `WIDGET-12X`.
pub const DEFAULT_SKU_PATTERN: &str = r"^(.+?)-(\d{1,3})X$";

/// Explicit case → base mapping declared by the merchant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExplicitMapping {
    pub base: VariantId,
    #[serde(default = "default_multiplier")]
    pub multiplier: i64,
}

fn default_multiplier() -> i64 {
    1
}

/// Raw merchant settings document as stored by configuration tooling.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDoc {
    pub sku_pattern: Option<String>,
    pub enable_sku_fallback: Option<bool>,
    pub mappings: Option<HashMap<String, ExplicitMapping>>,
}

/// Compiled resolution configuration.
///
/// Explicit mappings take precedence over the pattern rule; the pattern rule
/// only applies when `enable_sku_fallback` is set (default true).
#[derive(Debug, Clone)]
pub struct ResolutionConfig {
    sku_pattern: Regex,
    pub enable_sku_fallback: bool,
    pub mappings: HashMap<VariantId, ExplicitMapping>,
}

impl ResolutionConfig {
    /// Compile a settings document, applying defaults for absent fields.
    ///
    /// Non-positive multipliers in explicit mappings are coerced to 1 rather
    /// than rejected: a bad mapping must never break resolution for the rest
    /// of the catalog.
    pub fn from_settings(doc: SettingsDoc) -> ConfigResult<Self> {
        let pattern = doc.sku_pattern.as_deref().unwrap_or(DEFAULT_SKU_PATTERN);
        let sku_pattern = Regex::new(pattern)?;

        let mappings = doc
            .mappings
            .unwrap_or_default()
            .into_iter()
            .map(|(variant_id, mut mapping)| {
                if mapping.multiplier <= 0 {
                    mapping.multiplier = 1;
                }
                (VariantId::new(variant_id), mapping)
            })
            .collect();

        Ok(Self {
            sku_pattern,
            enable_sku_fallback: doc.enable_sku_fallback.unwrap_or(true),
            mappings,
        })
    }

    pub fn sku_pattern(&self) -> &Regex {
        &self.sku_pattern
    }
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            sku_pattern: Regex::new(DEFAULT_SKU_PATTERN)
                .expect("default sku pattern is a valid regex"),
            enable_sku_fallback: true,
            mappings: HashMap::new(),
        }
    }
}
