//! Variant identity types.

use serde::{Deserialize, Serialize};

/// Opaque catalog variant identifier (e.g. `gid://shopify/ProductVariant/42`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(pub String);

impl VariantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for VariantId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<&str> for VariantId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Reference to a catalog variant as it appears on a cart line.
///
/// At least one of `id`/`sku` must be present for the line to be
/// classifiable; a reference with neither is ignored by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRef {
    pub id: Option<VariantId>,
    pub sku: Option<String>,
}

impl VariantRef {
    pub fn is_classifiable(&self) -> bool {
        self.id.is_some() || self.sku.is_some()
    }
}

/// Canonical grouping identity for a product family.
///
/// Demand is summed and stock is looked up per base key. A key is either a
/// direct variant identifier (explicit mapping base, or a line that already
/// is the base) or a SKU derived from the pattern rule (`<prefix>-1X`), which
/// the inventory boundary resolves to a variant id on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BaseKey {
    Variant(VariantId),
    DerivedSku(String),
}

impl BaseKey {
    pub fn as_str(&self) -> &str {
        match self {
            BaseKey::Variant(id) => id.as_str(),
            BaseKey::DerivedSku(sku) => sku.as_str(),
        }
    }
}

impl core::fmt::Display for BaseKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BaseKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
