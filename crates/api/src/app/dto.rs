//! Request DTOs and JSON mapping helpers.

use std::collections::HashMap;

use caseguard_core::{CartLine, SettingsDoc, VariantId};
use serde::Deserialize;

// -------------------------
// Request DTOs
// -------------------------

/// Query parameters of the single base-stock endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseStockQuery {
    pub base_variant_id: Option<String>,
    pub sku: Option<String>,
    pub shop: Option<String>,
}

/// One line descriptor of the bulk base-stock endpoint.
#[derive(Debug, Deserialize)]
pub struct BulkLine {
    pub id: Option<String>,
    pub sku: Option<String>,
    #[serde(default)]
    pub qty: i64,
}

#[derive(Debug, Deserialize)]
pub struct BulkStockRequest {
    #[serde(default)]
    pub lines: Vec<BulkLine>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineDto {
    pub variant_id: Option<String>,
    pub sku: Option<String>,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub product_title: String,
}

#[derive(Debug, Deserialize)]
pub struct CartDto {
    #[serde(default)]
    pub lines: Vec<CartLineDto>,
}

/// Body of the authoritative validation entry point.
#[derive(Debug, Deserialize)]
pub struct ValidationRequest {
    pub cart: CartDto,
    /// Merchant settings document; defaults apply when omitted.
    pub settings: Option<SettingsDoc>,
    /// Optional pre-fetched availability keyed by base key string; when
    /// present the catalog is not queried.
    pub inventories: Option<HashMap<String, i64>>,
}

// -------------------------
// Mapping helpers
// -------------------------

pub fn cart_line_from_dto(dto: &CartLineDto) -> CartLine {
    CartLine {
        variant_id: dto.variant_id.as_deref().map(VariantId::from),
        sku: dto.sku.clone(),
        quantity: dto.quantity,
        product_title: dto.product_title.clone(),
    }
}

pub fn cart_line_from_bulk(line: &BulkLine) -> CartLine {
    CartLine {
        variant_id: line.id.as_deref().map(VariantId::from),
        sku: line.sku.clone(),
        quantity: line.qty,
        product_title: String::new(),
    }
}
