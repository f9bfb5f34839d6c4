//! Advisory stock endpoints: single product-page reads and bulk cart reads.
//!
//! Both fail soft by design: missing shop context or broken upstream access
//! answers HTTP 200 with zero/empty availability so storefront scripts keep
//! working and checkout is never hard-blocked from the advisory path.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use caseguard_core::{line_ceilings, resolve, BaseKey, VariantId};

use crate::app::routes::common::shop_context;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn base_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::BaseStockQuery>,
    headers: HeaderMap,
) -> axum::response::Response {
    let key = match (&query.base_variant_id, &query.sku) {
        (Some(id), _) => BaseKey::Variant(VariantId::from(id.as_str())),
        (None, Some(sku)) => BaseKey::DerivedSku(sku.clone()),
        (None, None) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "missing_identifier",
                "Missing baseVariantId or sku",
            );
        }
    };

    let Some(shop) = shop_context(query.shop.as_deref(), &headers) else {
        return (
            StatusCode::OK,
            Json(json!({ "available": 0, "error": "Missing shop context" })),
        )
            .into_response();
    };

    let Some(lookup) = services.lookup_for(&shop) else {
        return (
            StatusCode::OK,
            Json(json!({ "available": 0, "shop": shop, "resolvedVariantId": null })),
        )
            .into_response();
    };

    let availability = lookup.available_for(&key).await;
    let resolved_variant_id = match &key {
        BaseKey::Variant(id) => Some(id.to_string()),
        BaseKey::DerivedSku(sku) => lookup
            .resolved_mapping()
            .get(sku)
            .map(|id| id.to_string()),
    };

    (
        StatusCode::OK,
        Json(json!({
            "available": availability.units(),
            "resolvedVariantId": resolved_variant_id,
            "shop": shop,
        })),
    )
        .into_response()
}

pub async fn base_stock_bulk(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Json(body): Json<dto::BulkStockRequest>,
) -> axum::response::Response {
    let Some(shop) = shop_context(None, &headers) else {
        return (
            StatusCode::OK,
            Json(json!({ "availabilityByBaseKey": {}, "error": "No shop domain" })),
        )
            .into_response();
    };

    let config = services.settings_for(&shop);
    let lines: Vec<_> = body.lines.iter().map(dto::cart_line_from_bulk).collect();

    // One base key per classifiable line; the lookup dedups from here.
    let keys = lines
        .iter()
        .filter_map(|line| resolve(&line.variant_ref(), &config))
        .map(|r| r.base_key);

    let Some(lookup) = services.lookup_for(&shop) else {
        return (
            StatusCode::OK,
            Json(json!({ "availabilityByBaseKey": {}, "error": "No catalog credentials" })),
        )
            .into_response();
    };

    let snapshot = lookup.snapshot_for(keys).await;
    let ceilings = line_ceilings(&lines, &config, &snapshot);

    let availability_by_base_key: serde_json::Map<String, serde_json::Value> = snapshot
        .known_entries()
        .map(|(key, available)| (key.to_string(), json!(available)))
        .collect();
    let resolved_mapping: serde_json::Map<String, serde_json::Value> = lookup
        .resolved_mapping()
        .into_iter()
        .map(|(sku, id)| (sku, json!(id.as_str())))
        .collect();
    let line_ceilings: Vec<_> = ceilings
        .iter()
        .map(|c| {
            json!({
                "baseKey": c.base_key.as_ref().map(|k| k.to_string()),
                "multiplier": c.multiplier,
                "maxQuantity": c.max_quantity,
            })
        })
        .collect();

    (
        StatusCode::OK,
        Json(json!({
            "availabilityByBaseKey": availability_by_base_key,
            "resolvedMapping": resolved_mapping,
            "lineCeilings": line_ceilings,
        })),
    )
        .into_response()
}
