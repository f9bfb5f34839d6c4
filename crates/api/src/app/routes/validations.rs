//! Authoritative checkout validation hook.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use caseguard_core::{
    aggregate_demand, decide, Availability, InventorySnapshot, ResolutionConfig,
};

use crate::app::routes::common::shop_context;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// Validate a cart snapshot against base-variant stock.
///
/// Empty `errors` means the order may proceed. An inventory map supplied by
/// the caller (the platform's fetch-target round trip) short-circuits the
/// catalog; otherwise a fresh snapshot is built here. Either way the same
/// core arithmetic renders the decision.
pub async fn validate(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Json(body): Json<dto::ValidationRequest>,
) -> axum::response::Response {
    let config = match body.settings {
        Some(doc) => match ResolutionConfig::from_settings(doc) {
            Ok(config) => config,
            Err(e) => {
                return errors::json_error(StatusCode::BAD_REQUEST, "invalid_settings", e.to_string());
            }
        },
        None => ResolutionConfig::default(),
    };

    let lines: Vec<_> = body.cart.lines.iter().map(dto::cart_line_from_dto).collect();
    let demand = aggregate_demand(&lines, &config);

    let snapshot = match &body.inventories {
        Some(inventories) => {
            let mut snapshot = InventorySnapshot::new();
            for key in demand.base_keys() {
                if let Some(available) = inventories.get(key.as_str()) {
                    snapshot.insert(key.clone(), Availability::Known((*available).max(0)));
                }
            }
            snapshot
        }
        None => {
            let lookup = shop_context(None, &headers).and_then(|shop| services.lookup_for(&shop));
            match lookup {
                Some(lookup) => lookup.snapshot_for(demand.base_keys().cloned()).await,
                // No shop context and no pre-fetched inventories: every key
                // is unknown, so validation stays open.
                None => InventorySnapshot::new(),
            }
        }
    };

    let validation_errors = decide(&demand, &snapshot);
    if !validation_errors.is_empty() {
        tracing::info!(
            errors = validation_errors.len(),
            "blocking checkout: demand exceeds base stock"
        );
    }

    (StatusCode::OK, Json(json!({ "errors": validation_errors }))).into_response()
}
