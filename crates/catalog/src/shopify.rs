//! Admin GraphQL implementation of [`CatalogClient`].

use caseguard_core::VariantId;
use serde_json::{json, Value};

use crate::client::{CatalogClient, StockLevel};
use crate::error::{CatalogError, CatalogResult};

const VARIANT_BY_SKU_QUERY: &str = r#"
query VariantBySku($sku: String!) {
  productVariants(first: 1, query: $sku) { edges { node { id sku } } }
}"#;

const VARIANT_INVENTORY_QUERY: &str = r#"
query VariantInventory($id: ID!) {
  productVariant(id: $id) {
    id
    inventoryItem {
      inventoryLevels(first: 100) {
        edges { node { available location { name } } }
      }
    }
  }
}"#;

/// Catalog client over the shop admin GraphQL API.
#[derive(Debug, Clone)]
pub struct AdminGraphqlClient {
    http: reqwest::Client,
    endpoint: String,
    access_token: String,
}

impl AdminGraphqlClient {
    const API_VERSION: &'static str = "2024-07";

    pub fn new(shop_domain: &str, access_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: format!(
                "https://{shop_domain}/admin/api/{}/graphql.json",
                Self::API_VERSION
            ),
            access_token: access_token.into(),
        }
    }

    async fn graphql(&self, query: &str, variables: Value) -> CatalogResult<Value> {
        let resp = self
            .http
            .post(&self.endpoint)
            .header("X-Shopify-Access-Token", &self.access_token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::Upstream {
                status: status.as_u16(),
            });
        }

        let body: Value = resp.json().await?;
        if let Some(errors) = body.get("errors").filter(|e| !e.is_null()) {
            return Err(CatalogError::Malformed(errors.to_string()));
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl CatalogClient for AdminGraphqlClient {
    async fn variant_id_by_sku(&self, sku: &str) -> CatalogResult<Option<VariantId>> {
        let body = self
            .graphql(VARIANT_BY_SKU_QUERY, json!({ "sku": sku }))
            .await?;

        let id = body
            .pointer("/data/productVariants/edges/0/node/id")
            .and_then(Value::as_str)
            .map(VariantId::from);
        Ok(id)
    }

    async fn stock_levels(&self, variant_id: &VariantId) -> CatalogResult<Vec<StockLevel>> {
        let body = self
            .graphql(VARIANT_INVENTORY_QUERY, json!({ "id": variant_id.as_str() }))
            .await?;

        let variant = body
            .pointer("/data/productVariant")
            .filter(|v| !v.is_null())
            .ok_or_else(|| CatalogError::Malformed("variant not found".to_string()))?;

        let edges = variant
            .pointer("/inventoryItem/inventoryLevels/edges")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let levels = edges
            .iter()
            .map(|edge| StockLevel {
                available: edge.pointer("/node/available").and_then(Value::as_i64),
                location: edge
                    .pointer("/node/location/name")
                    .and_then(Value::as_str)
                    .map(String::from),
            })
            .collect();
        Ok(levels)
    }
}
