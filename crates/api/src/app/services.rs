//! Service wiring for the HTTP layer.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use caseguard_catalog::{AdminGraphqlClient, CatalogClient, InventoryLookup, DEFAULT_QUERY_TIMEOUT};
use caseguard_core::{ResolutionConfig, SettingsDoc};
use serde::Deserialize;

/// Per-shop catalog access. Implemented over real admin credentials in
/// production and over stubs in tests.
pub trait CatalogProvider: Send + Sync {
    /// A read-query client for the shop, or `None` when no credentials are
    /// configured (ConfigurationAbsent: callers respond with zero/unknown
    /// availability rather than failing).
    fn client_for(&self, shop: &str) -> Option<Arc<dyn CatalogClient>>;

    /// Merchant resolution settings for the shop.
    fn settings_for(&self, shop: &str) -> ResolutionConfig;
}

/// One shop's entry in the registry document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopEntryDoc {
    pub access_token: String,
    #[serde(default)]
    pub settings: SettingsDoc,
}

struct ShopEntry {
    access_token: String,
    settings: ResolutionConfig,
}

/// Production provider: shop domain → admin access token + merchant
/// resolution settings, loaded once at startup. A default token covers
/// shops not listed explicitly (the single-tenant app-proxy trust model;
/// session management is an external concern).
pub struct ShopRegistry {
    shops: HashMap<String, ShopEntry>,
    default_token: Option<String>,
}

impl ShopRegistry {
    /// Registry with no per-shop entries; every shop uses the default token
    /// and default resolution settings.
    pub fn new(default_token: Option<String>) -> Self {
        Self {
            shops: HashMap::new(),
            default_token,
        }
    }

    /// Parse a registry document of the shape
    /// `{ "<shop-domain>": { "accessToken": "…", "settings": {…} } }`.
    ///
    /// Settings are compiled eagerly so a bad merchant pattern surfaces at
    /// startup rather than on the first checkout.
    pub fn from_json(doc: &str, default_token: Option<String>) -> anyhow::Result<Self> {
        let entries: HashMap<String, ShopEntryDoc> =
            serde_json::from_str(doc).context("shop registry is not valid JSON")?;

        let mut shops = HashMap::new();
        for (domain, entry) in entries {
            let settings = ResolutionConfig::from_settings(entry.settings)
                .with_context(|| format!("invalid settings for shop {domain}"))?;
            shops.insert(
                domain,
                ShopEntry {
                    access_token: entry.access_token,
                    settings,
                },
            );
        }

        Ok(Self {
            shops,
            default_token,
        })
    }
}

impl CatalogProvider for ShopRegistry {
    fn client_for(&self, shop: &str) -> Option<Arc<dyn CatalogClient>> {
        let token = self
            .shops
            .get(shop)
            .map(|entry| entry.access_token.as_str())
            .or(self.default_token.as_deref())?;
        Some(Arc::new(AdminGraphqlClient::new(shop, token)))
    }

    fn settings_for(&self, shop: &str) -> ResolutionConfig {
        self.shops
            .get(shop)
            .map(|entry| entry.settings.clone())
            .unwrap_or_default()
    }
}

/// Shared application services handed to every handler.
pub struct AppServices {
    provider: Arc<dyn CatalogProvider>,
    query_timeout: Duration,
}

impl AppServices {
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self {
            provider,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    pub fn settings_for(&self, shop: &str) -> ResolutionConfig {
        self.provider.settings_for(shop)
    }

    /// A fresh, invocation-scoped inventory lookup for the shop. `None`
    /// means no catalog credentials are configured.
    pub fn lookup_for(&self, shop: &str) -> Option<InventoryLookup> {
        self.provider
            .client_for(shop)
            .map(|client| InventoryLookup::with_timeout(client, self.query_timeout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_entry_overrides_settings_and_token() {
        let registry = ShopRegistry::from_json(
            r#"{
                "demo.myshopify.com": {
                    "accessToken": "shpat_demo",
                    "settings": { "enableSkuFallback": false }
                }
            }"#,
            Some("shpat_default".to_string()),
        )
        .unwrap();

        assert!(!registry.settings_for("demo.myshopify.com").enable_sku_fallback);
        assert!(registry.settings_for("other.myshopify.com").enable_sku_fallback);
        assert!(registry.client_for("other.myshopify.com").is_some());
    }

    #[test]
    fn no_token_anywhere_means_no_client() {
        let registry = ShopRegistry::new(None);
        assert!(registry.client_for("demo.myshopify.com").is_none());
    }

    #[test]
    fn bad_merchant_pattern_fails_at_parse_time() {
        let result = ShopRegistry::from_json(
            r#"{"demo.myshopify.com": {"accessToken": "t", "settings": {"skuPattern": "("}}}"#,
            None,
        );
        assert!(result.is_err());
    }
}
