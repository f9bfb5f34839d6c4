use std::sync::Arc;

use anyhow::Context;

use caseguard_api::app::services::{AppServices, ShopRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    caseguard_observability::init();

    let default_token = std::env::var("SHOPIFY_ACCESS_TOKEN").ok();
    let registry = match std::env::var("CASEGUARD_SHOPS") {
        Ok(doc) => ShopRegistry::from_json(&doc, default_token)
            .context("CASEGUARD_SHOPS is not a valid shop registry document")?,
        Err(_) => {
            if default_token.is_none() {
                tracing::warn!(
                    "no CASEGUARD_SHOPS or SHOPIFY_ACCESS_TOKEN set; \
                     all availability will be reported as unknown/zero"
                );
            }
            ShopRegistry::new(default_token)
        }
    };

    let services = Arc::new(AppServices::new(Arc::new(registry)));
    let app = caseguard_api::app::build_app(services);

    let bind = std::env::var("CASEGUARD_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
