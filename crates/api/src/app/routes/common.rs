use axum::http::HeaderMap;

/// Resolve the shop domain for a request: explicit query parameter first,
/// then the proxy headers the platform forwards.
pub fn shop_context(param: Option<&str>, headers: &HeaderMap) -> Option<String> {
    if let Some(shop) = param.filter(|s| !s.is_empty()) {
        return Some(shop.to_string());
    }
    ["x-shopify-shop-domain", "shopify-shop-domain"]
        .iter()
        .find_map(|name| headers.get(*name))
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}
