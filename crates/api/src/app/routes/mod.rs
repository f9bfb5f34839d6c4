use axum::{
    routing::{get, post},
    Router,
};

pub mod common;
pub mod stock;
pub mod system;
pub mod validations;

/// Router for all application endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/base-stock", get(stock::base_stock).post(stock::base_stock))
        .route("/base-stock/bulk", post(stock::base_stock_bulk))
        .route("/validations", post(validations::validate))
}
