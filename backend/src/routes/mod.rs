//! Route definitions for the perfume backoffice

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Exchange rates
        .nest("/rates", rate_routes())
        // Margin calculator
        .route("/margin/quote", post(handlers::quote_margin))
        // Catalogue
        .route("/supplies", get(handlers::list_supplies))
        .route("/essences", get(handlers::list_essences))
        .route("/essences/:essence_id", get(handlers::get_essence))
        // Inventory
        .nest("/inventory", inventory_routes())
}

/// Exchange rate routes
fn rate_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_exchange_rates))
        .route("/dolar", get(handlers::get_dolar_rates))
        .route("/status", get(handlers::get_rates_status))
}

/// Inventory routes
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_stock))
        .route("/low-stock", get(handlers::list_low_stock))
}
