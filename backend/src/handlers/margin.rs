//! HTTP handlers for the margin calculator

use axum::{extract::State, Json};
use shared::MarginQuote;

use crate::error::AppResult;
use crate::services::pricing::MarginQuoteRequest;
use crate::services::{CatalogService, PricingService};
use crate::AppState;

/// Calculate suggested retail and wholesale prices
pub async fn quote_margin(
    State(state): State<AppState>,
    Json(request): Json<MarginQuoteRequest>,
) -> AppResult<Json<MarginQuote>> {
    let service = PricingService::new(CatalogService::new(state.db), state.exchange_rates);
    let quote = service.quote(request).await?;
    Ok(Json(quote))
}
