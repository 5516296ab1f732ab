//! HTTP handlers for inventory endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use shared::{Pagination, StockLevel};

use crate::error::AppResult;
use crate::services::InventoryService;
use crate::AppState;

/// List stock with low-stock flags
pub async fn list_stock(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> AppResult<Json<Vec<StockLevel>>> {
    let service = InventoryService::new(state.db);
    let stock = service.list_stock(&page).await?;
    Ok(Json(stock))
}

/// List only items at or below their threshold
pub async fn list_low_stock(State(state): State<AppState>) -> AppResult<Json<Vec<StockLevel>>> {
    let service = InventoryService::new(state.db);
    let stock = service.list_low_stock().await?;
    Ok(Json(stock))
}
