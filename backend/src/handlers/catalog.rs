//! HTTP handlers for supply and essence catalogues

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use shared::{Essence, Supply};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::CatalogService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct EssenceQuery {
    pub supplier_id: Option<Uuid>,
}

pub async fn list_supplies(State(state): State<AppState>) -> AppResult<Json<Vec<Supply>>> {
    let service = CatalogService::new(state.db);
    Ok(Json(service.list_supplies().await?))
}

pub async fn list_essences(
    State(state): State<AppState>,
    Query(query): Query<EssenceQuery>,
) -> AppResult<Json<Vec<Essence>>> {
    let service = CatalogService::new(state.db);
    Ok(Json(service.list_essences(query.supplier_id).await?))
}

pub async fn get_essence(
    State(state): State<AppState>,
    Path(essence_id): Path<Uuid>,
) -> AppResult<Json<Essence>> {
    let service = CatalogService::new(state.db);
    Ok(Json(service.get_essence(essence_id).await?))
}
