//! HTTP handlers for exchange rate endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::RateTable;

use crate::error::AppResult;
use crate::services::RateCache;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RatesQuery {
    /// Bypass the cache and fetch now
    #[serde(default)]
    pub refresh: bool,
}

/// Cache state for one provider
#[derive(Debug, Serialize)]
pub struct RateCacheStatus {
    pub provider: String,
    pub ttl_seconds: u64,
    pub age_seconds: Option<u64>,
    pub fresh: bool,
    pub rates: Option<RateTable>,
}

/// Rates from the keyed provider, USD based
pub async fn get_exchange_rates(
    State(state): State<AppState>,
    Query(query): Query<RatesQuery>,
) -> AppResult<Json<RateTable>> {
    fetch(&state.exchange_rates, query.refresh).await
}

/// Peso quotes per dollar market from the keyless provider
pub async fn get_dolar_rates(
    State(state): State<AppState>,
    Query(query): Query<RatesQuery>,
) -> AppResult<Json<RateTable>> {
    fetch(&state.dolar_rates, query.refresh).await
}

/// What each cache currently holds, without fetching
pub async fn get_rates_status(State(state): State<AppState>) -> Json<Vec<RateCacheStatus>> {
    let mut statuses = Vec::with_capacity(2);
    for cache in [&state.exchange_rates, &state.dolar_rates] {
        statuses.push(status_of(cache).await);
    }
    Json(statuses)
}

async fn fetch(cache: &RateCache, refresh: bool) -> AppResult<Json<RateTable>> {
    let rates = if refresh {
        cache.refresh().await?
    } else {
        cache.get().await?
    };
    Ok(Json(rates))
}

async fn status_of(cache: &RateCache) -> RateCacheStatus {
    let age = cache.age().await;
    RateCacheStatus {
        provider: cache.provider_name().to_string(),
        ttl_seconds: cache.ttl().as_secs(),
        age_seconds: age.map(|a| a.as_secs()),
        fresh: age.is_some_and(|a| a < cache.ttl()),
        rates: cache.cached().await,
    }
}
