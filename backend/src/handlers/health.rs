//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::services::RateCache;
use crate::AppState;

/// Freshness of one exchange rate cache
#[derive(Debug, Serialize)]
pub struct RateHealth {
    pub provider: String,
    pub fresh: bool,
    pub age_seconds: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy`, or `degraded` when the database is unreachable
    pub status: String,
    pub version: String,
    pub environment: String,
    pub database: String,
    pub rates: Vec<RateHealth>,
}

async fn rate_health(cache: &RateCache) -> RateHealth {
    let age = cache.age().await;
    RateHealth {
        provider: cache.provider_name().to_string(),
        fresh: age.is_some_and(|a| a < cache.ttl()),
        age_seconds: age.map(|a| a.as_secs()),
    }
}

/// Health check endpoint handler.
///
/// Reports cache state only; never triggers a rate fetch.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_ok = sqlx::query("SELECT 1").execute(&state.db).await.is_ok();
    if !db_ok {
        tracing::warn!("health check could not reach the database");
    }

    let mut rates = Vec::with_capacity(2);
    for cache in [&state.exchange_rates, &state.dolar_rates] {
        rates.push(rate_health(cache).await);
    }

    Json(HealthResponse {
        status: if db_ok { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
        database: if db_ok { "connected" } else { "disconnected" }.to_string(),
        rates,
    })
}
