//! External API integrations

use async_trait::async_trait;
use shared::RateTable;

use crate::error::AppResult;

pub mod dolar_api;
pub mod exchange_rate_api;

pub use dolar_api::DolarApiClient;
pub use exchange_rate_api::ExchangeRateApiClient;

/// A source of exchange rates, normalized to a code -> rate table
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Short name used in logs and errors
    fn name(&self) -> &'static str;

    async fn fetch_rates(&self) -> AppResult<RateTable>;
}
