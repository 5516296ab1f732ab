//! Pricing service: margin quotes backed by the catalogue and live rates

use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{
    calculate_margin, pesos_per_dollar, select_quote_supplies, Currency, GeneralInputs,
    MarginQuote, RoundingGrid, Supply,
};
use std::sync::Arc;
use validator::Validate;

use super::catalog::CatalogService;
use super::rate_cache::RateCache;
use crate::error::AppResult;

/// Request body for a margin quote
#[derive(Debug, Deserialize, Validate)]
pub struct MarginQuoteRequest {
    #[validate]
    pub inputs: GeneralInputs,
    /// Supplies to cost; picked from the catalogue when absent
    pub supplies: Option<Vec<Supply>>,
    #[serde(default)]
    pub grid: RoundingGrid,
    /// Pesos per dollar; the live rate is used when absent
    pub exchange_rate: Option<Decimal>,
}

/// Pricing service for margin quotes
#[derive(Clone)]
pub struct PricingService {
    catalog: CatalogService,
    rates: Arc<RateCache>,
}

impl PricingService {
    pub fn new(catalog: CatalogService, rates: Arc<RateCache>) -> Self {
        Self { catalog, rates }
    }

    pub async fn quote(&self, request: MarginQuoteRequest) -> AppResult<MarginQuote> {
        request.validate()?;

        let supplies = match request.supplies {
            Some(supplies) => supplies,
            None => {
                let catalogue = self.catalog.list_supplies().await?;
                select_quote_supplies(&catalogue, &request.inputs)
            }
        };

        let rate = match request.exchange_rate {
            Some(rate) => Some(rate),
            None => live_usd_rate(&self.rates, &request.inputs).await?,
        };

        tracing::debug!(
            supplies = supplies.len(),
            rate = ?rate,
            "calculating margin quote"
        );
        Ok(calculate_margin(&request.inputs, &supplies, rate, request.grid)?)
    }
}

/// Pesos per dollar from the rate cache.
///
/// A provider failure only matters when the essence is priced in dollars;
/// otherwise the quote goes ahead without dollar prices.
pub async fn live_usd_rate(rates: &RateCache, inputs: &GeneralInputs) -> AppResult<Option<Decimal>> {
    match rates.get().await {
        Ok(table) => Ok(pesos_per_dollar(&table)),
        Err(e) if inputs.essence_currency == Currency::Usd => Err(e),
        Err(e) => {
            tracing::warn!(error = %e, "quoting without exchange rate");
            Ok(None)
        }
    }
}
