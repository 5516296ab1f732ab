//! DolarApi client
//!
//! Keyless provider quoting the peso against the dollar in each market
//! (oficial, blue, bolsa...). Quotes are normalized to `USD_<MARKET>` keys
//! holding the selling price in pesos.

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::RateTable;

use super::RateProvider;
use crate::error::{AppError, AppResult};

const PROVIDER: &str = "dolarapi";

/// DolarApi client
#[derive(Clone)]
pub struct DolarApiClient {
    client: Client,
    base_url: String,
}

/// One market quote from `/v1/dolares`
#[derive(Debug, Deserialize)]
struct DolarQuote {
    casa: String,
    compra: Option<Decimal>,
    venta: Option<Decimal>,
}

impl DolarApiClient {
    pub fn new() -> Self {
        Self::with_base_url("https://dolarapi.com".to_string())
    }

    /// Create a new client with custom base URL (for testing)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for DolarApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn a `/v1/dolares` payload into a rate table
pub fn parse_quotes(body: &str) -> AppResult<RateTable> {
    let quotes: Vec<DolarQuote> = serde_json::from_str(body)
        .map_err(|e| AppError::rate_provider(PROVIDER, format!("invalid response: {}", e)))?;

    let rates: RateTable = quotes
        .into_iter()
        .filter_map(|q| {
            // selling price, falling back to buying price when a market has none
            let rate = q.venta.or(q.compra)?;
            Some((format!("USD_{}", q.casa.trim().to_uppercase()), rate))
        })
        .collect();

    if rates.is_empty() {
        return Err(AppError::rate_provider(PROVIDER, "no usable quotes"));
    }
    Ok(rates)
}

#[async_trait]
impl RateProvider for DolarApiClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch_rates(&self) -> AppResult<RateTable> {
        let url = format!("{}/v1/dolares", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::rate_provider(PROVIDER, format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::rate_provider(
                PROVIDER,
                format!("{} - {}", status, body),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::rate_provider(PROVIDER, format!("unreadable body: {}", e)))?;

        parse_quotes(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quotes() {
        let body = r#"[
            {"moneda": "USD", "casa": "oficial", "nombre": "Oficial", "compra": 980, "venta": 1020, "fechaActualizacion": "2024-10-01T12:00:00.000Z"},
            {"moneda": "USD", "casa": "blue", "nombre": "Blue", "compra": 1180, "venta": 1200.5, "fechaActualizacion": "2024-10-01T12:00:00.000Z"},
            {"moneda": "USD", "casa": "tarjeta", "nombre": "Tarjeta", "compra": null, "venta": 1632, "fechaActualizacion": "2024-10-01T12:00:00.000Z"},
            {"moneda": "USD", "casa": "mayorista", "nombre": "Mayorista", "compra": 960, "venta": null, "fechaActualizacion": "2024-10-01T12:00:00.000Z"}
        ]"#;
        let rates = parse_quotes(body).unwrap();
        assert_eq!(rates.get("USD_OFICIAL"), Some(&Decimal::from(1020)));
        assert_eq!(rates.get("USD_BLUE"), Some(&Decimal::new(12005, 1)));
        assert_eq!(rates.get("USD_TARJETA"), Some(&Decimal::from(1632)));
        assert_eq!(rates.get("USD_MAYORISTA"), Some(&Decimal::from(960)));
    }

    #[test]
    fn test_parse_without_prices() {
        let body = r#"[{"casa": "blue", "compra": null, "venta": null}]"#;
        assert!(parse_quotes(body).is_err());
        assert!(parse_quotes("[]").is_err());
    }
}
