//! ExchangeRate-API client
//!
//! Keyed provider returning every currency against a base (USD by default).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::RateTable;

use super::RateProvider;
use crate::error::{AppError, AppResult};

const PROVIDER: &str = "exchangerate-api";

/// ExchangeRate-API client
#[derive(Clone)]
pub struct ExchangeRateApiClient {
    client: Client,
    api_key: String,
    base_url: String,
    base_currency: String,
}

/// ExchangeRate-API `latest` response
#[derive(Debug, Deserialize)]
struct LatestResponse {
    result: String,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    #[serde(default)]
    conversion_rates: RateTable,
}

impl ExchangeRateApiClient {
    /// Create a new client against the public API
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, "https://v6.exchangerate-api.com/v6".to_string())
    }

    /// Create a new client with custom base URL (for testing)
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            base_currency: "USD".to_string(),
        }
    }

    fn latest_url(&self) -> String {
        format!(
            "{}/{}/latest/{}",
            self.base_url, self.api_key, self.base_currency
        )
    }
}

/// Turn a `latest` payload into a rate table
pub fn parse_latest(body: &str) -> AppResult<RateTable> {
    let data: LatestResponse = serde_json::from_str(body)
        .map_err(|e| AppError::rate_provider(PROVIDER, format!("invalid response: {}", e)))?;

    if data.result != "success" {
        return Err(AppError::rate_provider(
            PROVIDER,
            data.error_type.unwrap_or(data.result),
        ));
    }
    if data.conversion_rates.is_empty() {
        return Err(AppError::rate_provider(PROVIDER, "empty rate table"));
    }
    Ok(data.conversion_rates)
}

#[async_trait]
impl RateProvider for ExchangeRateApiClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch_rates(&self) -> AppResult<RateTable> {
        if self.api_key.is_empty() {
            return Err(AppError::rate_provider(PROVIDER, "API key not configured"));
        }

        let response = self
            .client
            .get(self.latest_url())
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

        parse_latest(&body)
    }
}
