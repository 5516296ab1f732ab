//! Common types used across the backoffice

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CalculationError;

/// Supported currencies
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Argentine peso, the working currency
    #[default]
    Ars,
    Usd,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Ars => "ARS",
            Currency::Usd => "USD",
        }
    }

    /// Prefix printed before formatted amounts
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Ars => "$",
            Currency::Usd => "US$",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = CalculationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ARS" => Ok(Currency::Ars),
            "USD" => Ok(Currency::Usd),
            other => Err(CalculationError::UnsupportedCurrency(other.to_string())),
        }
    }
}

/// Pagination parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 50,
        }
    }
}

impl Pagination {
    pub fn limit(&self) -> i64 {
        i64::from(self.per_page.clamp(1, 500))
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * self.limit()
    }
}
