//! Errors raised by the pure pricing calculations

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Invalid input to a pricing calculation.
///
/// These are rejected before any price is produced; nothing is coerced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculationError {
    #[error("Margin must be at least 0% and below 100%, got {0}%")]
    MarginOutOfRange(Decimal),

    #[error("Wholesale discount must be between 0% and 100%, got {0}%")]
    DiscountOutOfRange(Decimal),

    #[error("Lot size in grams must be greater than zero, got {0}")]
    InvalidLotGrams(Decimal),

    #[error("Essence grams per unit cannot be negative, got {0}")]
    InvalidEssenceGrams(Decimal),

    #[error("Supply '{name}' has no usable lot quantity")]
    InvalidLotQuantity { supply_id: Option<Uuid>, name: String },

    #[error("An exchange rate is required to convert {0} prices")]
    MissingExchangeRate(String),

    #[error("Exchange rate must be greater than zero, got {0}")]
    InvalidExchangeRate(Decimal),

    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    /// An intermediate amount left the representable decimal range
    #[error("Amount out of range while computing {0}")]
    Overflow(&'static str),
}

impl CalculationError {
    /// Name of the offending input field, for error responses
    pub fn field(&self) -> &'static str {
        match self {
            CalculationError::MarginOutOfRange(_) => "margin_percent",
            CalculationError::DiscountOutOfRange(_) => "wholesale_discount_percent",
            CalculationError::InvalidLotGrams(_) => "lot_grams",
            CalculationError::InvalidEssenceGrams(_) => "essence_grams_per_unit",
            CalculationError::InvalidLotQuantity { .. } => "supplies",
            CalculationError::MissingExchangeRate(_) | CalculationError::InvalidExchangeRate(_) => {
                "exchange_rate"
            }
            CalculationError::UnsupportedCurrency(_) => "currency",
            CalculationError::Overflow(field) => field,
        }
    }
}
