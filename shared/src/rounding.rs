//! Ceiling-to-grid rounding for display prices

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CalculationError;

/// Grid used when rounding suggested prices up
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoundingGrid {
    #[default]
    Hundred,
    Thousand,
}

impl RoundingGrid {
    pub fn step(&self) -> Decimal {
        match self {
            RoundingGrid::Hundred => Decimal::ONE_HUNDRED,
            RoundingGrid::Thousand => Decimal::ONE_THOUSAND,
        }
    }

    pub fn apply(&self, value: Decimal) -> Result<Decimal, CalculationError> {
        round_up_to(value, self.step())
    }
}

/// Smallest multiple of `step` that is >= `value`.
///
/// Fails when that multiple lies beyond the decimal range.
pub fn round_up_to(value: Decimal, step: Decimal) -> Result<Decimal, CalculationError> {
    if step.is_zero() {
        return Ok(value);
    }
    let steps = value
        .checked_div(step)
        .ok_or(CalculationError::Overflow("rounded_price"))?
        .ceil();
    // ceil(-0.5) yields a signed zero
    if steps.is_zero() {
        return Ok(Decimal::ZERO);
    }
    steps
        .checked_mul(step)
        .ok_or(CalculationError::Overflow("rounded_price"))
}

pub fn round_up_to_100(value: Decimal) -> Result<Decimal, CalculationError> {
    round_up_to(value, Decimal::ONE_HUNDRED)
}

pub fn round_up_to_1000(value: Decimal) -> Result<Decimal, CalculationError> {
    round_up_to(value, Decimal::ONE_THOUSAND)
}
