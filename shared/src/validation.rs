//! Range checks for pricing inputs

use rust_decimal::Decimal;

use crate::error::CalculationError;

/// Margin is a share of the final price, so it must stay below 100%
pub fn validate_margin_percent(margin: Decimal) -> Result<(), CalculationError> {
    if margin < Decimal::ZERO || margin >= Decimal::ONE_HUNDRED {
        return Err(CalculationError::MarginOutOfRange(margin));
    }
    Ok(())
}

pub fn validate_discount_percent(discount: Decimal) -> Result<(), CalculationError> {
    if discount < Decimal::ZERO || discount > Decimal::ONE_HUNDRED {
        return Err(CalculationError::DiscountOutOfRange(discount));
    }
    Ok(())
}

/// Markup over cost equivalent to a margin on price, e.g. 40% margin = 66.67% markup
pub fn markup_for_margin(margin: Decimal) -> Result<Decimal, CalculationError> {
    validate_margin_percent(margin)?;
    let m = margin / Decimal::ONE_HUNDRED;
    (m / (Decimal::ONE - m))
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|markup| markup.round_dp(2))
        .ok_or(CalculationError::Overflow("markup_percent"))
}
