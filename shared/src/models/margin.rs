//! Margin calculator for finished perfumes

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::supply::Supply;
use crate::error::CalculationError;
use crate::format::format_money;
use crate::rounding::RoundingGrid;
use crate::types::Currency;
use crate::validation::{markup_for_margin, validate_discount_percent, validate_margin_percent};

/// Inputs shared by every line of a quote
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GeneralInputs {
    pub supplier_id: Option<Uuid>,
    /// Price of one lot of essence
    pub essence_price: Decimal,
    #[serde(default)]
    pub essence_currency: Currency,
    /// Grams of essence in the priced lot
    pub lot_grams: Decimal,
    /// Grams of essence that go into one bottle
    pub essence_grams_per_unit: Decimal,
    /// Share of the final price kept as margin
    pub margin_percent: Decimal,
    #[serde(default)]
    pub wholesale_discount_percent: Decimal,
    #[validate(length(min = 1, max = 100))]
    pub bottle_type: Option<String>,
}

/// Cost contributed by one supply
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SupplyCost {
    pub supply_id: Option<Uuid>,
    pub name: String,
    pub unit_cost: Decimal,
}

/// Prices rendered for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteDisplay {
    pub suggested_price: String,
    pub wholesale_price: String,
    pub suggested_price_usd: Option<String>,
    pub wholesale_price_usd: Option<String>,
}

/// Full result of a margin calculation, in pesos unless stated otherwise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginQuote {
    pub essence_cost: Decimal,
    pub supplies: Vec<SupplyCost>,
    pub supplies_cost: Decimal,
    pub base_cost: Decimal,
    /// Markup over base cost equivalent to the requested margin
    pub markup_percent: Decimal,
    /// Unrounded price keeping the requested margin
    pub suggested_price: Decimal,
    pub wholesale_price: Decimal,
    pub rounded_suggested_price: Decimal,
    pub rounded_wholesale_price: Decimal,
    pub suggested_price_usd: Option<Decimal>,
    pub wholesale_price_usd: Option<Decimal>,
    /// Pesos per dollar used for conversions
    pub exchange_rate: Option<Decimal>,
    pub grid: RoundingGrid,
    pub display: QuoteDisplay,
}

/// Compute suggested retail and wholesale prices.
///
/// `usd_rate` is pesos per dollar; it is required when the essence is priced
/// in dollars and, when present, also yields dollar prices. Margin is taken
/// as a share of the final price: `price = cost / (1 - margin)`.
pub fn calculate_margin(
    inputs: &GeneralInputs,
    supplies: &[Supply],
    usd_rate: Option<Decimal>,
    grid: RoundingGrid,
) -> Result<MarginQuote, CalculationError> {
    validate_margin_percent(inputs.margin_percent)?;
    validate_discount_percent(inputs.wholesale_discount_percent)?;
    if inputs.lot_grams <= Decimal::ZERO {
        return Err(CalculationError::InvalidLotGrams(inputs.lot_grams));
    }
    if inputs.essence_grams_per_unit < Decimal::ZERO {
        return Err(CalculationError::InvalidEssenceGrams(inputs.essence_grams_per_unit));
    }
    if let Some(rate) = usd_rate {
        if rate <= Decimal::ZERO {
            return Err(CalculationError::InvalidExchangeRate(rate));
        }
    }

    let supply_costs = supplies
        .iter()
        .map(|s| {
            Ok(SupplyCost {
                supply_id: s.id,
                name: s.name.clone(),
                unit_cost: s.unit_cost()?,
            })
        })
        .collect::<Result<Vec<_>, CalculationError>>()?;

    let essence_price = match inputs.essence_currency {
        Currency::Ars => inputs.essence_price,
        Currency::Usd => {
            let rate = usd_rate
                .ok_or_else(|| CalculationError::MissingExchangeRate(Currency::Usd.to_string()))?;
            inputs
                .essence_price
                .checked_mul(rate)
                .ok_or(CalculationError::Overflow("essence_price"))?
        }
    };
    let essence_cost = essence_price
        .checked_mul(inputs.essence_grams_per_unit)
        .and_then(|v| v.checked_div(inputs.lot_grams))
        .ok_or(CalculationError::Overflow("essence_cost"))?;

    let supplies_cost = supply_costs
        .iter()
        .try_fold(Decimal::ZERO, |acc, s| acc.checked_add(s.unit_cost))
        .ok_or(CalculationError::Overflow("supplies"))?;
    let base_cost = essence_cost
        .checked_add(supplies_cost)
        .ok_or(CalculationError::Overflow("base_cost"))?;

    let markup_percent = markup_for_margin(inputs.margin_percent)?;
    let margin = inputs.margin_percent / Decimal::ONE_HUNDRED;
    let suggested_price = base_cost
        .checked_div(Decimal::ONE - margin)
        .ok_or(CalculationError::Overflow("suggested_price"))?;
    let discount = inputs.wholesale_discount_percent / Decimal::ONE_HUNDRED;
    let wholesale_price = suggested_price
        .checked_mul(Decimal::ONE - discount)
        .ok_or(CalculationError::Overflow("wholesale_price"))?;

    let rounded_suggested_price = grid.apply(suggested_price)?;
    let rounded_wholesale_price = grid.apply(wholesale_price)?;

    let to_usd = |ars: Decimal| -> Result<Option<Decimal>, CalculationError> {
        usd_rate
            .map(|rate| {
                ars.checked_div(rate)
                    .map(|usd| usd.round_dp(2))
                    .ok_or(CalculationError::Overflow("price_usd"))
            })
            .transpose()
    };
    let suggested_price_usd = to_usd(rounded_suggested_price)?;
    let wholesale_price_usd = to_usd(rounded_wholesale_price)?;

    let display = QuoteDisplay {
        suggested_price: format_money(rounded_suggested_price, Currency::Ars),
        wholesale_price: format_money(rounded_wholesale_price, Currency::Ars),
        suggested_price_usd: suggested_price_usd.map(|v| format_money(v, Currency::Usd)),
        wholesale_price_usd: wholesale_price_usd.map(|v| format_money(v, Currency::Usd)),
    };

    Ok(MarginQuote {
        essence_cost,
        supplies: supply_costs,
        supplies_cost,
        base_cost,
        markup_percent,
        suggested_price,
        wholesale_price,
        rounded_suggested_price,
        rounded_wholesale_price,
        suggested_price_usd,
        wholesale_price_usd,
        exchange_rate: usd_rate,
        grid,
        display,
    })
}

/// Pick the supplies that apply to a quote from the full catalogue.
///
/// General supplies always apply, supplier-specific ones only for the selected
/// supplier, and a single bottle is chosen by matching the bottle type
/// against its name. Catalogue order is kept.
pub fn select_quote_supplies(catalogue: &[Supply], inputs: &GeneralInputs) -> Vec<Supply> {
    let bottle_type = inputs
        .bottle_type
        .as_deref()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty());
    let mut bottle_taken = false;

    catalogue
        .iter()
        .filter(|supply| {
            if supply.is_bottle() {
                let matches = !bottle_taken
                    && bottle_type
                        .as_deref()
                        .is_some_and(|t| supply.name.to_lowercase().contains(t));
                bottle_taken |= matches;
                matches
            } else if supply.is_general {
                true
            } else {
                supply.supplier_id.is_some() && supply.supplier_id == inputs.supplier_id
            }
        })
        .cloned()
        .collect()
}
