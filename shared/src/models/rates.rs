//! Exchange rate tables

use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Currency or market code mapped to its rate
pub type RateTable = BTreeMap<String, Decimal>;

/// Code holding pesos per dollar in a USD-based table
pub const ARS_CODE: &str = "ARS";

/// Pesos per dollar, when the table has a usable peso rate
pub fn pesos_per_dollar(rates: &RateTable) -> Option<Decimal> {
    rates.get(ARS_CODE).copied().filter(|r| *r > Decimal::ZERO)
}
