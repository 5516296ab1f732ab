//! WebAssembly module for the Perfumeria backoffice
//!
//! Provides client-side computation for:
//! - Currency formatting
//! - Price rounding
//! - Low-stock flags
//! - Margin quotes

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
use shared::{format_currency as format_amount_in, RoundingGrid};

/// `None` for NaN, infinities and magnitudes beyond the decimal range
fn to_decimal(value: f64) -> Option<Decimal> {
    if value.is_finite() {
        Decimal::from_f64(value)
    } else {
        None
    }
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Round with `round`, answering NaN when the input or result has no decimal form
fn round_with(
    value: f64,
    round: fn(Decimal) -> Result<Decimal, shared::CalculationError>,
) -> f64 {
    to_decimal(value)
        .and_then(|v| round(v).ok())
        .map_or(f64::NAN, to_f64)
}

fn parse_grid(grid: &str) -> Result<RoundingGrid, String> {
    match grid.trim().to_ascii_lowercase().as_str() {
        "" | "hundred" | "100" => Ok(RoundingGrid::Hundred),
        "thousand" | "1000" => Ok(RoundingGrid::Thousand),
        other => Err(format!("Unknown rounding grid: {}", other)),
    }
}

/// Format an amount for display; missing or non-numeric amounts render as "N/A"
#[wasm_bindgen]
pub fn format_currency(amount: Option<f64>, currency: &str) -> String {
    let currency = currency.parse().unwrap_or_default();
    format_amount_in(amount, currency, shared::DEFAULT_DECIMALS)
}

/// Next multiple of 100 at or above `value`; NaN for non-numeric input
#[wasm_bindgen]
pub fn round_up_to_100(value: f64) -> f64 {
    round_with(value, shared::round_up_to_100)
}

/// Next multiple of 1000 at or above `value`; NaN for non-numeric input
#[wasm_bindgen]
pub fn round_up_to_1000(value: f64) -> f64 {
    round_with(value, shared::round_up_to_1000)
}

/// Whether an inventory row should be flagged as low stock.
///
/// `undefined` when the quantity is not a usable number.
#[wasm_bindgen]
pub fn classify_low_stock(item_type: &str, name: &str, quantity: f64) -> Option<bool> {
    to_decimal(quantity).map(|q| classify_stock(item_type, name, q).low)
}

fn quote_json(
    inputs_json: &str,
    supplies_json: &str,
    usd_rate: Option<f64>,
    grid: &str,
) -> Result<String, String> {
    let inputs: GeneralInputs =
        serde_json::from_str(inputs_json).map_err(|e| format!("Invalid inputs JSON: {}", e))?;
    let supplies: Vec<Supply> = serde_json::from_str(supplies_json)
        .map_err(|e| format!("Invalid supplies JSON: {}", e))?;
    let grid = parse_grid(grid)?;
    let usd_rate = usd_rate
        .map(|rate| to_decimal(rate).ok_or_else(|| format!("Invalid exchange rate: {}", rate)))
        .transpose()?;

    let quote = calculate_margin(&inputs, &supplies, usd_rate, grid)
        .map_err(|e| e.to_string())?;
    serde_json::to_string(&quote).map_err(|e| e.to_string())
}

/// Calculate a margin quote, returned as JSON
#[wasm_bindgen]
pub fn calculate_margin_quote(
    inputs_json: &str,
    supplies_json: &str,
    usd_rate: Option<f64>,
    grid: &str,
) -> Result<String, JsValue> {
    quote_json(inputs_json, supplies_json, usd_rate, grid).map_err(|e| JsValue::from_str(&e))
}
