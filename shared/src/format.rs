//! Currency formatting for display
//!
//! Pesos follow es-AR conventions (`$ 1.234,50`), dollars en-US conventions
//! with an explicit prefix (`US$ 1,234.50`). Missing or non-finite amounts
//! render as `N/A`.

use rust_decimal::prelude::*;

use crate::types::Currency;

/// Placeholder shown when there is no amount to format
pub const NOT_AVAILABLE: &str = "N/A";

pub const DEFAULT_DECIMALS: u32 = 2;

/// Format an optional floating point amount
pub fn format_currency(amount: Option<f64>, currency: Currency, decimals: u32) -> String {
    match amount.filter(|v| v.is_finite()).and_then(Decimal::from_f64) {
        Some(value) => format_amount(value, currency, decimals),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Format an amount with the default two decimals
pub fn format_money(amount: Decimal, currency: Currency) -> String {
    format_amount(amount, currency, DEFAULT_DECIMALS)
}

/// Format an exact amount
pub fn format_amount(amount: Decimal, currency: Currency, decimals: u32) -> String {
    let rounded = amount.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.*}", decimals as usize, rounded.abs());
    let (integer, fraction) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let (group_sep, decimal_sep) = separators(currency);
    let mut out = String::with_capacity(text.len() + 8);
    if negative {
        out.push('-');
    }
    out.push_str(currency.symbol());
    out.push(' ');
    out.push_str(&group_digits(integer, group_sep));
    if let Some(fraction) = fraction.filter(|f| !f.is_empty()) {
        out.push(decimal_sep);
        out.push_str(fraction);
    }
    out
}

fn separators(currency: Currency) -> (char, char) {
    match currency {
        Currency::Ars => ('.', ','),
        Currency::Usd => (',', '.'),
    }
}

fn group_digits(digits: &str, sep: char) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(sep);
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_missing_amounts() {
        assert_eq!(format_currency(None, Currency::Ars, 2), "N/A");
        assert_eq!(format_currency(Some(f64::NAN), Currency::Usd, 2), "N/A");
        assert_eq!(format_currency(Some(f64::INFINITY), Currency::Ars, 2), "N/A");
    }

    #[test]
    fn test_pesos() {
        assert_eq!(format_currency(Some(1234.5), Currency::Ars, 2), "$ 1.234,50");
        assert_eq!(format_currency(Some(1234567.891), Currency::Ars, 2), "$ 1.234.567,89");
        assert_eq!(format_currency(Some(0.0), Currency::Ars, 2), "$ 0,00");
    }

    #[test]
    fn test_dollars() {
        assert_eq!(format_currency(Some(1234.5), Currency::Usd, 2), "US$ 1,234.50");
        assert_eq!(format_currency(Some(999.0), Currency::Usd, 2), "US$ 999.00");
    }

    #[test]
    fn test_decimal_places() {
        assert_eq!(format_currency(Some(1234.5), Currency::Ars, 0), "$ 1.235");
        assert_eq!(format_currency(Some(2.125), Currency::Usd, 3), "US$ 2.125");
    }

    #[test]
    fn test_negative_amount() {
        let amount = Decimal::from_str("-1500.25").unwrap();
        assert_eq!(format_money(amount, Currency::Ars), "-$ 1.500,25");
        // rounds to zero, no sign
        let tiny = Decimal::from_str("-0.001").unwrap();
        assert_eq!(format_money(tiny, Currency::Usd), "US$ 0.00");
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("1", '.'), "1");
        assert_eq!(group_digits("123", '.'), "123");
        assert_eq!(group_digits("1234", '.'), "1.234");
        assert_eq!(group_digits("123456", ','), "123,456");
        assert_eq!(group_digits("1234567", ','), "1,234,567");
    }
}
