//! Currency conversion abstractions

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Rates from one base currency, keyed by lowercase target code.
pub type RateTable = HashMap<String, f64>;

#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    /// Short name used in logs and in the "data provided by" line.
    fn name(&self) -> &str;

    async fn get_rate(&self, from: &str, to: &str) -> Result<f64>;
}

/// A provider that can return every rate for a base currency in one call.
#[async_trait]
pub trait RateTableProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn get_rates(&self, base: &str) -> Result<RateTable>;
}

/// Normalizes a currency code to the lowercase form the rate APIs use.
pub fn normalize_code(code: &str) -> Option<String> {
    let code = code.trim();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(code.to_ascii_lowercase())
    } else {
        None
    }
}

/// Display symbol for a currency, falling back to the uppercase code.
pub fn currency_symbol(code: &str) -> String {
    match code.to_ascii_lowercase().as_str() {
        "jpy" | "cny" => "¥".to_string(),
        "usd" => "$".to_string(),
        "eur" => "€".to_string(),
        "gbp" => "£".to_string(),
        "krw" => "₩".to_string(),
        "aud" => "A$".to_string(),
        "cad" => "C$".to_string(),
        "sgd" => "S$".to_string(),
        "inr" => "₹".to_string(),
        "brl" => "R$".to_string(),
        _ => code.to_ascii_uppercase(),
    }
}

/// Prefixes `amount` with the currency symbol. Letter-only symbols such as
/// `CHF` are separated from the digits by a space.
pub fn with_symbol(code: &str, amount: &str) -> String {
    let symbol = currency_symbol(code);
    if symbol.chars().all(|c| c.is_ascii_alphabetic()) {
        format!("{symbol} {amount}")
    } else {
        format!("{symbol}{amount}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code("USD"), Some("usd".to_string()));
        assert_eq!(normalize_code(" jpy "), Some("jpy".to_string()));
        assert_eq!(normalize_code("US"), None);
        assert_eq!(normalize_code("U5D"), None);
    }

    #[test]
    fn test_currency_symbol() {
        assert_eq!(currency_symbol("USD"), "$");
        assert_eq!(currency_symbol("aud"), "A$");
        assert_eq!(currency_symbol("chf"), "CHF");
    }

    #[test]
    fn test_with_symbol_separates_letter_symbols() {
        assert_eq!(with_symbol("usd", "1.00"), "$1.00");
        assert_eq!(with_symbol("cad", "1.00"), "C$1.00");
        assert_eq!(with_symbol("CHF", "0.6700"), "CHF 0.6700");
        assert_eq!(with_symbol("xau", "2.5"), "XAU 2.5");
    }
}
