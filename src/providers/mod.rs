pub mod coingecko;
pub mod currency_api;
pub mod etherscan;
pub mod exchangerate_api;
pub mod util;

use crate::core::config::AppConfig;
use crate::core::currency::{CurrencyRateProvider, RateTableProvider};
use anyhow::Result;
use currency_api::CurrencyApiProvider;
use exchangerate_api::ExchangeRateApiProvider;

/// Live pair-rate chain in the order it is tried: the keyed
/// exchangerate-api first when configured, then the CDN, then its mirror.
pub fn currency_rate_chain(config: &AppConfig) -> Result<Vec<Box<dyn CurrencyRateProvider>>> {
    let mut chain: Vec<Box<dyn CurrencyRateProvider>> = Vec::new();
    if let Some(erapi) = &config.providers.exchangerate_api {
        chain.push(Box::new(ExchangeRateApiProvider::new(
            &erapi.base_url,
            &erapi.api_key,
        )?));
    }
    let currency_api = &config.providers.currency_api;
    chain.push(Box::new(CurrencyApiProvider::new(
        "currency-api",
        &currency_api.primary_url,
    )?));
    chain.push(Box::new(CurrencyApiProvider::new(
        "currency-api mirror",
        &currency_api.secondary_url,
    )?));
    Ok(chain)
}

/// Rate-table chain for the dashboard.
pub fn rate_table_chain(config: &AppConfig) -> Result<Vec<Box<dyn RateTableProvider>>> {
    let currency_api = &config.providers.currency_api;
    Ok(vec![
        Box::new(CurrencyApiProvider::new(
            "currency-api",
            &currency_api.primary_url,
        )?),
        Box::new(CurrencyApiProvider::new(
            "currency-api mirror",
            &currency_api.secondary_url,
        )?),
    ])
}
