//! Exchange rate resolution: live providers first, then a static fallback
//! table, then an explicit "unavailable".

use super::currency::{CurrencyRateProvider, RateTable, RateTableProvider, normalize_code};
use super::error::{ValidationError, parse_positive};
use crate::providers::util::first_available;
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

/// Last-resort static rates, keyed `from -> to`, lowercase codes.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackRates {
    table: HashMap<String, RateTable>,
}

impl Default for FallbackRates {
    fn default() -> Self {
        let rows: [(&str, [(&str, f64); 5]); 6] = [
            (
                "jpy",
                [
                    ("usd", 0.0067),
                    ("eur", 0.0061),
                    ("gbp", 0.0053),
                    ("cny", 0.048),
                    ("krw", 8.85),
                ],
            ),
            (
                "usd",
                [
                    ("jpy", 149.50),
                    ("eur", 0.91),
                    ("gbp", 0.79),
                    ("cny", 7.15),
                    ("krw", 1320.50),
                ],
            ),
            (
                "eur",
                [
                    ("jpy", 164.20),
                    ("usd", 1.10),
                    ("gbp", 0.87),
                    ("cny", 7.86),
                    ("krw", 1452.30),
                ],
            ),
            (
                "gbp",
                [
                    ("jpy", 188.70),
                    ("usd", 1.27),
                    ("eur", 1.15),
                    ("cny", 9.03),
                    ("krw", 1668.90),
                ],
            ),
            (
                "cny",
                [
                    ("jpy", 20.90),
                    ("usd", 0.14),
                    ("eur", 0.127),
                    ("gbp", 0.111),
                    ("krw", 184.80),
                ],
            ),
            (
                "krw",
                [
                    ("jpy", 0.113),
                    ("usd", 0.00076),
                    ("eur", 0.00069),
                    ("gbp", 0.0006),
                    ("cny", 0.0054),
                ],
            ),
        ];

        let table = rows
            .into_iter()
            .map(|(from, targets)| {
                let targets = targets
                    .into_iter()
                    .map(|(to, rate)| (to.to_string(), rate))
                    .collect();
                (from.to_string(), targets)
            })
            .collect();
        Self { table }
    }
}

impl FallbackRates {
    pub fn from_map(table: HashMap<String, RateTable>) -> Self {
        let mut rates = Self {
            table: HashMap::new(),
        };
        rates.merge(table);
        rates
    }

    /// Overlays `overrides` on top of the current table.
    pub fn merge(&mut self, overrides: HashMap<String, RateTable>) {
        for (from, targets) in overrides {
            let entry = self.table.entry(from.to_ascii_lowercase()).or_default();
            for (to, rate) in targets {
                entry.insert(to.to_ascii_lowercase(), rate);
            }
        }
    }

    pub fn rate(&self, from: &str, to: &str) -> Option<f64> {
        self.table
            .get(from)
            .and_then(|targets| targets.get(to))
            .copied()
            .filter(|rate| rate.is_finite() && *rate > 0.0)
    }
}

/// Outcome of resolving a currency pair.
#[derive(Debug, Clone, PartialEq)]
pub enum RateQuote {
    Live { rate: f64, source: String },
    Fallback { rate: f64 },
    Unavailable,
}

impl RateQuote {
    pub fn rate(&self) -> Option<f64> {
        match self {
            RateQuote::Live { rate, .. } | RateQuote::Fallback { rate } => Some(*rate),
            RateQuote::Unavailable => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub quote: RateQuote,
}

impl Conversion {
    /// Converted amount, `None` when no rate could be found.
    pub fn converted(&self) -> Option<f64> {
        self.quote.rate().map(|rate| self.amount * rate)
    }
}

pub struct ExchangeRateResolver {
    providers: Vec<Box<dyn CurrencyRateProvider>>,
    fallback: FallbackRates,
}

impl ExchangeRateResolver {
    pub fn new(providers: Vec<Box<dyn CurrencyRateProvider>>, fallback: FallbackRates) -> Self {
        Self {
            providers,
            fallback,
        }
    }

    /// Asks each live provider in order. `None` when every one of them failed.
    pub async fn live_rate(&self, from: &str, to: &str) -> Option<(String, f64)> {
        first_available(&self.providers, |provider| provider.get_rate(from, to))
            .await
            .map(|(provider, rate)| (provider.name().to_string(), rate))
    }

    #[instrument(name = "ResolveRate", skip(self))]
    pub async fn resolve(&self, from: &str, to: &str) -> RateQuote {
        if let Some((source, rate)) = self.live_rate(from, to).await {
            debug!(%source, rate, "Resolved live rate");
            return RateQuote::Live { rate, source };
        }

        warn!("All live rate providers failed, trying fallback table");
        match self.fallback.rate(from, to) {
            Some(rate) => RateQuote::Fallback { rate },
            None => {
                warn!("No fallback rate for {from}->{to}");
                RateQuote::Unavailable
            }
        }
    }

    /// Validates the raw form input and converts `amount` from one currency
    /// to another.
    pub async fn convert(
        &self,
        amount: &str,
        from: &str,
        to: &str,
    ) -> Result<Conversion, ValidationError> {
        let amount = parse_positive(amount, ValidationError::InvalidAmount)?;
        let from_code =
            normalize_code(from).ok_or_else(|| ValidationError::InvalidCurrency(from.to_string()))?;
        let to_code =
            normalize_code(to).ok_or_else(|| ValidationError::InvalidCurrency(to.to_string()))?;
        if from_code == to_code {
            return Err(ValidationError::SameCurrency);
        }

        let quote = self.resolve(&from_code, &to_code).await;
        Ok(Conversion {
            amount,
            from: from_code,
            to: to_code,
            quote,
        })
    }
}

/// Base currency of the rates dashboard.
pub const DASHBOARD_BASE: &str = "jpy";

/// Yen amounts shown as dashboard columns.
pub const DASHBOARD_AMOUNTS: [f64; 3] = [100.0, 1_000.0, 10_000.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardCurrency {
    pub code: &'static str,
    pub name: &'static str,
}

pub const DASHBOARD_CURRENCIES: [DashboardCurrency; 8] = [
    DashboardCurrency {
        code: "USD",
        name: "米ドル",
    },
    DashboardCurrency {
        code: "EUR",
        name: "ユーロ",
    },
    DashboardCurrency {
        code: "GBP",
        name: "英ポンド",
    },
    DashboardCurrency {
        code: "CNY",
        name: "中国元",
    },
    DashboardCurrency {
        code: "KRW",
        name: "韓国ウォン",
    },
    DashboardCurrency {
        code: "AUD",
        name: "オーストラリアドル",
    },
    DashboardCurrency {
        code: "CAD",
        name: "カナダドル",
    },
    DashboardCurrency {
        code: "CHF",
        name: "スイスフラン",
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardRow {
    pub currency: DashboardCurrency,
    /// Units of `currency` per 1 JPY.
    pub rate: f64,
}

impl DashboardRow {
    pub fn amounts(&self) -> [f64; 3] {
        DASHBOARD_AMOUNTS.map(|yen| yen * self.rate)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub source: String,
    pub rows: Vec<DashboardRow>,
}

/// Picks the dashboard currencies out of a JPY rate table, skipping any the
/// table does not carry.
pub fn build_dashboard_rows(table: &RateTable) -> Vec<DashboardRow> {
    DASHBOARD_CURRENCIES
        .iter()
        .filter_map(|currency| {
            table
                .get(&currency.code.to_ascii_lowercase())
                .filter(|rate| rate.is_finite() && **rate > 0.0)
                .map(|rate| DashboardRow {
                    currency: *currency,
                    rate: *rate,
                })
        })
        .collect()
}

/// Fetches the JPY table through the provider chain. `None` when every
/// provider failed or none of the dashboard currencies came back.
pub async fn fetch_dashboard(providers: &[Box<dyn RateTableProvider>]) -> Option<Dashboard> {
    let (provider, table) =
        first_available(providers, |provider| provider.get_rates(DASHBOARD_BASE)).await?;
    let rows = build_dashboard_rows(&table);
    if rows.is_empty() {
        warn!("Rate table from {} had no dashboard currencies", provider.name());
        return None;
    }
    Some(Dashboard {
        source: provider.name().to_string(),
        rows,
    })
}

/// Formats a dashboard cell. Column 2 (10,000 JPY) is rounded to whole
/// units unless the value is below one.
pub fn format_dashboard_amount(value: f64, column: usize) -> String {
    let decimals = match (column, value < 1.0) {
        (2, true) => 2,
        (2, false) => 0,
        (_, true) => 4,
        (_, false) => 2,
    };
    format!("{value:.decimals$}")
}
