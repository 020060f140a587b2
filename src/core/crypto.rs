//! Crypto market data and the cached market board.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

/// Coins shown in the market table.
pub const DEFAULT_COIN_IDS: [&str; 10] = [
    "bitcoin",
    "ethereum",
    "tether",
    "ripple",
    "binancecoin",
    "solana",
    "usd-coin",
    "tron",
    "dogecoin",
    "cardano",
];

/// Sparkline positions between "now" and "4 hours ago", assuming one sample
/// per hour. If the upstream cadence differs, the 4h figure is off by the
/// same factor.
pub const FOUR_HOUR_OFFSET: usize = 4;

/// Fewest sparkline samples needed for the 4h change.
pub const MIN_SPARKLINE_SAMPLES: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sparkline {
    #[serde(default)]
    pub price: Vec<f64>,
}

/// One row of the markets endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryptoCoin {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_1h_in_currency: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_1h: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h_in_currency: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub sparkline_in_7d: Option<Sparkline>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChangeWindow {
    OneHour,
    FourHours,
    #[default]
    TwentyFourHours,
}

impl ChangeWindow {
    pub fn hours(&self) -> u32 {
        match self {
            ChangeWindow::OneHour => 1,
            ChangeWindow::FourHours => 4,
            ChangeWindow::TwentyFourHours => 24,
        }
    }
}

impl Display for ChangeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}h", self.hours())
    }
}

impl FromStr for ChangeWindow {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "1h" => Ok(ChangeWindow::OneHour),
            "4" | "4h" => Ok(ChangeWindow::FourHours),
            "24" | "24h" => Ok(ChangeWindow::TwentyFourHours),
            _ => Err(anyhow::anyhow!("Invalid change window: {}", s)),
        }
    }
}

/// Percentage change of `coin` over `window`; 0 when the data is missing.
pub fn percent_change(coin: &CryptoCoin, window: ChangeWindow) -> f64 {
    match window {
        ChangeWindow::OneHour => coin
            .price_change_percentage_1h_in_currency
            .or(coin.price_change_percentage_1h)
            .unwrap_or(0.0),
        ChangeWindow::TwentyFourHours => coin
            .price_change_percentage_24h_in_currency
            .or(coin.price_change_percentage_24h)
            .unwrap_or(0.0),
        ChangeWindow::FourHours => coin
            .sparkline_in_7d
            .as_ref()
            .map_or(0.0, |s| sparkline_change(&s.price)),
    }
}

/// Change between the last sample and the one `FOUR_HOUR_OFFSET` positions
/// earlier, i.e. `(p[len-1] - p[len-5]) / p[len-5] * 100`.
pub fn sparkline_change(prices: &[f64]) -> f64 {
    if prices.len() < MIN_SPARKLINE_SAMPLES {
        return 0.0;
    }
    let latest = prices[prices.len() - 1];
    let earlier = prices[prices.len() - 1 - FOUR_HOUR_OFFSET];
    if earlier == 0.0 || !earlier.is_finite() || !latest.is_finite() {
        return 0.0;
    }
    (latest - earlier) / earlier * 100.0
}

#[async_trait]
pub trait CryptoMarketProvider: Send + Sync {
    async fn fetch_markets(&self, ids: &[String]) -> Result<Vec<CryptoCoin>>;
}

/// Sorts by market cap, largest first. Missing caps go last.
pub fn sort_by_market_cap(coins: &mut [CryptoCoin]) {
    coins.sort_by(|a, b| {
        let a = a.market_cap.unwrap_or(f64::NEG_INFINITY);
        let b = b.market_cap.unwrap_or(f64::NEG_INFINITY);
        b.total_cmp(&a)
    });
}

/// Cached market table with ranks and rank movement between refreshes.
#[derive(Debug, Clone, Default)]
pub struct MarketBoard {
    coins: Vec<CryptoCoin>,
    ranks: HashMap<String, usize>,
    rank_changes: HashMap<String, i64>,
    updated_at: Option<DateTime<FixedOffset>>,
}

impl MarketBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the board after a successful refresh. Rank changes compare the
    /// new ranks to the ranks of the board being replaced; coins that were
    /// not on the previous board report no movement.
    pub fn refreshed(&self, mut coins: Vec<CryptoCoin>, at: DateTime<FixedOffset>) -> Self {
        sort_by_market_cap(&mut coins);
        let ranks: HashMap<String, usize> = coins
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i + 1))
            .collect();

        let rank_changes = ranks
            .iter()
            .filter_map(|(id, new_rank)| {
                let previous = *self.ranks.get(id)?;
                let change = *new_rank as i64 - previous as i64;
                (change != 0).then(|| (id.clone(), change))
            })
            .collect();

        Self {
            coins,
            ranks,
            rank_changes,
            updated_at: Some(at),
        }
    }

    pub fn coins(&self) -> &[CryptoCoin] {
        &self.coins
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    pub fn rank(&self, id: &str) -> Option<usize> {
        self.ranks.get(id).copied()
    }

    /// New rank minus previous rank. Positive means the coin moved down the
    /// table.
    pub fn rank_change(&self, id: &str) -> Option<i64> {
        self.rank_changes.get(id).copied()
    }

    pub fn updated_at(&self) -> Option<DateTime<FixedOffset>> {
        self.updated_at
    }

    /// Rows for display: coin plus its change over `window`.
    pub fn rows(&self, window: ChangeWindow) -> Vec<(&CryptoCoin, f64)> {
        self.coins
            .iter()
            .map(|coin| (coin, percent_change(coin, window)))
            .collect()
    }
}
