//! Trade profit-and-loss simulator.

use super::error::{ValidationError, parse_number};
use std::fmt::Display;
use std::str::FromStr;

/// Combined income and resident tax rate applied to JPY gains.
pub const JPY_GAINS_TAX_RATE: f64 = 0.20315;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl FromStr for Side {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" | "b" => Ok(Side::Buy),
            "sell" | "s" => Ok(Side::Sell),
            _ => Err(ValidationError::UnknownOption {
                kind: "trade side",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeCurrency {
    Jpy,
    Usd,
}

impl TradeCurrency {
    pub fn code(&self) -> &'static str {
        match self {
            TradeCurrency::Jpy => "JPY",
            TradeCurrency::Usd => "USD",
        }
    }
}

impl Display for TradeCurrency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TradeCurrency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "jpy" => Ok(TradeCurrency::Jpy),
            "usd" => Ok(TradeCurrency::Usd),
            _ => Err(ValidationError::UnknownOption {
                kind: "trade currency",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub side: Side,
    pub asset: String,
    pub quantity: f64,
    pub price: f64,
    pub currency: TradeCurrency,
}

impl Trade {
    pub fn amount(&self) -> f64 {
        self.quantity * self.price
    }
}

impl FromStr for Trade {
    type Err = ValidationError;

    /// Parses `side:asset:quantity:price[:currency]`, e.g.
    /// `buy:BTC:0.5:4000000:JPY`. Unparseable numbers count as 0 and the
    /// currency defaults to JPY.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let side = parts.next().unwrap_or_default().parse()?;
        let asset = parts.next().unwrap_or_default().trim().to_string();
        let quantity = parts.next().and_then(parse_number).unwrap_or(0.0);
        let price = parts.next().and_then(parse_number).unwrap_or(0.0);
        let currency = match parts.next() {
            Some(code) if !code.trim().is_empty() => code.parse()?,
            _ => TradeCurrency::Jpy,
        };
        Ok(Trade {
            side,
            asset,
            quantity,
            price,
            currency,
        })
    }
}

/// Per-(currency, asset) totals.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionSummary {
    pub currency: TradeCurrency,
    pub asset: String,
    pub bought: f64,
    pub sold: f64,
}

impl PositionSummary {
    pub fn profit(&self) -> f64 {
        self.sold - self.bought
    }

    /// Estimated tax on a JPY gain. USD positions carry no estimate.
    pub fn estimated_tax(&self) -> Option<f64> {
        match self.currency {
            TradeCurrency::Jpy => Some(self.profit().max(0.0) * JPY_GAINS_TAX_RATE),
            TradeCurrency::Usd => None,
        }
    }
}

/// Groups trades by currency and upper-cased asset, keeping first-seen
/// order. Trades without an asset are skipped.
pub fn aggregate(trades: &[Trade]) -> Vec<PositionSummary> {
    let mut summaries: Vec<PositionSummary> = Vec::new();
    for trade in trades {
        let asset = trade.asset.trim().to_uppercase();
        if asset.is_empty() {
            continue;
        }

        let index = match summaries
            .iter()
            .position(|s| s.currency == trade.currency && s.asset == asset)
        {
            Some(i) => i,
            None => {
                summaries.push(PositionSummary {
                    currency: trade.currency,
                    asset,
                    bought: 0.0,
                    sold: 0.0,
                });
                summaries.len() - 1
            }
        };

        let summary = &mut summaries[index];
        match trade.side {
            Side::Buy => summary.bought += trade.amount(),
            Side::Sell => summary.sold += trade.amount(),
        }
    }
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trade(side: Side, asset: &str, quantity: f64, price: f64, currency: TradeCurrency) -> Trade {
        Trade {
            side,
            asset: asset.to_string(),
            quantity,
            price,
            currency,
        }
    }

    #[test]
    fn test_parse_trade() {
        let t: Trade = "buy:BTC:0.5:4,000,000:JPY".parse().unwrap();
        assert_eq!(t, trade(Side::Buy, "BTC", 0.5, 4_000_000.0, TradeCurrency::Jpy));

        let t: Trade = "sell:eth:2:abc".parse().unwrap();
        assert_eq!(t.quantity, 2.0);
        assert_eq!(t.price, 0.0);
        assert_eq!(t.currency, TradeCurrency::Jpy);

        assert!("hold:BTC:1:1".parse::<Trade>().is_err());
        assert!("buy:BTC:1:1:EUR".parse::<Trade>().is_err());
    }

    #[test]
    fn test_aggregate_groups_and_taxes() {
        let trades = vec![
            trade(Side::Buy, "btc", 0.5, 4_000_000.0, TradeCurrency::Jpy),
            trade(Side::Buy, "ETH", 1.0, 2_000.0, TradeCurrency::Usd),
            trade(Side::Sell, "BTC", 0.5, 5_000_000.0, TradeCurrency::Jpy),
            trade(Side::Sell, "", 10.0, 10.0, TradeCurrency::Jpy),
            trade(Side::Sell, "eth", 1.0, 1_500.0, TradeCurrency::Usd),
        ];
        let summaries = aggregate(&trades);
        assert_eq!(summaries.len(), 2);

        let btc = &summaries[0];
        assert_eq!(btc.asset, "BTC");
        assert_eq!(btc.bought, 2_000_000.0);
        assert_eq!(btc.sold, 2_500_000.0);
        assert_eq!(btc.profit(), 500_000.0);
        let tax = btc.estimated_tax().unwrap();
        assert!((tax - 101_575.0).abs() < 1e-6);

        let eth = &summaries[1];
        assert_eq!(eth.currency, TradeCurrency::Usd);
        assert_eq!(eth.profit(), -500.0);
        assert_eq!(eth.estimated_tax(), None);
    }

    #[test]
    fn test_loss_has_zero_tax() {
        let trades = vec![
            trade(Side::Buy, "XRP", 100.0, 80.0, TradeCurrency::Jpy),
            trade(Side::Sell, "XRP", 100.0, 70.0, TradeCurrency::Jpy),
        ];
        let summaries = aggregate(&trades);
        assert_eq!(summaries[0].profit(), -1_000.0);
        assert_eq!(summaries[0].estimated_tax(), Some(0.0));
    }

    #[test]
    fn test_same_asset_different_currency_stays_separate() {
        let trades = vec![
            trade(Side::Buy, "BTC", 1.0, 1.0, TradeCurrency::Jpy),
            trade(Side::Buy, "BTC", 1.0, 1.0, TradeCurrency::Usd),
        ];
        assert_eq!(aggregate(&trades).len(), 2);
    }
}
