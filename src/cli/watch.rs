use super::{crypto, exchange};
use crate::core::crypto::{ChangeWindow, CryptoMarketProvider, MarketBoard};
use crate::core::currency::RateTableProvider;
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{info, warn};

/// Refreshes the rates dashboard every `period`. Runs `rounds` times, or
/// forever when `rounds` is `None`.
pub async fn rates_loop(
    providers: &[Box<dyn RateTableProvider>],
    period: Duration,
    rounds: Option<usize>,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut done = 0;
    while rounds.is_none_or(|r| done < r) {
        ticker.tick().await;
        exchange::show_dashboard(providers).await;
        done += 1;
    }
}

/// Runs one crypto refresh and returns the lines to print. A failed refresh
/// leaves `board` as it was and yields the unavailable placeholder.
pub async fn crypto_round(
    provider: &dyn CryptoMarketProvider,
    ids: &[String],
    window: ChangeWindow,
    board: &mut MarketBoard,
) -> Vec<String> {
    match crypto::refresh_board(provider, ids, board).await {
        Ok(fresh) => {
            *board = fresh;
            crypto::board_lines(board, window, true)
        }
        Err(e) => {
            warn!("Market refresh failed, keeping previous ranks: {:#}", e);
            crypto::board_lines(board, window, false)
        }
    }
}

/// Refreshes the crypto board every `period`. Rank changes are measured
/// against the last successful refresh.
pub async fn crypto_loop(
    provider: &dyn CryptoMarketProvider,
    ids: &[String],
    window: ChangeWindow,
    period: Duration,
    rounds: Option<usize>,
) -> MarketBoard {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut board = MarketBoard::new();
    let mut done = 0;
    while rounds.is_none_or(|r| done < r) {
        ticker.tick().await;
        println!();
        for line in crypto_round(provider, ids, window, &mut board).await {
            println!("{line}");
        }
        done += 1;
    }
    board
}

pub async fn run(
    rate_providers: &[Box<dyn RateTableProvider>],
    market_provider: &dyn CryptoMarketProvider,
    ids: &[String],
    window: ChangeWindow,
    period: Duration,
) {
    info!(interval_secs = period.as_secs(), "Starting watch mode");
    futures::future::join(
        rates_loop(rate_providers, period, None),
        crypto_loop(market_provider, ids, window, period, None),
    )
    .await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::crypto::CryptoCoin;
    use crate::core::crypto::tests::coin;
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Serves each scripted response once, in order.
    struct ScriptedMarket(Mutex<Vec<Option<Vec<CryptoCoin>>>>);

    #[async_trait]
    impl CryptoMarketProvider for ScriptedMarket {
        async fn fetch_markets(&self, _ids: &[String]) -> Result<Vec<CryptoCoin>> {
            let mut script = self.0.lock().map_err(|_| anyhow!("poisoned"))?;
            let next = if script.is_empty() {
                None
            } else {
                script.remove(0)
            };
            next.ok_or_else(|| anyhow!("503 Service Unavailable"))
        }
    }

    #[tokio::test]
    async fn test_crypto_loop_survives_failed_refresh() {
        let market = ScriptedMarket(Mutex::new(vec![
            Some(vec![coin("bitcoin", 1000.0), coin("ethereum", 400.0)]),
            None,
            Some(vec![coin("bitcoin", 300.0), coin("ethereum", 400.0)]),
        ]));
        let ids = vec!["bitcoin".to_string(), "ethereum".to_string()];

        let board = crypto_loop(
            &market,
            &ids,
            ChangeWindow::TwentyFourHours,
            Duration::from_millis(1),
            Some(3),
        )
        .await;

        assert_eq!(board.rank("ethereum"), Some(1));
        assert_eq!(board.rank_change("bitcoin"), Some(1));
    }

    #[tokio::test]
    async fn test_failed_round_prints_placeholder_and_keeps_board() {
        let market = ScriptedMarket(Mutex::new(vec![Some(vec![coin("bitcoin", 1000.0)]), None]));
        let ids = vec!["bitcoin".to_string()];
        let window = ChangeWindow::TwentyFourHours;
        let mut board = MarketBoard::new();

        let first = crypto_round(&market, &ids, window, &mut board).await;
        assert!(first.join("\n").contains("Last updated"));

        let second = crypto_round(&market, &ids, window, &mut board).await;
        let second = second.join("\n");
        assert!(second.contains("Market data is currently unavailable."));
        assert!(!second.contains("Last updated"));
        assert_eq!(board.rank("bitcoin"), Some(1));
    }
}
