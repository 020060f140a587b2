use super::ui::{self, StyleType};
use crate::core::crypto::{ChangeWindow, CryptoMarketProvider, MarketBoard};
use crate::core::gas::{GasOracle, GasPriceProvider};
use anyhow::Result;
use comfy_table::{Cell, Color, Table};
use tracing::warn;

fn format_market_cap(cap: f64) -> String {
    match cap {
        c if c >= 1e12 => format!("${:.2}T", c / 1e12),
        c if c >= 1e9 => format!("${:.2}B", c / 1e9),
        c if c >= 1e6 => format!("${:.2}M", c / 1e6),
        c => format!("${}", ui::format_number(c, 0)),
    }
}

fn format_price(price: f64) -> String {
    let decimals = if price < 1.0 { 4 } else { 2 };
    format!("${}", ui::format_number(price, decimals))
}

/// Arrow cell for rank movement since the previous refresh.
fn rank_change_cell(change: Option<i64>) -> Cell {
    match change {
        Some(c) if c > 0 => Cell::new(format!("↓{c}")).fg(Color::Red),
        Some(c) if c < 0 => Cell::new(format!("↑{}", -c)).fg(Color::Green),
        _ => Cell::new(""),
    }
}

pub fn market_table(board: &MarketBoard, window: ChangeWindow) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("#"),
        ui::header_cell("Coin"),
        ui::header_cell("Price"),
        ui::header_cell(&format!("{window} change")),
        ui::header_cell("Market cap"),
        ui::header_cell("Rank"),
    ]);

    for (coin, change) in board.rows(window) {
        let rank = board
            .rank(&coin.id)
            .map_or_else(String::new, |r| r.to_string());
        table.add_row(vec![
            Cell::new(rank),
            Cell::new(format!("{} ({})", coin.name, coin.symbol.to_uppercase())),
            coin.current_price
                .map_or_else(|| ui::na_cell(false), |p| ui::right_cell(format_price(p))),
            ui::change_cell(change),
            coin.market_cap.map_or_else(
                || ui::na_cell(false),
                |c| ui::right_cell(format_market_cap(c)),
            ),
            rank_change_cell(board.rank_change(&coin.id)),
        ]);
    }
    table
}

/// Fetches fresh market data. On failure the current board is kept.
pub async fn refresh_board(
    provider: &dyn CryptoMarketProvider,
    ids: &[String],
    board: &MarketBoard,
) -> Result<MarketBoard> {
    let coins = provider.fetch_markets(ids).await?;
    Ok(board.refreshed(coins, ui::now_jst()))
}

/// Lines shown for one market refresh. A failed refresh shows only the
/// unavailable placeholder, even when `board` still holds older data.
pub fn board_lines(board: &MarketBoard, window: ChangeWindow, refreshed: bool) -> Vec<String> {
    let mut lines = vec![ui::style_text("Crypto market", StyleType::Title)];
    if !refreshed || board.is_empty() {
        lines.push(ui::style_text("Market data is currently unavailable.", StyleType::Error));
        return lines;
    }
    lines.push(market_table(board, window).to_string());
    if let Some(at) = board.updated_at() {
        lines.push(ui::style_text(
            &format!(
                "Data provided by CoinGecko | Last updated: {}",
                ui::format_timestamp(at)
            ),
            StyleType::Subtle,
        ));
    }
    if window == ChangeWindow::FourHours {
        lines.push(ui::style_text(
            "4h change is estimated from hourly sparkline samples.",
            StyleType::Subtle,
        ));
    }
    lines
}

pub fn print_board(board: &MarketBoard, window: ChangeWindow, refreshed: bool) {
    println!();
    for line in board_lines(board, window, refreshed) {
        println!("{line}");
    }
}

pub async fn run_crypto(
    provider: &dyn CryptoMarketProvider,
    ids: &[String],
    window: &str,
) -> Result<()> {
    let window = match window.parse::<ChangeWindow>() {
        Ok(window) => window,
        Err(e) => {
            ui::print_error(&e);
            return Ok(());
        }
    };

    let pb = ui::new_spinner("Fetching market data...");
    let result = refresh_board(provider, ids, &MarketBoard::new()).await;
    pb.finish_and_clear();

    match result {
        Ok(board) => print_board(&board, window, true),
        Err(e) => {
            warn!("Failed to fetch market data: {:#}", e);
            print_board(&MarketBoard::new(), window, false);
        }
    }
    Ok(())
}

pub fn gas_table(oracle: &GasOracle) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Safe"),
        ui::header_cell("Standard"),
        ui::header_cell("Fast"),
    ]);
    table.add_row(vec![
        ui::right_cell(format!("{} gwei", oracle.safe)),
        ui::right_cell(format!("{} gwei", oracle.propose)),
        ui::right_cell(format!("{} gwei", oracle.fast)),
    ]);
    table
}

pub async fn run_gas(provider: &dyn GasPriceProvider) -> Result<()> {
    let pb = ui::new_spinner("Fetching gas prices...");
    let result = provider.fetch_gas_oracle().await;
    pb.finish_and_clear();

    println!("\n{}", ui::style_text("Ethereum gas prices", StyleType::Title));
    match result {
        Ok(oracle) => println!("{}", gas_table(&oracle)),
        Err(e) => {
            warn!("Failed to fetch gas oracle: {:#}", e);
            println!(
                "{}",
                ui::style_text("Gas prices are currently unavailable.", StyleType::Error)
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::crypto::CryptoCoin;
    use crate::core::crypto::tests::coin;
    use anyhow::anyhow;
    use async_trait::async_trait;

    struct FixedMarket(Option<Vec<CryptoCoin>>);

    #[async_trait]
    impl CryptoMarketProvider for FixedMarket {
        async fn fetch_markets(&self, _ids: &[String]) -> Result<Vec<CryptoCoin>> {
            self.0.clone().ok_or_else(|| anyhow!("429 Too Many Requests"))
        }
    }

    #[test]
    fn test_market_cap_formatting() {
        assert_eq!(format_market_cap(1.28e12), "$1.28T");
        assert_eq!(format_market_cap(3.8e11), "$380.00B");
        assert_eq!(format_market_cap(5_500_000.0), "$5.50M");
        assert_eq!(format_market_cap(12_345.0), "$12,345");
        assert_eq!(format_price(0.98765), "$0.9877");
        assert_eq!(format_price(65_000.0), "$65,000.00");
    }

    #[tokio::test]
    async fn test_refresh_keeps_previous_board_on_error() {
        let ids = vec!["bitcoin".to_string()];
        let good = FixedMarket(Some(vec![coin("bitcoin", 100.0)]));
        let board = refresh_board(&good, &ids, &MarketBoard::new()).await.unwrap();
        assert_eq!(board.coins().len(), 1);

        let failing = FixedMarket(None);
        assert!(refresh_board(&failing, &ids, &board).await.is_err());
        assert_eq!(board.coins().len(), 1);
    }

    #[test]
    fn test_market_table_shows_rank_moves() {
        let first = MarketBoard::new().refreshed(
            vec![coin("bitcoin", 1000.0), coin("ethereum", 400.0)],
            ui::now_jst(),
        );
        let second = first.refreshed(
            vec![coin("bitcoin", 300.0), coin("ethereum", 400.0)],
            ui::now_jst(),
        );
        let rendered = market_table(&second, ChangeWindow::TwentyFourHours).to_string();
        assert!(rendered.contains("↑1"));
        assert!(rendered.contains("↓1"));
        assert!(rendered.contains("24h change"));
    }

    #[test]
    fn test_failed_refresh_shows_placeholder_not_stale_table() {
        let board = MarketBoard::new().refreshed(vec![coin("bitcoin", 100.0)], ui::now_jst());

        let fresh = board_lines(&board, ChangeWindow::FourHours, true).join("\n");
        assert!(fresh.contains("bitcoin"));
        assert!(fresh.contains("Last updated"));
        assert!(fresh.contains("estimated"));

        let failed = board_lines(&board, ChangeWindow::FourHours, false);
        assert_eq!(failed.len(), 2);
        assert!(failed[1].contains("Market data is currently unavailable."));
        assert!(!failed.join("\n").contains("bitcoin"));
    }

    #[test]
    fn test_gas_table() {
        let oracle = GasOracle {
            fast: "15".to_string(),
            propose: "13".to_string(),
            safe: "12".to_string(),
        };
        let rendered = gas_table(&oracle).to_string();
        assert!(rendered.contains("12 gwei"));
        assert!(rendered.contains("15 gwei"));
    }
}
