use super::ui::{self, StyleType};
use crate::core::trade::{PositionSummary, Trade, TradeCurrency, aggregate};
use anyhow::Result;
use comfy_table::{Cell, Table};

fn money(currency: TradeCurrency, value: f64) -> String {
    match currency {
        TradeCurrency::Jpy => format!("¥{}", ui::format_number(value, 0)),
        TradeCurrency::Usd => format!("${}", ui::format_number(value, 2)),
    }
}

pub fn summary_table(summaries: &[PositionSummary]) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Asset"),
        ui::header_cell("Currency"),
        ui::header_cell("Bought"),
        ui::header_cell("Sold"),
        ui::header_cell("P&L"),
        ui::header_cell("Est. tax (20.315%)"),
    ]);
    for summary in summaries {
        let profit = summary.profit();
        let profit_text = money(summary.currency, profit);
        let profit_cell = if profit >= 0.0 {
            ui::total_cell(profit_text)
        } else {
            ui::right_cell(ui::style_text(&profit_text, StyleType::Error))
        };
        table.add_row(vec![
            Cell::new(&summary.asset),
            Cell::new(summary.currency),
            ui::right_cell(money(summary.currency, summary.bought)),
            ui::right_cell(money(summary.currency, summary.sold)),
            profit_cell,
            summary.estimated_tax().map_or_else(
                || ui::na_cell(false),
                |tax| ui::right_cell(money(summary.currency, tax)),
            ),
        ]);
    }
    table
}

/// Parses `side:asset:quantity:price[:currency]` entries and prints the
/// aggregated profit and loss.
pub fn run(raw_trades: &[String]) -> Result<()> {
    let mut trades = Vec::with_capacity(raw_trades.len());
    for raw in raw_trades {
        match raw.parse::<Trade>() {
            Ok(trade) => trades.push(trade),
            Err(e) => {
                ui::print_error(&format!("{raw}: {e}"));
                return Ok(());
            }
        }
    }

    let summaries = aggregate(&trades);
    println!("\n{}", ui::style_text("Trade P&L simulation", StyleType::Title));
    if summaries.is_empty() {
        println!("No trades to summarize.");
        return Ok(());
    }
    println!("{}", summary_table(&summaries));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_table() {
        let trades: Vec<Trade> = [
            "buy:BTC:0.5:4000000",
            "sell:btc:0.5:5000000",
            "buy:ETH:1:2000:USD",
        ]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
        let rendered = summary_table(&aggregate(&trades)).to_string();
        assert!(rendered.contains("¥500,000"));
        assert!(rendered.contains("¥101,575"));
        assert!(rendered.contains("$2,000.00"));
        assert!(rendered.contains("N/A"));
    }
}
