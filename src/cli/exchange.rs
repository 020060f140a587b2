use super::ui::{self, StyleType};
use crate::core::currency::{RateTableProvider, with_symbol};
use crate::core::exchange::{
    Conversion, DASHBOARD_AMOUNTS, Dashboard, ExchangeRateResolver, RateQuote, fetch_dashboard,
    format_dashboard_amount,
};
use anyhow::Result;
use comfy_table::{Cell, Table};
use tracing::info;

/// Lines describing a conversion result.
pub fn conversion_lines(conversion: &Conversion) -> Vec<String> {
    let from = conversion.from.to_ascii_uppercase();
    let to = conversion.to.to_ascii_uppercase();
    let amount = with_symbol(&from, &ui::format_number(conversion.amount, 2));
    let amount = format!("{amount} {from}");

    match (&conversion.quote, conversion.converted()) {
        (RateQuote::Live { rate, source }, Some(converted)) => vec![
            format!("{amount} = {} {to}", with_symbol(&to, &ui::format_number(converted, 2))),
            format!("Rate: 1 {from} = {rate:.6} {to}"),
            format!("Source: {source}"),
        ],
        (RateQuote::Fallback { rate }, Some(converted)) => vec![
            format!("{amount} = {} {to}", with_symbol(&to, &ui::format_number(converted, 2))),
            format!("Rate: 1 {from} = {rate} {to}"),
            "Live rates are unavailable; this is an approximate rate.".to_string(),
        ],
        _ => vec![format!("Exchange rate unavailable for {from}/{to}")],
    }
}

pub async fn run_convert(
    resolver: &ExchangeRateResolver,
    amount: &str,
    from: &str,
    to: &str,
) -> Result<()> {
    let pb = ui::new_spinner("Fetching exchange rate...");
    let result = resolver.convert(amount, from, to).await;
    pb.finish_and_clear();

    let conversion = match result {
        Ok(conversion) => conversion,
        Err(e) => {
            ui::print_error(&e);
            return Ok(());
        }
    };
    info!(quote = ?conversion.quote, "Conversion resolved");

    let lines = conversion_lines(&conversion);
    let mut lines = lines.iter();
    if let Some(headline) = lines.next() {
        let headline_style = match conversion.quote {
            RateQuote::Unavailable => StyleType::Error,
            _ => StyleType::TotalValue,
        };
        println!("\n{}", ui::style_text(headline, headline_style));
    }
    for line in lines {
        let line_style = match conversion.quote {
            RateQuote::Fallback { .. } => StyleType::Warning,
            _ => StyleType::Subtle,
        };
        println!("{}", ui::style_text(line, line_style));
    }
    Ok(())
}

pub fn dashboard_table(dashboard: &Dashboard) -> Table {
    let mut table = ui::new_styled_table();
    let mut header = vec![ui::header_cell("Currency")];
    for yen in DASHBOARD_AMOUNTS {
        header.push(ui::header_cell(&format!("¥{}", ui::format_number(yen, 0))));
    }
    table.set_header(header);

    for row in &dashboard.rows {
        let mut cells = vec![Cell::new(format!(
            "{} ({})",
            row.currency.code, row.currency.name
        ))];
        for (column, value) in row.amounts().into_iter().enumerate() {
            cells.push(ui::right_cell(with_symbol(
                row.currency.code,
                &format_dashboard_amount(value, column),
            )));
        }
        table.add_row(cells);
    }
    table
}

/// Fetches and prints the JPY dashboard once.
pub async fn show_dashboard(providers: &[Box<dyn RateTableProvider>]) {
    let pb = ui::new_spinner("Fetching rates...");
    let dashboard = fetch_dashboard(providers).await;
    pb.finish_and_clear();

    println!("\n{}", ui::style_text("Yen exchange rates", StyleType::Title));
    match dashboard {
        Some(dashboard) => {
            println!("{}", dashboard_table(&dashboard));
            println!(
                "{}",
                ui::style_text(
                    &format!(
                        "Data provided by {} | Last updated: {}",
                        dashboard.source,
                        ui::format_timestamp(ui::now_jst())
                    ),
                    StyleType::Subtle,
                )
            );
        }
        None => println!(
            "{}",
            ui::style_text("Rates are currently unavailable.", StyleType::Error)
        ),
    }
}

pub async fn run_rates(providers: &[Box<dyn RateTableProvider>]) -> Result<()> {
    show_dashboard(providers).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::exchange::{DASHBOARD_CURRENCIES, DashboardRow};

    fn conversion(quote: RateQuote) -> Conversion {
        Conversion {
            amount: 100.0,
            from: "usd".to_string(),
            to: "jpy".to_string(),
            quote,
        }
    }

    #[test]
    fn test_live_conversion_lines() {
        let lines = conversion_lines(&conversion(RateQuote::Live {
            rate: 150.123456789,
            source: "currency-api".to_string(),
        }));
        assert_eq!(lines[0], "$100.00 USD = ¥15,012.35 JPY");
        assert_eq!(lines[1], "Rate: 1 USD = 150.123457 JPY");
        assert_eq!(lines[2], "Source: currency-api");
    }

    #[test]
    fn test_fallback_conversion_lines() {
        let lines = conversion_lines(&conversion(RateQuote::Fallback { rate: 149.5 }));
        assert_eq!(lines[0], "$100.00 USD = ¥14,950.00 JPY");
        assert_eq!(lines[1], "Rate: 1 USD = 149.5 JPY");
        assert!(lines[2].contains("approximate"));
    }

    #[test]
    fn test_unavailable_conversion_lines() {
        let lines = conversion_lines(&conversion(RateQuote::Unavailable));
        assert_eq!(lines, ["Exchange rate unavailable for USD/JPY"]);
    }

    #[test]
    fn test_dashboard_table() {
        let dashboard = Dashboard {
            source: "currency-api".to_string(),
            rows: vec![DashboardRow {
                currency: DASHBOARD_CURRENCIES[0],
                rate: 0.0067,
            }],
        };
        let rendered = dashboard_table(&dashboard).to_string();
        assert!(rendered.contains("USD (米ドル)"));
        assert!(rendered.contains("$0.6700"));
        assert!(rendered.contains("$6.70"));
        assert!(rendered.contains("$67"));
    }

    #[test]
    fn test_dashboard_table_separates_letter_symbols() {
        let dashboard = Dashboard {
            source: "currency-api".to_string(),
            rows: vec![DashboardRow {
                currency: DASHBOARD_CURRENCIES[7],
                rate: 0.0059,
            }],
        };
        let rendered = dashboard_table(&dashboard).to_string();
        assert!(rendered.contains("CHF (スイスフラン)"));
        assert!(rendered.contains("CHF 0.5900"));
        assert!(!rendered.contains("CHF0"));
    }
}
