use super::ui::{self, StyleType};
use crate::core::world_currency::{WORLD_CURRENCIES, WorldCurrency, find_currency};
use anyhow::Result;
use comfy_table::{Cell, Table};

pub fn currencies_table(currencies: &[WorldCurrency]) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Name"),
        ui::header_cell("Symbol"),
        ui::header_cell("Summary"),
        ui::header_cell("Used in"),
    ]);
    for currency in currencies {
        table.add_row(vec![
            Cell::new(format!("{} {}", currency.flag, currency.code)),
            Cell::new(currency.name),
            Cell::new(currency.symbol),
            Cell::new(currency.summary),
            Cell::new(currency.countries),
        ]);
    }
    table
}

/// Detail card for one currency, one line per entry.
pub fn detail_lines(currency: &WorldCurrency) -> Vec<String> {
    let mut lines = vec![
        ui::style_text(
            &format!("{} {} ({})", currency.flag, currency.name, currency.code),
            StyleType::Title,
        ),
        format!("Symbol: {}", currency.symbol),
        format!("Used in: {}", currency.countries),
        String::new(),
        ui::style_text("History", StyleType::TotalLabel),
        currency.history.to_string(),
        String::new(),
        ui::style_text("Features", StyleType::TotalLabel),
    ];
    lines.extend(currency.features.iter().map(|f| format!("  - {f}")));
    lines.push(String::new());
    lines.push(ui::style_text("Did you know?", StyleType::TotalLabel));
    lines.push(ui::style_text(currency.fact, StyleType::Accent));
    lines
}

/// Lists every currency card, or prints the one matching `code`.
pub fn run(code: Option<&str>) -> Result<()> {
    let Some(code) = code else {
        println!("\n{}", ui::style_text("World currencies", StyleType::Title));
        println!("{}", currencies_table(&WORLD_CURRENCIES));
        return Ok(());
    };

    match find_currency(code) {
        Some(currency) => {
            println!();
            for line in detail_lines(currency) {
                println!("{line}");
            }
        }
        None => {
            let known: Vec<_> = WORLD_CURRENCIES.iter().map(|c| c.code).collect();
            ui::print_error(&format!(
                "No currency card for {} (available: {})",
                code.trim().to_ascii_uppercase(),
                known.join(", ")
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currencies_table_lists_every_card() {
        let rendered = currencies_table(&WORLD_CURRENCIES).to_string();
        for currency in &WORLD_CURRENCIES {
            assert!(rendered.contains(currency.code));
        }
        assert!(rendered.contains("世界の基軸通貨"));
    }

    #[test]
    fn test_detail_lines() {
        let lines = detail_lines(find_currency("gbp").unwrap());
        assert!(lines[0].contains("英ポンド (GBP)"));
        assert_eq!(lines[1], "Symbol: £");
        assert!(lines.contains(&"  - 1200年以上の歴史を持つ".to_string()));
        assert!(lines.last().unwrap().contains("libra"));
    }

    #[test]
    fn test_run_with_unknown_code_is_not_an_error() {
        assert!(run(Some("xau")).is_ok());
        assert!(run(None).is_ok());
    }
}
