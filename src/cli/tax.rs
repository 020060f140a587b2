use super::ui::{self, StyleType};
use crate::core::tax::{
    CarAge, CarClass, CarTaxBreakdown, IncomeTaxBreakdown, PropertyTaxBreakdown, PropertyType,
    calculate_car_tax, calculate_income_tax, calculate_property_tax,
};
use anyhow::Result;
use comfy_table::{Cell, Table};
use tracing::debug;

const MAN_EN: &str = "万円";

fn man_en(value: f64) -> String {
    format!("{} {MAN_EN}", ui::format_number(value, 2))
}

fn yen(value: u32) -> String {
    format!("¥{}", ui::format_number(value as f64, 0))
}

pub fn income_table(breakdown: &IncomeTaxBreakdown) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Item"), ui::header_cell("Amount")]);

    let rows = [
        ("Annual income", man_en(breakdown.income)),
        ("Deduction", man_en(breakdown.deduction)),
        ("Taxable income", man_en(breakdown.taxable_income)),
        (
            "Marginal rate",
            format!("{:.0}%", breakdown.bracket.rate * 100.0),
        ),
        ("Income tax", man_en(breakdown.income_tax)),
        ("Resident tax", man_en(breakdown.resident_tax)),
        ("Reconstruction surtax", man_en(breakdown.surtax)),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), ui::right_cell(value)]);
    }
    table.add_row(vec![
        Cell::new(ui::style_text("Total tax", StyleType::TotalLabel)),
        ui::total_cell(man_en(breakdown.total_tax)),
    ]);
    table.add_row(vec![
        Cell::new("Net income"),
        ui::right_cell(man_en(breakdown.net_income)),
    ]);
    table.add_row(vec![
        Cell::new("Effective rate"),
        ui::right_cell(format!("{:.2}%", breakdown.effective_rate)),
    ]);
    table
}

pub fn property_table(breakdown: &PropertyTaxBreakdown) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Item"), ui::header_cell("Amount")]);
    table.add_row(vec![
        Cell::new("Assessed value"),
        ui::right_cell(man_en(breakdown.assessed_value)),
    ]);
    table.add_row(vec![
        Cell::new("Reduction"),
        ui::right_cell(breakdown.property_type.reduction_label()),
    ]);
    table.add_row(vec![
        Cell::new("Taxable value"),
        ui::right_cell(man_en(breakdown.taxable_value)),
    ]);
    table.add_row(vec![
        Cell::new("Fixed asset tax (1.4%)"),
        ui::right_cell(man_en(breakdown.fixed_asset_tax)),
    ]);
    if breakdown.property_type.is_residential() {
        table.add_row(vec![
            Cell::new("City planning tax (0.3%)"),
            ui::right_cell(man_en(breakdown.city_planning_tax)),
        ]);
    }
    table.add_row(vec![
        Cell::new(ui::style_text("Total tax", StyleType::TotalLabel)),
        ui::total_cell(man_en(breakdown.total_tax)),
    ]);
    table
}

pub fn car_table(breakdown: &CarTaxBreakdown) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Item"), ui::header_cell("Amount")]);
    table.add_row(vec![
        Cell::new("Vehicle"),
        ui::right_cell(breakdown.class.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Base tax"),
        ui::right_cell(yen(breakdown.base_tax)),
    ]);
    if breakdown.age == CarAge::Over13Years {
        table.add_row(vec![
            Cell::new("Over 13 years"),
            ui::right_cell("Heavier taxation"),
        ]);
    }
    table.add_row(vec![
        Cell::new(ui::style_text("Annual tax", StyleType::TotalLabel)),
        ui::total_cell(yen(breakdown.final_tax)),
    ]);
    table
}

pub fn run_income(income: &str, deduction: Option<&str>, default_deduction: f64) -> Result<()> {
    match calculate_income_tax(income, deduction, default_deduction) {
        Ok(breakdown) => {
            debug!(?breakdown, "Income tax calculated");
            println!(
                "\n{}",
                ui::style_text("Income tax simulation", StyleType::Title)
            );
            println!("{}", income_table(&breakdown));
        }
        Err(e) => ui::print_error(&e),
    }
    Ok(())
}

pub fn run_property(value: &str, property_type: &str) -> Result<()> {
    let result = property_type
        .parse::<PropertyType>()
        .and_then(|kind| calculate_property_tax(value, kind));
    match result {
        Ok(breakdown) => {
            debug!(?breakdown, "Property tax calculated");
            println!("\n{}", ui::style_text("Fixed asset tax", StyleType::Title));
            println!("{}", property_table(&breakdown));
        }
        Err(e) => ui::print_error(&e),
    }
    Ok(())
}

pub fn run_car(class: &str, age: &str) -> Result<()> {
    let parsed = class
        .parse::<CarClass>()
        .and_then(|class| age.parse::<CarAge>().map(|age| (class, age)));
    match parsed {
        Ok((class, age)) => {
            let breakdown = calculate_car_tax(class, age);
            debug!(?breakdown, "Car tax calculated");
            println!("\n{}", ui::style_text("Automobile tax", StyleType::Title));
            println!("{}", car_table(&breakdown));
        }
        Err(e) => ui::print_error(&e),
    }
    Ok(())
}
