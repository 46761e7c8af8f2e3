//! Compare command - two import scenarios side by side

use crate::cmd::{calculation_date, display_amount, ensure_valid, read_input};
use chrono::NaiveDate;
use clap::Args;
use importc::core::{calculate_import_costs, compare_scenarios, ScenarioComparison};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct CompareCommand {
    /// First scenario (JSON)
    #[arg(short = 'a', long)]
    first: PathBuf,

    /// Second scenario (JSON)
    #[arg(short = 'b', long)]
    second: PathBuf,

    /// Label of the first scenario
    #[arg(long, default_value = "A")]
    label_a: String,

    /// Label of the second scenario
    #[arg(long, default_value = "B")]
    label_b: String,

    /// Calculation date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

impl CompareCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let as_of = calculation_date(self.as_of);
        let first = read_input(&self.first)?;
        let second = read_input(&self.second)?;
        ensure_valid(&first, as_of, Some(self.label_a.as_str()))?;
        ensure_valid(&second, as_of, Some(self.label_b.as_str()))?;

        let first = calculate_import_costs(&first.vehicle, &first.context, as_of);
        let second = calculate_import_costs(&second.vehicle, &second.context, as_of);
        let comparison = compare_scenarios(&first, &second, &self.label_a, &self.label_b);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&comparison)?);
        } else {
            print_comparison(&comparison);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Tabled)]
struct ComparisonRow {
    #[tabled(rename = "Poste")]
    item: &'static str,
    #[tabled(rename = "Scénario 1")]
    first: String,
    #[tabled(rename = "Scénario 2")]
    second: String,
    #[tabled(rename = "Écart")]
    difference: String,
    #[tabled(rename = "%")]
    percent: String,
}

fn print_comparison(comparison: &ScenarioComparison) {
    println!();
    println!(
        "COMPARAISON : {} / {}",
        comparison.first_label, comparison.second_label
    );
    println!();

    let rows: Vec<ComparisonRow> = comparison
        .items
        .iter()
        .map(|i| ComparisonRow {
            item: i.item,
            first: display_amount(i.first),
            second: display_amount(i.second),
            difference: signed(i.difference),
            percent: format!("{:+.1}", i.percent_change),
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
    println!();

    if comparison.total_difference.is_zero() {
        println!("Coût identique");
    } else {
        println!(
            "Le moins cher : {} ({} d'écart, {:+.1} %)",
            comparison.winner,
            display_amount(comparison.total_difference.abs()),
            comparison.percentage_difference
        );
    }
}

fn signed(value: Decimal) -> String {
    if value > Decimal::ZERO {
        format!("+{}", display_amount(value))
    } else {
        display_amount(value)
    }
}
