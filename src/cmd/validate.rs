//! Validate command - surface input problems without calculating

use crate::cmd::{calculation_date, read_input};
use chrono::NaiveDate;
use clap::Args;
use importc::core::{validate_input, FiscalRates, InputError, InputWarning, ValidationReport};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// JSON file describing the vehicle and the import. Reads from stdin with "-".
    #[arg(short, long, default_value = "-")]
    input: PathBuf,

    /// Calculation date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// JSON output structure
#[derive(Debug, Serialize)]
struct ValidationOutput<'a> {
    as_of: NaiveDate,
    is_valid: bool,
    errors: Vec<Issue<'a, InputError>>,
    warnings: Vec<Issue<'a, InputWarning>>,
}

/// An issue with its tag, fields and French message
#[derive(Debug, Serialize)]
struct Issue<'a, T> {
    #[serde(flatten)]
    issue: &'a T,
    message: String,
}

impl<'a, T: std::fmt::Display> Issue<'a, T> {
    fn new(issue: &'a T) -> Self {
        Issue {
            issue,
            message: issue.to_string(),
        }
    }
}

impl ValidateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let input = read_input(&self.input)?;
        let as_of = calculation_date(self.as_of);
        let report = validate_input(&input.vehicle, &input.context, as_of, FiscalRates::y2025());

        if self.json {
            self.print_json(&report, as_of)?;
        } else {
            self.print_text(&report);
        }

        // Exit with code 1 if the input cannot be calculated
        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }

    fn print_text(&self, report: &ValidationReport) {
        if report.errors.is_empty() && report.warnings.is_empty() {
            println!("✓ Données valides");
            return;
        }
        if !report.errors.is_empty() {
            println!("Erreurs ({}) :", report.errors.len());
            for error in &report.errors {
                println!("  ✗ {}", error);
            }
        }
        if !report.warnings.is_empty() {
            println!("Avertissements ({}) :", report.warnings.len());
            for warning in &report.warnings {
                println!("  ⚠ {}", warning);
            }
        }
    }

    fn print_json(&self, report: &ValidationReport, as_of: NaiveDate) -> anyhow::Result<()> {
        let output = ValidationOutput {
            as_of,
            is_valid: report.is_valid(),
            errors: report.errors.iter().map(Issue::new).collect(),
            warnings: report.warnings.iter().map(Issue::new).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}
