pub mod calculate;
pub mod compare;
pub mod rates;
pub mod schema;
pub mod validate;

use anyhow::Context;
use chrono::NaiveDate;
use importc::core::{validate_input, FiscalRates, ImportInput};
use importc::money::{format_eur, format_eur_cents, Euros};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Read an import description (JSON) from a file, or stdin with "-"
pub fn read_input(path: &Path) -> anyhow::Result<ImportInput> {
    if path.as_os_str() == "-" {
        read_from_stdin()
    } else {
        read_from_file(path)
    }
}

fn read_from_file(path: &Path) -> anyhow::Result<ImportInput> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let input = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("invalid input in {}", path.display()))?;
    Ok(input)
}

fn read_from_stdin() -> anyhow::Result<ImportInput> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }

    let input = serde_json::from_slice(&buffer).context("invalid input on stdin")?;
    Ok(input)
}

/// Refuse inputs the engine cannot price. Errors and warnings go to stderr,
/// prefixed with `label` when several inputs are checked.
pub fn ensure_valid(
    input: &ImportInput,
    as_of: NaiveDate,
    label: Option<&str>,
) -> anyhow::Result<()> {
    let report = validate_input(&input.vehicle, &input.context, as_of, FiscalRates::y2025());
    let has_issues = !report.errors.is_empty() || !report.warnings.is_empty();
    if let Some(label) = label.filter(|_| has_issues) {
        eprintln!("{label} :");
    }
    for error in &report.errors {
        eprintln!("  ✗ {}", error);
    }
    for warning in &report.warnings {
        eprintln!("  ⚠ {}", warning);
    }
    if !report.is_valid() {
        anyhow::bail!("cannot calculate: check inputs");
    }
    Ok(())
}

/// Calculation date: `--as-of` when given, today otherwise.
pub fn calculation_date(as_of: Option<NaiveDate>) -> NaiveDate {
    as_of.unwrap_or_else(|| chrono::Local::now().date_naive())
}

/// Whole euros unless the amount carries cents.
pub fn display_amount(amount: Euros) -> String {
    if amount.fract().is_zero() {
        format_eur(amount)
    } else {
        format_eur_cents(amount)
    }
}
