//! E2E tests running the importc binary

use std::process::{Command, Output};

fn importc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_importc"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Test the formatted breakdown of a new car bought from a German dealer
#[test]
fn calculate_new_german_car() {
    let output = importc(&[
        "calculate",
        "-i",
        "tests/data/new_german_car.json",
        "--as-of",
        "2025-06-01",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("COÛT D'IMPORTATION"));
    assert!(stdout.contains("Malus CO2"));
    assert!(stdout.contains("Émissions 155 g CO2/km"));
    assert!(stdout.contains("Quitus fiscal"));
    assert!(stdout.contains("Caution TVA"));
    assert!(stdout.contains("Délai estimé jusqu'à la carte grise : 7-12 jours ouvrés"));
    assert!(stdout.contains("Régime TVA : TVA française"));
    assert!(stdout.contains("Profil : Émissions élevées"));
    assert!(stdout.contains("note E (48,3/100)"));
    assert!(stdout.contains("Répartition : taxes 28,5\u{202f}%"));
    assert!(stdout.contains("Conseils :"));
    assert!(stdout.contains("Quitus fiscal requis"));
}

/// Test JSON output of a calculation
#[test]
fn calculate_json() {
    let output = importc(&[
        "calculate",
        "-i",
        "tests/data/new_german_car.json",
        "--as-of",
        "2025-06-01",
        "--json",
    ]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["as_of"], "2025-06-01");
    assert_eq!(json["vat"]["vat_due"], "9000");
    assert_eq!(json["co2_malus"]["final_malus"], "9200");
    assert_eq!(json["registration_fees"], "652");
    assert_eq!(json["total_cost"], "63938.90");
}

/// Test CSV output of a non-EU import
#[test]
fn calculate_csv_japanese_import() {
    let output = importc(&[
        "calculate",
        "-i",
        "tests/data/japanese_import.json",
        "--as-of",
        "2025-06-01",
        "--csv",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.starts_with("item,amount,detail"));
    assert!(stdout.contains("TVA,6000,"));
    assert!(stdout.contains("Droits de douane,3000,"));
    assert!(stdout.contains("Frais DREAL,281.90,"));
    assert!(stdout.contains("Carte grise,371,"));
    assert!(stdout.contains("TOTAL,39652.90,"));
}

/// Test reading input from stdin
#[test]
fn calculate_from_stdin() {
    use std::io::Write;
    use std::process::Stdio;

    let input = std::fs::read("tests/data/new_german_car.json").unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_importc"))
        .args(["calculate", "--as-of", "2025-06-01", "--json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to spawn command");
    child.stdin.take().unwrap().write_all(&input).unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success(), "Command failed: {:?}", output);
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total_taxes"], "18200");
}

/// Test that invalid inputs are refused
#[test]
fn calculate_rejects_invalid_input() {
    let output = importc(&[
        "calculate",
        "-i",
        "tests/data/invalid.json",
        "--as-of",
        "2025-06-01",
    ]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("Prix d'achat requis"));
    assert!(stderr.contains("cannot calculate"));
}

/// Test the validate command exit code and messages
#[test]
fn validate_reports_errors() {
    let output = importc(&[
        "validate",
        "-i",
        "tests/data/invalid.json",
        "--as-of",
        "2025-06-01",
        "--json",
    ]);
    assert_eq!(output.status.code(), Some(1));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["is_valid"], false);
    let errors = json["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 4);
    assert_eq!(errors[0]["type"], "NonPositivePrice");
    assert_eq!(errors[1]["type"], "Co2OutOfRange");
    assert_eq!(errors[1]["co2"], "620");
}

/// Test that a valid input passes validation
#[test]
fn validate_accepts_valid_input() {
    let output = importc(&[
        "validate",
        "-i",
        "tests/data/new_german_car.json",
        "--as-of",
        "2025-06-01",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("Données valides"));
}

/// Test comparing two scenarios
#[test]
fn compare_scenarios() {
    let output = importc(&[
        "compare",
        "-a",
        "tests/data/new_german_car.json",
        "-b",
        "tests/data/japanese_import.json",
        "--label-a",
        "Allemagne",
        "--label-b",
        "Japon",
        "--as-of",
        "2025-06-01",
        "--json",
    ]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["winner"], "Japon");
    assert_eq!(json["items"].as_array().unwrap().len(), 8);
}

/// Test that compare refuses a scenario the calculation would refuse
#[test]
fn compare_rejects_invalid_scenario() {
    let output = importc(&[
        "compare",
        "-a",
        "tests/data/invalid.json",
        "-b",
        "tests/data/new_german_car.json",
        "--as-of",
        "2025-06-01",
        "--json",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stdout.is_empty());
    assert!(stderr.contains("A :"));
    assert!(stderr.contains("Prix d'achat requis"));
    assert!(stderr.contains("cannot calculate"));
}

/// Test printing reference tables
#[test]
fn rates_tables() {
    let output = importc(&["rates", "weight"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("Malus poids"));
    assert!(stdout.contains("30 €/kg"));
    assert!(!stdout.contains("Taxe régionale"));
}

/// Test the JSON schema of the input document
#[test]
fn schema_json() {
    let output = importc(&["schema"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let schema: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(schema["properties"].get("vehicle").is_some());
    assert!(schema["properties"].get("context").is_some());
}

/// Test the field documentation
#[test]
fn schema_fields() {
    let output = importc(&["schema", "fields"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("co2_emissions"));
    assert!(stdout.contains("first_registration_date"));
    assert!(stdout.contains("optional"));
}
