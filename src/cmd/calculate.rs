//! Calculate command - full cost breakdown of one import

use crate::cmd::{calculation_date, display_amount, ensure_valid, read_input};
use chrono::NaiveDate;
use clap::Args;
use importc::core::{
    calculate_import_costs, calculation_summary, cost_shares, describe_co2_malus, describe_vat,
    describe_weight_malus, dreal_documents, malus_cap_saving, recommendations,
    required_documents, requires_technical_control, total_processing_time, vehicle_profile,
    CalculationBreakdown, FiscalRates, ImportInput,
};
use importc::money::{format_eur, format_eur_cents, format_percent, Euros};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct CalculateCommand {
    /// JSON file describing the vehicle and the import. Reads from stdin with "-".
    #[arg(short, long, default_value = "-")]
    input: PathBuf,

    /// Calculation date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Output the full breakdown as JSON
    #[arg(long, conflicts_with = "csv")]
    json: bool,

    /// Output the cost lines as CSV
    #[arg(long)]
    csv: bool,
}

impl CalculateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let input = read_input(&self.input)?;
        let as_of = calculation_date(self.as_of);

        ensure_valid(&input, as_of, None)?;

        let breakdown = calculate_import_costs(&input.vehicle, &input.context, as_of);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&breakdown)?);
        } else if self.csv {
            write_csv(cost_lines(&input, &breakdown))?;
        } else {
            print_breakdown(&input, &breakdown);
        }
        Ok(())
    }
}

/// One line of the cost table
#[derive(Debug, Clone, Tabled)]
struct CostRow {
    #[tabled(rename = "Poste")]
    item: &'static str,
    #[tabled(rename = "Montant")]
    amount: String,
    #[tabled(rename = "Détail")]
    detail: String,
}

/// One cost line, also the CSV record with the raw amount
#[derive(Debug, Clone, Serialize)]
struct CostLine {
    item: &'static str,
    amount: Euros,
    detail: String,
}

fn cost_lines(input: &ImportInput, b: &CalculationBreakdown) -> Vec<CostLine> {
    let rates = FiscalRates::y2025();
    let mut co2_detail = describe_co2_malus(&b.co2_malus, input.vehicle.co2_emissions, rates);
    let mut weight_detail = describe_weight_malus(&b.weight_malus, input.vehicle.weight, rates);
    if b.is_malus_capped() {
        co2_detail.push_str(" (plafonné)");
        weight_detail.push_str(" (plafonné)");
    }

    let registration_detail = format!(
        "{} CV × {}/CV ({}) + taxe CO2 {} + frais fixes {}",
        input.vehicle.fiscal_power,
        format_eur_cents(b.registration.rate_per_cv),
        b.registration
            .region
            .map_or("moyenne nationale", |r| r.display()),
        format_eur(b.registration.pollution_tax),
        format_eur_cents(b.registration.fixed_fees),
    );
    let customs_detail = if b.is_eu_origin {
        "Origine UE : pas de droits".to_string()
    } else {
        format!("Hors UE, {} du prix d'achat", vehicle_customs_rate(input))
    };
    let dreal_detail = format!(
        "{} ({})",
        b.dreal.description.join(", "),
        b.dreal.processing_time
    );

    let line = |item, amount, detail| CostLine {
        item,
        amount,
        detail,
    };
    vec![
        line(
            "Prix d'achat",
            b.purchase_price,
            input.context.origin_country.to_uppercase(),
        ),
        line("TVA", b.vat.vat_due, describe_vat(&b.vat)),
        line("Malus CO2", b.capped_co2_malus, co2_detail),
        line("Malus poids", b.capped_weight_malus, weight_detail),
        line("Droits de douane", b.customs_duty, customs_detail),
        line("Frais DREAL", b.dreal_fees, dreal_detail),
        line("Carte grise", b.registration_fees, registration_detail),
        line("TOTAL", b.total_cost, String::new()),
    ]
}

fn vehicle_customs_rate(input: &ImportInput) -> String {
    format_percent(importc::core::customs::customs_rate(
        input.vehicle.vehicle_type,
        FiscalRates::y2025(),
    ))
}

fn print_breakdown(input: &ImportInput, b: &CalculationBreakdown) {
    println!();
    println!(
        "COÛT D'IMPORTATION ({}, calcul au {})",
        input.vehicle.vehicle_type.display(),
        b.as_of.format("%d/%m/%Y")
    );
    println!(
        "Âge : {} - {}",
        b.co2_malus.age(),
        if b.is_new_vehicle { "neuf" } else { "occasion" }
    );
    let profile = vehicle_profile(&input.vehicle);
    println!(
        "Profil : {} ({}), {} ({}), note {} ({}/100)",
        profile.environmental_category.label(),
        profile.environmental_category.description(),
        profile.weight_category.label(),
        profile.weight_category.description(),
        profile.impact.rating,
        profile.impact.score.to_string().replace('.', ",")
    );
    println!("Régime TVA : {}", b.vat.vat_type.display());
    println!();

    let rows = cost_lines(input, b).into_iter().map(|l| CostRow {
        item: l.item,
        amount: display_amount(l.amount),
        detail: l.detail,
    });
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::left()))
        .to_string();
    println!("{}", table);
    println!();

    println!(
        "Taxes : {}   Frais : {}   Total : {}",
        format_eur(b.total_taxes),
        display_amount(b.total_fees),
        display_amount(b.total_cost)
    );
    if let Some(shares) = cost_shares(b) {
        println!(
            "Répartition : taxes {}, frais {}, prix du véhicule {}",
            format_percent(shares.taxes),
            format_percent(shares.fees),
            format_percent(shares.purchase_price)
        );
    }
    if let Some(saving) = malus_cap_saving(b) {
        println!(
            "Plafonnement malus : {} calculé, {} plafonné, économie {}",
            format_eur(b.combined_malus_before_cap),
            format_eur(b.combined_malus_after_cap),
            format_eur(saving)
        );
    }
    if let Some(caution) = b.vat.caution_amount {
        println!("Caution TVA à déposer : {}", format_eur(caution));
    }
    println!();

    if !b.warnings.is_empty() {
        println!("Avertissements :");
        for warning in &b.warnings {
            println!("  ⚠ {}", warning);
        }
        println!();
    }

    println!("Documents requis :");
    for document in required_documents(b) {
        println!("  - {}", document);
    }
    println!();

    let technical_control = b.dreal.technical_control_fee > Euros::ZERO;
    println!("Dossier DREAL :");
    for document in dreal_documents(b.is_eu_origin, technical_control) {
        println!("  - {}", document);
    }
    // EU type approval is assumed for vehicles bought inside the Union
    let age_years = b.co2_malus.age().years;
    if !technical_control && requires_technical_control(b.is_eu_origin, age_years, b.is_eu_origin)
    {
        println!("  ⚠ Contrôle technique probablement exigé par la DREAL");
    }
    println!(
        "Délai estimé jusqu'à la carte grise : {}",
        total_processing_time(b.dreal.processing_time, true)
    );
    println!();

    let advice = recommendations(b, &input.vehicle, FiscalRates::y2025());
    if !advice.is_empty() {
        println!("Conseils :");
        for recommendation in &advice {
            println!("  • {}", recommendation);
        }
        println!();
    }
    println!("{}", calculation_summary(b));
}

fn write_csv(lines: Vec<CostLine>) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(io::stdout());
    for line in lines {
        wtr.serialize(line)?;
    }
    wtr.flush()?;
    Ok(())
}
