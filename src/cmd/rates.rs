//! Rates command - print the fiscal reference tables

use crate::cmd::display_amount;
use clap::{Args, ValueEnum};
use importc::core::rates::PollutionBand;
use importc::core::FiscalRates;
use importc::money::{display_decimal, format_eur_cents, format_percent};
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct RatesCommand {
    /// Table to print, all of them when omitted
    #[arg(value_enum)]
    table: Option<RatesTable>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RatesTable {
    /// CO2 malus scale
    Co2,
    /// Age discount shared by both maluses
    Discount,
    /// Weight malus tiers
    Weight,
    /// Regional tax per CV and pollution tax
    Registration,
    /// VAT, customs and DREAL rates
    Fees,
    /// Known origin countries
    Countries,
}

impl RatesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let rates = FiscalRates::y2025();
        let wanted = |table: RatesTable| self.table.is_none_or(|t| t == table);

        println!();
        println!("BARÈMES {}", rates.year);

        if wanted(RatesTable::Co2) {
            print_co2(rates);
        }
        if wanted(RatesTable::Discount) {
            print_discount(rates);
        }
        if wanted(RatesTable::Weight) {
            print_weight(rates);
        }
        if wanted(RatesTable::Registration) {
            print_registration(rates);
        }
        if wanted(RatesTable::Fees) {
            print_fees(rates);
        }
        if wanted(RatesTable::Countries) {
            print_countries(rates);
        }
        Ok(())
    }
}

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "Tranche")]
    label: String,
    #[tabled(rename = "Valeur")]
    value: String,
}

fn print_table(title: &str, rows: Vec<Row>) {
    println!();
    println!("{}", title);
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
}

fn print_co2(rates: &FiscalRates) {
    let brackets = rates.co2_brackets;
    let rows = brackets
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let label = match brackets.get(i + 1) {
                Some(next) if next.threshold == b.threshold + 1 => format!("{} g/km", b.threshold),
                Some(next) => format!("{}-{} g/km", b.threshold, next.threshold - 1),
                None => format!("≥ {} g/km", b.threshold),
            };
            Row {
                label,
                value: display_amount(b.amount),
            }
        })
        .collect();
    print_table(
        &format!("Malus CO2 (pas de malus sous {} g/km)", rates.co2_malus_start),
        rows,
    );
}

fn print_discount(rates: &FiscalRates) {
    let rows = rates
        .discount_schedule
        .iter()
        .map(|d| Row {
            label: match d.months_max {
                Some(max) => format!("{}-{} mois", d.months_min, max - 1),
                None => format!("≥ {} mois", d.months_min),
            },
            value: format_percent(d.rate),
        })
        .collect();
    print_table("Décote selon l'âge", rows);
}

fn print_weight(rates: &FiscalRates) {
    let rows = rates
        .weight_tiers
        .iter()
        .map(|t| Row {
            label: match t.weight_max {
                Some(max) => format!(
                    "{}-{} kg",
                    display_decimal(t.weight_min),
                    display_decimal(max)
                ),
                None => format!("≥ {} kg", display_decimal(t.weight_min)),
            },
            value: format!("{} €/kg", display_decimal(t.rate_per_kg)),
        })
        .collect();
    print_table(
        &format!(
            "Malus poids (au-delà de {} kg, plafond combiné {})",
            display_decimal(rates.weight_threshold),
            display_amount(rates.combined_malus_cap)
        ),
        rows,
    );
}

fn print_registration(rates: &FiscalRates) {
    let mut rows: Vec<Row> = rates
        .registration
        .regional_rates
        .iter()
        .map(|r| Row {
            label: r.region.display().to_string(),
            value: format!("{}/CV", format_eur_cents(r.rate_per_cv)),
        })
        .collect();
    rows.push(Row {
        label: "Autres départements".to_string(),
        value: format!(
            "{}/CV",
            format_eur_cents(rates.registration.default_rate_per_cv)
        ),
    });
    print_table("Taxe régionale", rows);

    let bands = rates.registration.pollution_bands;
    let rows = bands
        .iter()
        .enumerate()
        .map(|(i, band)| Row {
            label: pollution_label(band, i.checked_sub(1).and_then(|p| bands.get(p))),
            value: display_amount(band.amount),
        })
        .collect();
    print_table("Taxe CO2 sur la carte grise", rows);

    println!(
        "Frais fixes : gestion {} + acheminement {}",
        format_eur_cents(rates.registration.base_administrative_fee),
        format_eur_cents(rates.registration.delivery_fee)
    );
}

fn pollution_label(band: &PollutionBand, previous: Option<&PollutionBand>) -> String {
    match (band.limit, previous.and_then(|p| p.limit)) {
        (Some(limit), _) if !band.inclusive => format!("< {} g/km", display_decimal(limit)),
        (Some(limit), _) => format!("≤ {} g/km", display_decimal(limit)),
        (None, Some(previous)) => format!("> {} g/km", display_decimal(previous)),
        (None, None) => "toutes émissions".to_string(),
    }
}

fn print_fees(rates: &FiscalRates) {
    let rows = vec![
        Row {
            label: "TVA normale".to_string(),
            value: format_percent(rates.vat.standard),
        },
        Row {
            label: "TVA réduite".to_string(),
            value: format_percent(rates.vat.reduced),
        },
        Row {
            label: "TVA Corse".to_string(),
            value: format_percent(rates.vat.corsica),
        },
        Row {
            label: "Douane voitures".to_string(),
            value: format_percent(rates.customs.passenger_cars),
        },
        Row {
            label: "Douane motos".to_string(),
            value: format_percent(rates.customs.motorcycles),
        },
        Row {
            label: "Douane utilitaires".to_string(),
            value: format_percent(rates.customs.commercial_vehicles),
        },
        Row {
            label: "DREAL base".to_string(),
            value: format_eur_cents(rates.dreal.base_fee),
        },
        Row {
            label: "DREAL accéléré".to_string(),
            value: format_eur_cents(rates.dreal.expedited),
        },
        Row {
            label: "Contrôle technique".to_string(),
            value: format_eur_cents(rates.dreal.technical_control),
        },
        Row {
            label: "Certificat de conformité".to_string(),
            value: format_eur_cents(rates.dreal.conformity_certificate),
        },
    ];
    print_table("TVA, douane et DREAL", rows);
}

#[derive(Tabled)]
struct CountryRow {
    #[tabled(rename = "Code")]
    code: &'static str,
    #[tabled(rename = "Pays")]
    name: &'static str,
    #[tabled(rename = "TVA")]
    vat_rate: String,
    #[tabled(rename = "UE")]
    is_eu: &'static str,
    #[tabled(rename = "Devise")]
    currency: &'static str,
}

fn print_countries(rates: &FiscalRates) {
    let rows: Vec<CountryRow> = rates
        .countries
        .iter()
        .map(|c| CountryRow {
            code: c.code,
            name: c.name,
            vat_rate: format!("{} %", display_decimal(c.vat_rate)),
            is_eu: if c.is_eu { "oui" } else { "non" },
            currency: c.currency,
        })
        .collect();
    println!();
    println!("Pays d'origine");
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::left()))
        .to_string();
    println!("{}", table);
}
