//! Human readable (French) descriptions of calculation results.

use super::calculator::CalculationBreakdown;
use super::co2::rounded_emissions;
use super::malus::MalusResult;
use super::rates::FiscalRates;
use super::vat::{requires_fiscal_clearance, VatResult};
use super::weight::WeightMalusResult;
use crate::money::{display_decimal, format_eur, format_percent, Euros, Rate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

pub fn describe_co2_malus(
    result: &MalusResult,
    co2_emissions: Decimal,
    rates: &FiscalRates,
) -> String {
    if let Some(reason) = exemption(result) {
        return reason;
    }
    let grams = rounded_emissions(co2_emissions);
    if result.base_malus.is_zero() {
        return format!(
            "Émissions {grams} g CO2/km < {} g/km : pas de malus",
            rates.co2_malus_start
        );
    }
    let mut description = format!(
        "Émissions {grams} g CO2/km : {}",
        format_eur(result.base_malus)
    );
    description.push_str(&discount_suffix(result));
    description
}

pub fn describe_weight_malus(
    result: &WeightMalusResult,
    weight: Decimal,
    rates: &FiscalRates,
) -> String {
    if let Some(reason) = exemption(&result.malus) {
        return reason;
    }
    let weight = display_decimal(weight);
    if result.malus.base_malus.is_zero() {
        return format!(
            "Poids {weight} kg ≤ {} kg : pas de malus",
            display_decimal(rates.weight_threshold)
        );
    }
    let mut description = format!(
        "Poids {weight} kg : {} kg × {} €/kg = {}",
        display_decimal(result.excess_weight),
        display_decimal(result.applicable_rate),
        format_eur(result.malus.base_malus)
    );
    description.push_str(&discount_suffix(&result.malus));
    description
}

pub fn describe_vat(vat: &VatResult) -> String {
    if vat.vat_due > Decimal::ZERO {
        return format!(
            "{} : {} ({})",
            vat.description,
            format_eur(vat.vat_due),
            format_percent(vat.vat_rate)
        );
    }
    if vat.vat_included_in_price > Decimal::ZERO {
        return format!(
            "{} : {} inclus ({})",
            vat.description,
            format_eur(vat.vat_included_in_price),
            format_percent(vat.vat_rate)
        );
    }
    vat.description.clone()
}

/// One line summary: `Prix d'achat : … + TVA : … = total`.
pub fn calculation_summary(breakdown: &CalculationBreakdown) -> String {
    let mut parts = vec![format!(
        "Prix d'achat : {}",
        format_eur(breakdown.purchase_price)
    )];
    if breakdown.vat.vat_due > Decimal::ZERO {
        parts.push(format!("TVA : {}", format_eur(breakdown.vat.vat_due)));
    }
    if breakdown.customs_duty > Decimal::ZERO {
        parts.push(format!(
            "Droits de douane : {}",
            format_eur(breakdown.customs_duty)
        ));
    }
    if breakdown.combined_malus_after_cap > Decimal::ZERO {
        parts.push(format!(
            "Malus écologique : {}",
            format_eur(breakdown.combined_malus_after_cap)
        ));
    }
    parts.push(format!(
        "Frais administratifs : {}",
        format_eur(breakdown.total_fees)
    ));
    format!(
        "{} = {}",
        parts.join(" + "),
        format_eur(breakdown.total_cost)
    )
}

/// Share of the total cost taken by taxes, fees and the vehicle itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CostShares {
    pub taxes: Rate,
    pub fees: Rate,
    pub purchase_price: Rate,
}

/// `None` when the total cost is not positive.
pub fn cost_shares(breakdown: &CalculationBreakdown) -> Option<CostShares> {
    let total = breakdown.total_cost;
    if total <= Decimal::ZERO {
        return None;
    }
    let share = |amount: Euros| {
        (amount / total).round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
    };
    Some(CostShares {
        taxes: share(breakdown.total_taxes),
        fees: share(breakdown.total_fees),
        purchase_price: share(breakdown.purchase_price),
    })
}

/// Amount saved by the combined malus cap, if it applied.
pub fn malus_cap_saving(breakdown: &CalculationBreakdown) -> Option<Euros> {
    let saving = breakdown.combined_malus_before_cap - breakdown.combined_malus_after_cap;
    (saving > Decimal::ZERO).then_some(saving)
}

/// Documents needed to register the imported vehicle.
pub fn required_documents(breakdown: &CalculationBreakdown) -> Vec<&'static str> {
    let mut documents = vec![
        "Certificat de conformité européen (COC)",
        "Facture d'achat",
        "Certificat de cession (ou équivalent européen)",
        "Justificatif de domicile",
        "Pièce d'identité",
    ];
    if !breakdown.is_eu_origin {
        documents.push("Déclaration en douane");
        documents.push("Certificat de dédouanement");
    }
    if requires_fiscal_clearance(&breakdown.vat) {
        documents.push("Quitus fiscal");
    }
    if breakdown.vat.requires_customs_bond {
        documents.push("Attestation de caution TVA");
    }
    documents
}

fn exemption(result: &MalusResult) -> Option<String> {
    if !result.is_exempt {
        return None;
    }
    Some(format!(
        "Exemption : {}",
        result.exemption_reason.as_deref().unwrap_or_default()
    ))
}

fn discount_suffix(result: &MalusResult) -> String {
    if result.discount_rate.is_zero() {
        return String::new();
    }
    format!(
        " - Décote {} ({}) : -{}",
        format_percent(result.discount_rate),
        result.age(),
        format_eur(result.discount_amount)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calculator::calculate_import_costs;
    use crate::core::vehicle::{BuyerType, ImportContext, VehicleSpec, VehicleType};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    const NNBSP: char = '\u{202F}';

    fn rates() -> &'static FiscalRates {
        FiscalRates::y2025()
    }

    fn breakdown(origin: &str, registered: NaiveDate) -> CalculationBreakdown {
        let vehicle = VehicleSpec {
            co2_emissions: dec!(155),
            weight: dec!(1520),
            fuel_type: "Essence".to_string(),
            fiscal_power: 9,
            is_electric: false,
            is_hybrid_plugin: false,
            is_e85: false,
            vehicle_type: VehicleType::Passenger,
        };
        let context = ImportContext {
            purchase_price: dec!(45000),
            origin_country: origin.to_string(),
            first_registration_date: registered,
            is_professional_seller: true,
            buyer_type: BuyerType::Private,
            department: "75".to_string(),
            is_disabled_person: false,
            expedited_dreal: false,
            has_vat_included: false,
            needs_technical_control: false,
            needs_conformity_certificate: false,
        };
        calculate_import_costs(
            &vehicle,
            &context,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        )
    }

    #[test]
    fn co2_description_with_discount() {
        let result = MalusResult::discounted(dec!(9200), 23, rates());
        assert_eq!(
            describe_co2_malus(&result, dec!(154.2), rates()),
            format!(
                "Émissions 155 g CO2/km : 9{NNBSP}200\u{a0}€ - Décote 20{NNBSP}% (1a 11m) : -1{NNBSP}840\u{a0}€"
            )
        );
    }

    #[test]
    fn co2_description_below_threshold_and_exempt() {
        assert_eq!(
            describe_co2_malus(&MalusResult::zero(0), dec!(98), rates()),
            "Émissions 98 g CO2/km < 113 g/km : pas de malus"
        );
        let exempt = MalusResult::exempt("Véhicule électrique".to_string(), 0);
        assert_eq!(
            describe_co2_malus(&exempt, dec!(0), rates()),
            "Exemption : Véhicule électrique"
        );
    }

    #[test]
    fn weight_description() {
        let result = WeightMalusResult {
            malus: MalusResult::discounted(dec!(2250), 0, rates()),
            excess_weight: dec!(150),
            applicable_rate: dec!(15),
        };
        assert_eq!(
            describe_weight_malus(&result, dec!(1750), rates()),
            format!("Poids 1750 kg : 150 kg × 15 €/kg = 2{NNBSP}250\u{a0}€")
        );
    }

    #[test]
    fn weight_description_when_discount_wipes_out_the_malus() {
        let result = WeightMalusResult {
            malus: MalusResult::discounted(dec!(1), 120, rates()),
            excess_weight: dec!(0.1),
            applicable_rate: dec!(10),
        };
        assert!(result.final_malus().is_zero());
        let text = describe_weight_malus(&result, dec!(1600.1), rates());
        assert!(text.starts_with("Poids 1600.1 kg : 0.1 kg × 10 €/kg = 1\u{a0}€"));
        assert!(text.contains(&format!("Décote 70{NNBSP}%")));
        assert!(!text.contains("pas de malus"));
    }

    #[test]
    fn vat_description_mentions_amount_and_rate() {
        let b = breakdown("DE", NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());
        let text = describe_vat(&b.vat);
        assert!(text.starts_with("Véhicule neuf - TVA française à acquitter"));
        assert!(text.contains(&format!("9{NNBSP}000\u{a0}€")));
        assert!(text.contains(&format!("20{NNBSP}%")));
    }

    #[test]
    fn summary_lists_nonzero_items() {
        let b = breakdown("DE", NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());
        let summary = calculation_summary(&b);
        assert!(summary.starts_with(&format!("Prix d'achat : 45{NNBSP}000\u{a0}€ + TVA")));
        assert!(summary.contains("Malus écologique"));
        assert!(!summary.contains("Droits de douane"));
        assert!(summary.ends_with(&format!("= 63{NNBSP}939\u{a0}€")));
    }

    #[test]
    fn cost_shares_of_new_german_car() {
        let b = breakdown("DE", NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());
        let shares = cost_shares(&b).unwrap();
        // 18200, 738.90 and 45000 out of 63938.90
        assert_eq!(shares.taxes, dec!(0.2846));
        assert_eq!(shares.fees, dec!(0.0116));
        assert_eq!(shares.purchase_price, dec!(0.7038));
        assert_eq!(malus_cap_saving(&b), None);
    }

    #[test]
    fn cap_saving_is_the_amount_above_the_cap() {
        let mut b = breakdown("DE", NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());
        b.combined_malus_before_cap = dec!(90000);
        b.combined_malus_after_cap = dec!(70000);
        assert_eq!(malus_cap_saving(&b), Some(dec!(20000)));

        b.total_cost = Decimal::ZERO;
        assert_eq!(cost_shares(&b), None);
    }

    #[test]
    fn documents_for_new_vehicle_from_eu_dealer() {
        let b = breakdown("DE", NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());
        let docs = required_documents(&b);
        assert!(docs.contains(&"Quitus fiscal"));
        assert!(docs.contains(&"Attestation de caution TVA"));
        assert!(!docs.contains(&"Déclaration en douane"));
    }

    #[test]
    fn documents_for_japanese_import() {
        let b = breakdown("JP", NaiveDate::from_ymd_opt(2021, 5, 1).unwrap());
        let docs = required_documents(&b);
        assert!(docs.contains(&"Déclaration en douane"));
        assert!(docs.contains(&"Quitus fiscal"));
        assert!(!docs.contains(&"Attestation de caution TVA"));
    }
}
