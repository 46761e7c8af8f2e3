//! Advice derived from a finished calculation: environmental profile of the
//! vehicle and recommendations to lower the import cost.

use super::calculator::CalculationBreakdown;
use super::rates::FiscalRates;
use super::vat::requires_fiscal_clearance;
use super::vehicle::VehicleSpec;
use crate::money::{format_eur, format_percent, round_eur, Euros, Rate};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;

const HIGH_CO2_MALUS: Euros = dec!(5000);
const HIGH_WEIGHT_MALUS: Euros = dec!(3000);
const HIGH_TAX_RATIO: Rate = dec!(0.30);
const HIGH_EMISSIONS: Decimal = dec!(150);
/// Age at which the first significant discount step is reached.
const DISCOUNT_AGE_MONTHS: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentalCategory {
    ZeroEmission,
    VeryLowEmissions,
    LowEmissions,
    ModerateEmissions,
    HighEmissions,
    VeryHighEmissions,
}

impl EnvironmentalCategory {
    pub fn from_emissions(co2_emissions: Decimal) -> Self {
        match co2_emissions {
            co2 if co2.is_zero() => EnvironmentalCategory::ZeroEmission,
            co2 if co2 < dec!(50) => EnvironmentalCategory::VeryLowEmissions,
            co2 if co2 < dec!(95) => EnvironmentalCategory::LowEmissions,
            co2 if co2 < dec!(130) => EnvironmentalCategory::ModerateEmissions,
            co2 if co2 < dec!(160) => EnvironmentalCategory::HighEmissions,
            _ => EnvironmentalCategory::VeryHighEmissions,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EnvironmentalCategory::ZeroEmission => "Zéro émission",
            EnvironmentalCategory::VeryLowEmissions => "Très faibles émissions",
            EnvironmentalCategory::LowEmissions => "Faibles émissions",
            EnvironmentalCategory::ModerateEmissions => "Émissions modérées",
            EnvironmentalCategory::HighEmissions => "Émissions élevées",
            EnvironmentalCategory::VeryHighEmissions => "Très polluant",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            EnvironmentalCategory::ZeroEmission => "Véhicule électrique ou hydrogène",
            EnvironmentalCategory::VeryLowEmissions => "Hybride rechargeable ou très efficient",
            EnvironmentalCategory::LowEmissions => "Conforme objectif européen 2021",
            EnvironmentalCategory::ModerateEmissions => "Proche des standards européens",
            EnvironmentalCategory::HighEmissions => "Au-dessus des objectifs environnementaux",
            EnvironmentalCategory::VeryHighEmissions => "Véhicule à fortes émissions",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightCategory {
    Light,
    Medium,
    Heavy,
    VeryHeavy,
}

impl WeightCategory {
    pub fn from_weight(weight: Decimal) -> Self {
        match weight {
            w if w < dec!(1200) => WeightCategory::Light,
            w if w < dec!(1600) => WeightCategory::Medium,
            w if w < dec!(2000) => WeightCategory::Heavy,
            _ => WeightCategory::VeryHeavy,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WeightCategory::Light => "Léger",
            WeightCategory::Medium => "Moyen",
            WeightCategory::Heavy => "Lourd",
            WeightCategory::VeryHeavy => "Très lourd",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WeightCategory::Light => "Citadine ou petite voiture",
            WeightCategory::Medium => "Berline compacte ou break",
            WeightCategory::Heavy => "SUV ou berline premium",
            WeightCategory::VeryHeavy => "Grand SUV ou véhicule de luxe",
        }
    }
}

/// Score out of 100 (`100 - co2 / 3`, clamped) with a letter rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentalImpact {
    pub rating: &'static str,
    /// Rounded to one decimal
    pub score: Decimal,
    pub comparison: &'static str,
}

pub fn environmental_impact(co2_emissions: Decimal) -> EnvironmentalImpact {
    let score = (dec!(100) - co2_emissions / dec!(3)).clamp(Decimal::ZERO, dec!(100));
    let (rating, comparison) = match score {
        s if s >= dec!(90) => (
            "A+",
            "Excellent - Véhicule très respectueux de l'environnement",
        ),
        s if s >= dec!(80) => ("A", "Très bien - Faibles émissions"),
        s if s >= dec!(70) => ("B", "Bien - Émissions modérées"),
        s if s >= dec!(60) => ("C", "Moyen - Respecte les standards européens"),
        s if s >= dec!(50) => ("D", "Médiocre - Émissions élevées"),
        _ => ("E", "Mauvais - Véhicule très polluant"),
    };
    EnvironmentalImpact {
        rating,
        score: score.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
        comparison,
    }
}

/// Environmental and weight classification of a vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleProfile {
    pub environmental_category: EnvironmentalCategory,
    pub weight_category: WeightCategory,
    pub impact: EnvironmentalImpact,
}

pub fn vehicle_profile(vehicle: &VehicleSpec) -> VehicleProfile {
    VehicleProfile {
        environmental_category: EnvironmentalCategory::from_emissions(vehicle.co2_emissions),
        weight_category: WeightCategory::from_weight(vehicle.weight),
        impact: environmental_impact(vehicle.co2_emissions),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Recommendation {
    HighCo2Malus { amount: Euros },
    HighWeightMalus { amount: Euros },
    /// The VAT bond has to be financed before the import
    VatBond,
    /// Waiting until the vehicle reaches the next discount step lowers the CO2 malus
    WaitForDiscount { savings: Euros, discount_rate: Rate },
    ConsiderElectric,
    HighTaxRatio { ratio: Rate },
    FiscalClearance,
}

impl Recommendation {
    pub fn message(&self) -> String {
        match self {
            Recommendation::HighCo2Malus { amount } => format!(
                "Malus CO2 élevé ({}) - considérez un véhicule < 130 g CO2/km pour réduire significativement les coûts",
                format_eur(*amount)
            ),
            Recommendation::HighWeightMalus { amount } => format!(
                "Malus poids important ({}) - un véhicule < 1600 kg éviterait ce malus entièrement",
                format_eur(*amount)
            ),
            Recommendation::VatBond => {
                "Caution TVA requise - préparez le financement de la caution avant l'importation"
                    .to_string()
            }
            Recommendation::WaitForDiscount {
                savings,
                discount_rate,
            } => format!(
                "Véhicule récent - attendre ses {DISCOUNT_AGE_MONTHS} mois pourrait économiser ~{} (décote {})",
                format_eur(*savings),
                format_percent(*discount_rate)
            ),
            Recommendation::ConsiderElectric => {
                "Considérez la version électrique ou hybride rechargeable pour éviter tous les malus écologiques"
                    .to_string()
            }
            Recommendation::HighTaxRatio { ratio } => format!(
                "Taxes représentant {} du prix d'achat - vérifiez si un véhicule équivalent français n'est pas plus économique",
                format_percent(*ratio)
            ),
            Recommendation::FiscalClearance => {
                "Quitus fiscal requis - contactez votre DREAL avant l'achat pour connaître la procédure"
                    .to_string()
            }
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Recommendations for one calculation, judged on the malus amounts actually
/// due after the cap.
pub fn recommendations(
    breakdown: &CalculationBreakdown,
    vehicle: &VehicleSpec,
    rates: &FiscalRates,
) -> Vec<Recommendation> {
    let mut advice = Vec::new();

    if breakdown.capped_co2_malus > HIGH_CO2_MALUS {
        advice.push(Recommendation::HighCo2Malus {
            amount: breakdown.capped_co2_malus,
        });
    }
    if breakdown.capped_weight_malus > HIGH_WEIGHT_MALUS {
        advice.push(Recommendation::HighWeightMalus {
            amount: breakdown.capped_weight_malus,
        });
    }
    if breakdown.vat.requires_customs_bond {
        advice.push(Recommendation::VatBond);
    }

    let co2 = &breakdown.co2_malus;
    if co2.age_in_months < DISCOUNT_AGE_MONTHS && co2.final_malus > Decimal::ZERO {
        let discount_rate = rates.discount_rate(DISCOUNT_AGE_MONTHS);
        let savings = round_eur(co2.base_malus * discount_rate) - co2.discount_amount;
        if savings > Decimal::ZERO {
            advice.push(Recommendation::WaitForDiscount {
                savings,
                discount_rate,
            });
        }
    }

    if vehicle.co2_emissions > HIGH_EMISSIONS && !vehicle.is_electric {
        advice.push(Recommendation::ConsiderElectric);
    }
    if breakdown.purchase_price > Decimal::ZERO {
        let ratio = breakdown.total_taxes / breakdown.purchase_price;
        if ratio > HIGH_TAX_RATIO {
            advice.push(Recommendation::HighTaxRatio {
                ratio: ratio.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero),
            });
        }
    }
    if requires_fiscal_clearance(&breakdown.vat) {
        advice.push(Recommendation::FiscalClearance);
    }

    log::debug!("{} recommendation(s)", advice.len());
    advice
}
