//! Malus exemptions.
//!
//! Each exemption is a variant with its own predicate. The CO2 and weight
//! rules list the exemptions they honour in priority order and the first one
//! that applies wins.

use super::rates::FiscalRates;
use super::vehicle::{VehicleSpec, VehicleType};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Exemption {
    Electric,
    /// Plug-in hybrid under the low-emission CO2 limit
    LowEmissionPluginHybrid,
    /// Any electric or plug-in hybrid (weight malus only)
    ElectricOrPluginHybrid,
    E85,
    DisabledPerson,
    /// First registered before the CO2 malus cut-off year
    RegisteredBeforeCutoff,
    Commercial,
}

/// Facts an exemption can be decided on.
#[derive(Debug, Clone, Copy)]
pub struct ExemptionSubject<'a> {
    pub vehicle: &'a VehicleSpec,
    pub first_registration_date: NaiveDate,
    pub is_disabled_person: bool,
}

pub const CO2_EXEMPTIONS: [Exemption; 6] = [
    Exemption::Electric,
    Exemption::LowEmissionPluginHybrid,
    Exemption::E85,
    Exemption::DisabledPerson,
    Exemption::RegisteredBeforeCutoff,
    Exemption::Commercial,
];

pub const WEIGHT_EXEMPTIONS: [Exemption; 3] = [
    Exemption::ElectricOrPluginHybrid,
    Exemption::DisabledPerson,
    Exemption::Commercial,
];

impl Exemption {
    pub fn applies(&self, subject: &ExemptionSubject, rates: &FiscalRates) -> bool {
        let vehicle = subject.vehicle;
        match self {
            Exemption::Electric => vehicle.is_electric,
            Exemption::LowEmissionPluginHybrid => {
                vehicle.is_hybrid_plugin && vehicle.co2_emissions < rates.low_emission_hybrid_co2
            }
            Exemption::ElectricOrPluginHybrid => vehicle.is_electric || vehicle.is_hybrid_plugin,
            Exemption::E85 => vehicle.is_e85,
            Exemption::DisabledPerson => subject.is_disabled_person,
            Exemption::RegisteredBeforeCutoff => {
                subject.first_registration_date.year() < rates.co2_exemption_year
            }
            Exemption::Commercial => vehicle.vehicle_type == VehicleType::Commercial,
        }
    }

    pub fn reason(&self, rates: &FiscalRates) -> String {
        match self {
            Exemption::Electric => "Véhicule électrique".to_string(),
            Exemption::LowEmissionPluginHybrid => {
                "Véhicule hybride rechargeable faibles émissions".to_string()
            }
            Exemption::ElectricOrPluginHybrid => {
                "Véhicule électrique ou hybride rechargeable".to_string()
            }
            Exemption::E85 => "Véhicule compatible E85".to_string(),
            Exemption::DisabledPerson => "Exemption personne en situation de handicap".to_string(),
            Exemption::RegisteredBeforeCutoff => format!(
                "Véhicule mis en circulation avant {}",
                rates.co2_exemption_year
            ),
            Exemption::Commercial => "Véhicule utilitaire".to_string(),
        }
    }
}

/// First exemption of `exemptions` that applies, in list order.
pub fn first_applicable(
    exemptions: &[Exemption],
    subject: &ExemptionSubject,
    rates: &FiscalRates,
) -> Option<Exemption> {
    exemptions
        .iter()
        .copied()
        .find(|exemption| exemption.applies(subject, rates))
}
