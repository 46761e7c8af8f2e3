//! Input checks run before a calculation. The engine itself accepts anything;
//! these checks tell the user when its output would be meaningless.

use super::rates::FiscalRates;
use super::vehicle::{ImportContext, VehicleSpec};
use crate::money::Euros;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

const MAX_CO2: Decimal = dec!(500);
const HIGH_PRICE: Euros = dec!(1000000);
const HEAVY_WEIGHT: Decimal = dec!(5000);
const OLD_VEHICLE_YEAR: i32 = 1990;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum InputError {
    #[error("Prix d'achat requis et doit être positif")]
    NonPositivePrice,
    #[error("Pays d'origine requis")]
    MissingOriginCountry,
    #[error("Pays d'origine inconnu : {code}")]
    UnknownOriginCountry { code: String },
    #[error("Département de résidence requis")]
    MissingDepartment,
    #[error("Émissions CO2 doivent être entre 0 et 500 g/km (reçu {co2})")]
    Co2OutOfRange { co2: Decimal },
    #[error("Poids du véhicule requis")]
    NonPositiveWeight,
    #[error("Puissance fiscale requise")]
    NonPositiveFiscalPower,
    #[error("Date d'immatriculation ne peut pas être dans le futur ({date})")]
    RegistrationInFuture { date: NaiveDate },
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum InputWarning {
    #[error("Prix d'achat très élevé - vérifiez la saisie")]
    VeryHighPrice,
    #[error("Poids très élevé - vérifiez qu'il s'agit d'un véhicule particulier")]
    VeryHeavy,
    #[error("Véhicule très ancien - vérifiez les règles spécifiques")]
    VeryOld,
    #[error("Véhicule électrique avec émissions CO2 > 0 - vérifiez la classification")]
    ElectricWithEmissions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<InputError>,
    pub warnings: Vec<InputWarning>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

pub fn validate_input(
    vehicle: &VehicleSpec,
    context: &ImportContext,
    as_of: NaiveDate,
    rates: &FiscalRates,
) -> ValidationReport {
    let mut report = ValidationReport::default();
    let errors = &mut report.errors;
    let warnings = &mut report.warnings;

    if context.purchase_price <= Decimal::ZERO {
        errors.push(InputError::NonPositivePrice);
    }
    if context.purchase_price > HIGH_PRICE {
        warnings.push(InputWarning::VeryHighPrice);
    }

    let country = context.origin_country.trim();
    if country.is_empty() {
        errors.push(InputError::MissingOriginCountry);
    } else if rates.country(country).is_none() {
        errors.push(InputError::UnknownOriginCountry {
            code: country.to_string(),
        });
    }

    if context.department.trim().is_empty() {
        errors.push(InputError::MissingDepartment);
    }

    if vehicle.co2_emissions < Decimal::ZERO || vehicle.co2_emissions > MAX_CO2 {
        errors.push(InputError::Co2OutOfRange {
            co2: vehicle.co2_emissions,
        });
    }
    if vehicle.weight <= Decimal::ZERO {
        errors.push(InputError::NonPositiveWeight);
    }
    if vehicle.weight > HEAVY_WEIGHT {
        warnings.push(InputWarning::VeryHeavy);
    }
    if vehicle.fiscal_power == 0 {
        errors.push(InputError::NonPositiveFiscalPower);
    }

    if context.first_registration_date > as_of {
        errors.push(InputError::RegistrationInFuture {
            date: context.first_registration_date,
        });
    }
    if context.registration_year() < OLD_VEHICLE_YEAR {
        warnings.push(InputWarning::VeryOld);
    }

    if vehicle.is_electric && vehicle.co2_emissions > Decimal::ZERO {
        warnings.push(InputWarning::ElectricWithEmissions);
    }

    log::debug!(
        "Validation: {} error(s), {} warning(s)",
        report.errors.len(),
        report.warnings.len()
    );
    report
}
