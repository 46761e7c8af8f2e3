use crate::money::Euros;
use chrono::{Datelike, NaiveDate};
use importc_derive::InputFields;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Average month length used to turn a day count into an age in months.
const DAYS_PER_MONTH: Decimal = dec!(30.44);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    #[default]
    Passenger,
    Commercial,
    Motorcycle,
}

impl VehicleType {
    pub fn display(&self) -> &'static str {
        match self {
            VehicleType::Passenger => "Véhicule particulier",
            VehicleType::Commercial => "Véhicule utilitaire",
            VehicleType::Motorcycle => "Moto",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BuyerType {
    #[default]
    Private,
    Professional,
}

/// Technical characteristics of the imported vehicle, as found in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, InputFields)]
pub struct VehicleSpec {
    /// WLTP CO2 emissions in g/km
    #[schemars(with = "f64")]
    pub co2_emissions: Decimal,
    /// Curb weight in kg
    #[schemars(with = "f64")]
    pub weight: Decimal,
    /// Fuel type label (Essence, Diesel, Électrique, ...)
    pub fuel_type: String,
    /// Administrative horsepower (CV)
    pub fiscal_power: u32,
    /// 100% electric vehicle
    #[serde(default)]
    pub is_electric: bool,
    /// Plug-in hybrid vehicle
    #[serde(default)]
    pub is_hybrid_plugin: bool,
    /// Superethanol E85 compatible vehicle
    #[serde(default)]
    pub is_e85: bool,
    /// passenger, commercial or motorcycle
    #[serde(default)]
    pub vehicle_type: VehicleType,
}

/// Purchase and registration circumstances of one import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, InputFields)]
pub struct ImportContext {
    /// Purchase price in euros
    #[schemars(with = "f64")]
    pub purchase_price: Euros,
    /// ISO code of the country the vehicle is bought in (DE, BE, JP, ...)
    pub origin_country: String,
    /// Date of first registration (YYYY-MM-DD)
    pub first_registration_date: NaiveDate,
    /// Seller is a professional dealer
    pub is_professional_seller: bool,
    /// private or professional
    #[serde(default)]
    pub buyer_type: BuyerType,
    /// French department of registration (75, 13, 2A, ...)
    pub department: String,
    /// Buyer holds a disability card (malus exemption)
    #[serde(default)]
    pub is_disabled_person: bool,
    /// Expedited DREAL processing
    #[serde(default)]
    pub expedited_dreal: bool,
    /// Purchase price already includes VAT
    #[serde(default)]
    pub has_vat_included: bool,
    /// Additional technical control requested at the DREAL
    #[serde(default)]
    pub needs_technical_control: bool,
    /// Additional conformity certificate requested at the DREAL
    #[serde(default)]
    pub needs_conformity_certificate: bool,
}

/// Input document read by the CLI
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ImportInput {
    pub vehicle: VehicleSpec,
    pub context: ImportContext,
}

/// Whole months elapsed between first registration and `as_of`, counted in
/// 30.44-day months. Registration dates after `as_of` count as age 0.
pub fn age_in_months(first_registration_date: NaiveDate, as_of: NaiveDate) -> u32 {
    let days = (as_of - first_registration_date).num_days();
    if days <= 0 {
        return 0;
    }
    (Decimal::from(days) / DAYS_PER_MONTH)
        .floor()
        .to_u32()
        .unwrap_or(u32::MAX)
}

/// Vehicle age split into whole years and remaining months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VehicleAge {
    pub years: u32,
    pub months: u32,
    pub total_months: u32,
}

impl VehicleAge {
    pub fn from_months(total_months: u32) -> Self {
        VehicleAge {
            years: total_months / 12,
            months: total_months % 12,
            total_months,
        }
    }
}

impl std::fmt::Display for VehicleAge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}a {}m", self.years, self.months)
    }
}

impl ImportContext {
    pub fn age_in_months(&self, as_of: NaiveDate) -> u32 {
        age_in_months(self.first_registration_date, as_of)
    }

    pub fn registration_year(&self) -> i32 {
        self.first_registration_date.year()
    }
}
