//! Fiscal reference tables.
//!
//! Every rule takes a `&FiscalRates` so a whole fiscal year can be swapped at
//! once. [`RATES_2025`] holds the rates in force for 2025 registrations.

use super::countries::{CountryEntry, COUNTRIES};
use super::regions::{Region, DEPARTMENT_REGIONS};
use crate::money::{Euros, Rate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Flat CO2 malus amount owed from `threshold` g/km upwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Co2Bracket {
    pub threshold: u32,
    pub amount: Euros,
}

/// Age discount applied to both maluses, over `[months_min, months_max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountBracket {
    pub months_min: u32,
    /// `None` for the open-ended last bracket
    pub months_max: Option<u32>,
    pub rate: Rate,
}

impl DiscountBracket {
    pub fn contains(&self, months: u32) -> bool {
        months >= self.months_min && self.months_max.map_or(true, |max| months < max)
    }
}

/// Weight malus tier, selected by total vehicle weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightTier {
    pub weight_min: Decimal,
    /// Inclusive upper bound, `None` for the last tier
    pub weight_max: Option<Decimal>,
    pub rate_per_kg: Euros,
}

/// Registration pollution tax band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollutionBand {
    /// Upper CO2 limit of the band, `None` for the last band
    pub limit: Option<Decimal>,
    /// Whether emissions equal to `limit` belong to this band
    pub inclusive: bool,
    pub amount: Euros,
}

impl PollutionBand {
    fn contains(&self, co2: Decimal) -> bool {
        match self.limit {
            None => true,
            Some(limit) if self.inclusive => co2 <= limit,
            Some(limit) => co2 < limit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionalRate {
    pub region: Region,
    pub rate_per_cv: Euros,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VatRates {
    pub standard: Rate,
    pub reduced: Rate,
    pub corsica: Rate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomsRates {
    pub passenger_cars: Rate,
    pub motorcycles: Rate,
    pub commercial_vehicles: Rate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrealRates {
    pub base_fee: Euros,
    pub expedited: Euros,
    pub technical_control: Euros,
    pub conformity_certificate: Euros,
}

#[derive(Debug, Clone, Copy)]
pub struct RegistrationRates {
    pub base_administrative_fee: Euros,
    pub delivery_fee: Euros,
    /// National average, used for departments without a mapped region
    pub default_rate_per_cv: Euros,
    pub regional_rates: &'static [RegionalRate],
    pub departments: &'static [(&'static str, Region)],
    pub pollution_bands: &'static [PollutionBand],
}

/// One fiscal year of reference data.
#[derive(Debug, Clone, Copy)]
pub struct FiscalRates {
    pub year: i32,
    /// Rounded emissions below this owe no CO2 malus
    pub co2_malus_start: u32,
    pub co2_brackets: &'static [Co2Bracket],
    /// Shared by the CO2 and weight malus
    pub discount_schedule: &'static [DiscountBracket],
    pub weight_threshold: Decimal,
    pub weight_tiers: &'static [WeightTier],
    pub combined_malus_cap: Euros,
    /// Vehicles first registered before this year are exempt from CO2 malus
    pub co2_exemption_year: i32,
    /// Plug-in hybrids strictly below this CO2 figure are exempt from CO2 malus
    pub low_emission_hybrid_co2: Decimal,
    /// Vehicles younger than this are treated as new for VAT
    pub new_vehicle_months: u32,
    pub vat: VatRates,
    pub customs: CustomsRates,
    pub dreal: DrealRates,
    pub registration: RegistrationRates,
    pub countries: &'static [CountryEntry],
}

impl FiscalRates {
    pub fn y2025() -> &'static FiscalRates {
        &RATES_2025
    }

    /// Flat amount of the highest bracket reached, 0 below the first bracket.
    pub fn co2_bracket_amount(&self, rounded_co2: u32) -> Euros {
        self.co2_brackets
            .iter()
            .rev()
            .find(|b| rounded_co2 >= b.threshold)
            .map_or(Decimal::ZERO, |b| b.amount)
    }

    /// Age discount for a vehicle of `age_in_months`. Falls back to the last
    /// bracket's rate so the lookup is total.
    pub fn discount_rate(&self, age_in_months: u32) -> Rate {
        self.discount_schedule
            .iter()
            .find(|b| b.contains(age_in_months))
            .or_else(|| self.discount_schedule.last())
            .map_or(Decimal::ZERO, |b| b.rate)
    }

    /// Tier for a weight at or above the threshold, `None` below it.
    pub fn weight_tier(&self, weight: Decimal) -> Option<&WeightTier> {
        if weight < self.weight_threshold {
            return None;
        }
        self.weight_tiers
            .iter()
            .rev()
            .find(|t| weight >= t.weight_min)
            .or_else(|| self.weight_tiers.first())
    }

    pub fn region_for(&self, department: &str) -> Option<Region> {
        let department = department.trim();
        self.registration
            .departments
            .iter()
            .find(|(code, _)| code.eq_ignore_ascii_case(department))
            .map(|(_, region)| *region)
    }

    /// Per-CV regional tax, national average when the region is unknown.
    pub fn regional_rate(&self, region: Option<Region>) -> Euros {
        region
            .and_then(|r| {
                self.registration
                    .regional_rates
                    .iter()
                    .find(|rr| rr.region == r)
            })
            .map_or(self.registration.default_rate_per_cv, |rr| rr.rate_per_cv)
    }

    pub fn pollution_tax(&self, co2: Decimal) -> Euros {
        self.registration
            .pollution_bands
            .iter()
            .find(|band| band.contains(co2))
            .map_or(Decimal::ZERO, |band| band.amount)
    }

    pub fn country(&self, code: &str) -> Option<&CountryEntry> {
        let code = code.trim();
        self.countries
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
    }
}

const fn co2(threshold: u32, amount: Euros) -> Co2Bracket {
    Co2Bracket { threshold, amount }
}

static CO2_BRACKETS_2025: [Co2Bracket; 55] = [
    co2(113, dec!(50)),
    co2(114, dec!(75)),
    co2(115, dec!(100)),
    co2(116, dec!(125)),
    co2(117, dec!(150)),
    co2(118, dec!(170)),
    co2(119, dec!(190)),
    co2(120, dec!(210)),
    co2(121, dec!(240)),
    co2(122, dec!(270)),
    co2(123, dec!(310)),
    co2(124, dec!(350)),
    co2(125, dec!(400)),
    co2(126, dec!(450)),
    co2(127, dec!(540)),
    co2(128, dec!(630)),
    co2(129, dec!(740)),
    co2(130, dec!(850)),
    co2(131, dec!(980)),
    co2(132, dec!(1100)),
    co2(133, dec!(1320)),
    co2(134, dec!(1500)),
    co2(135, dec!(1700)),
    co2(136, dec!(1900)),
    co2(137, dec!(2100)),
    co2(138, dec!(2300)),
    co2(139, dec!(2600)),
    co2(140, dec!(2900)),
    co2(141, dec!(3200)),
    co2(142, dec!(3500)),
    co2(143, dec!(3800)),
    co2(144, dec!(4100)),
    co2(145, dec!(4500)),
    co2(146, dec!(4900)),
    co2(147, dec!(5300)),
    co2(148, dec!(5700)),
    co2(149, dec!(6200)),
    co2(150, dec!(6700)),
    co2(151, dec!(7200)),
    co2(152, dec!(7700)),
    co2(153, dec!(8200)),
    co2(154, dec!(8700)),
    co2(155, dec!(9200)),
    co2(156, dec!(9700)),
    co2(157, dec!(10300)),
    co2(158, dec!(10900)),
    co2(159, dec!(11500)),
    co2(160, dec!(12100)),
    co2(170, dec!(16900)),
    co2(180, dec!(22800)),
    co2(190, dec!(29700)),
    co2(200, dec!(37600)),
    co2(210, dec!(46500)),
    co2(220, dec!(56400)),
    // 225 g/km and above: statutory maximum
    co2(225, dec!(70000)),
];

static DISCOUNT_SCHEDULE_2025: [DiscountBracket; 8] = [
    DiscountBracket { months_min: 0, months_max: Some(6), rate: dec!(0) },
    DiscountBracket { months_min: 6, months_max: Some(12), rate: dec!(0.10) },
    DiscountBracket { months_min: 12, months_max: Some(24), rate: dec!(0.20) },
    DiscountBracket { months_min: 24, months_max: Some(36), rate: dec!(0.30) },
    DiscountBracket { months_min: 36, months_max: Some(48), rate: dec!(0.40) },
    DiscountBracket { months_min: 48, months_max: Some(60), rate: dec!(0.50) },
    DiscountBracket { months_min: 60, months_max: Some(120), rate: dec!(0.60) },
    DiscountBracket { months_min: 120, months_max: None, rate: dec!(0.70) },
];

static WEIGHT_TIERS_2025: [WeightTier; 5] = [
    WeightTier { weight_min: dec!(1600), weight_max: Some(dec!(1699)), rate_per_kg: dec!(10) },
    WeightTier { weight_min: dec!(1700), weight_max: Some(dec!(1799)), rate_per_kg: dec!(15) },
    WeightTier { weight_min: dec!(1800), weight_max: Some(dec!(1899)), rate_per_kg: dec!(20) },
    WeightTier { weight_min: dec!(1900), weight_max: Some(dec!(1999)), rate_per_kg: dec!(25) },
    WeightTier { weight_min: dec!(2000), weight_max: None, rate_per_kg: dec!(30) },
];

static REGIONAL_RATES_2025: [RegionalRate; 13] = [
    RegionalRate { region: Region::IleDeFrance, rate_per_cv: dec!(59.20) },
    RegionalRate { region: Region::ProvenceAlpesCoteAzur, rate_per_cv: dec!(51.20) },
    RegionalRate { region: Region::AuvergneRhoneAlpes, rate_per_cv: dec!(43.00) },
    RegionalRate { region: Region::NouvelleAquitaine, rate_per_cv: dec!(41.00) },
    RegionalRate { region: Region::Occitanie, rate_per_cv: dec!(44.00) },
    RegionalRate { region: Region::HautsDeFrance, rate_per_cv: dec!(34.00) },
    RegionalRate { region: Region::GrandEst, rate_per_cv: dec!(44.00) },
    RegionalRate { region: Region::Normandie, rate_per_cv: dec!(33.00) },
    RegionalRate { region: Region::BourgogneFrancheComte, rate_per_cv: dec!(51.20) },
    RegionalRate { region: Region::Bretagne, rate_per_cv: dec!(51.20) },
    RegionalRate { region: Region::CentreValDeLoire, rate_per_cv: dec!(46.15) },
    RegionalRate { region: Region::PaysDeLaLoire, rate_per_cv: dec!(51.20) },
    RegionalRate { region: Region::Corse, rate_per_cv: dec!(27.00) },
];

static POLLUTION_BANDS_2025: [PollutionBand; 8] = [
    PollutionBand { limit: Some(dec!(110)), inclusive: false, amount: dec!(0) },
    PollutionBand { limit: Some(dec!(120)), inclusive: true, amount: dec!(50) },
    PollutionBand { limit: Some(dec!(140)), inclusive: true, amount: dec!(75) },
    PollutionBand { limit: Some(dec!(155)), inclusive: true, amount: dec!(105) },
    PollutionBand { limit: Some(dec!(175)), inclusive: true, amount: dec!(125) },
    PollutionBand { limit: Some(dec!(200)), inclusive: true, amount: dec!(160) },
    PollutionBand { limit: Some(dec!(250)), inclusive: true, amount: dec!(372) },
    PollutionBand { limit: None, inclusive: true, amount: dec!(500) },
];

pub static RATES_2025: FiscalRates = FiscalRates {
    year: 2025,
    co2_malus_start: 113,
    co2_brackets: &CO2_BRACKETS_2025,
    discount_schedule: &DISCOUNT_SCHEDULE_2025,
    weight_threshold: dec!(1600),
    weight_tiers: &WEIGHT_TIERS_2025,
    combined_malus_cap: dec!(70000),
    co2_exemption_year: 2015,
    low_emission_hybrid_co2: dec!(50),
    new_vehicle_months: 6,
    vat: VatRates {
        standard: dec!(0.20),
        reduced: dec!(0.055),
        corsica: dec!(0.13),
    },
    customs: CustomsRates {
        passenger_cars: dec!(0.10),
        motorcycles: dec!(0.06),
        commercial_vehicles: dec!(0.22),
    },
    dreal: DrealRates {
        base_fee: dec!(86.90),
        expedited: dec!(150.00),
        technical_control: dec!(45.00),
        conformity_certificate: dec!(25.00),
    },
    registration: RegistrationRates {
        base_administrative_fee: dec!(11.00),
        delivery_fee: dec!(2.76),
        default_rate_per_cv: dec!(46.15),
        regional_rates: &REGIONAL_RATES_2025,
        departments: &DEPARTMENT_REGIONS,
        pollution_bands: &POLLUTION_BANDS_2025,
    },
    countries: &COUNTRIES,
};
