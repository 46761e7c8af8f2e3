use super::exemptions::{first_applicable, ExemptionSubject, WEIGHT_EXEMPTIONS};
use super::malus::MalusResult;
use super::rates::FiscalRates;
use super::vehicle::{age_in_months, VehicleSpec};
use crate::money::{round_eur, Euros};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Weight malus outcome: the shared malus shape plus how the base was derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeightMalusResult {
    #[serde(flatten)]
    pub malus: MalusResult,
    /// Kilograms above the threshold, 0 when nothing is owed
    pub excess_weight: Decimal,
    /// Per-kg rate of the tier reached, 0 when nothing is owed
    pub applicable_rate: Euros,
}

impl WeightMalusResult {
    fn without_base(malus: MalusResult) -> Self {
        WeightMalusResult {
            malus,
            excess_weight: Decimal::ZERO,
            applicable_rate: Decimal::ZERO,
        }
    }

    pub fn final_malus(&self) -> Euros {
        self.malus.final_malus
    }
}

/// Base weight malus: the whole excess over the threshold is billed at the
/// rate of the tier the total weight falls in. Returns `(base, excess, rate)`.
pub fn base_weight_malus(weight: Decimal, rates: &FiscalRates) -> (Euros, Decimal, Euros) {
    match rates.weight_tier(weight) {
        None => (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
        Some(tier) => {
            let excess = weight - rates.weight_threshold;
            (round_eur(excess * tier.rate_per_kg), excess, tier.rate_per_kg)
        }
    }
}

pub fn calculate_weight_malus(
    vehicle: &VehicleSpec,
    first_registration_date: NaiveDate,
    is_disabled_person: bool,
    as_of: NaiveDate,
    rates: &FiscalRates,
) -> WeightMalusResult {
    let age = age_in_months(first_registration_date, as_of);

    let subject = ExemptionSubject {
        vehicle,
        first_registration_date,
        is_disabled_person,
    };
    if let Some(exemption) = first_applicable(&WEIGHT_EXEMPTIONS, &subject, rates) {
        log::debug!("Weight malus exempt: {:?}", exemption);
        return WeightMalusResult::without_base(MalusResult::exempt(exemption.reason(rates), age));
    }

    let (base, excess, rate) = base_weight_malus(vehicle.weight, rates);
    if base.is_zero() {
        log::debug!(
            "Weight malus: {} kg not above {} kg threshold",
            vehicle.weight,
            rates.weight_threshold
        );
        return WeightMalusResult::without_base(MalusResult::zero(age));
    }

    let malus = MalusResult::discounted(base, age, rates);
    log::debug!(
        "Weight malus: {} kg -> excess={} x {}/kg = {}, age={}m, discount={}, final={}",
        vehicle.weight,
        excess,
        rate,
        base,
        age,
        malus.discount_rate,
        malus.final_malus
    );
    WeightMalusResult {
        malus,
        excess_weight: excess,
        applicable_rate: rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vehicle::VehicleType;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn car(weight: Decimal) -> VehicleSpec {
        VehicleSpec {
            co2_emissions: dec!(180),
            weight,
            fuel_type: "Diesel".to_string(),
            fiscal_power: 14,
            is_electric: false,
            is_hybrid_plugin: false,
            is_e85: false,
            vehicle_type: VehicleType::Passenger,
        }
    }

    fn calc(vehicle: &VehicleSpec, registered: NaiveDate) -> WeightMalusResult {
        calculate_weight_malus(vehicle, registered, false, date(2025, 6, 1), FiscalRates::y2025())
    }

    #[test]
    fn heavy_suv_new() {
        let result = calc(&car(dec!(2145)), date(2025, 6, 1));
        // 545 kg x 30 EUR
        assert_eq!(result.excess_weight, dec!(545));
        assert_eq!(result.applicable_rate, dec!(30));
        assert_eq!(result.malus.base_malus, dec!(16350));
        assert_eq!(result.malus.discount_rate, dec!(0));
        assert_eq!(result.final_malus(), dec!(16350));
    }

    #[test]
    fn whole_excess_billed_at_tier_rate() {
        let result = calc(&car(dec!(1750)), date(2025, 6, 1));
        // 150 kg, all of it at the 1700-1799 rate
        assert_eq!(result.malus.base_malus, dec!(2250));
    }

    #[test]
    fn below_and_at_threshold_owe_nothing() {
        let light = calc(&car(dec!(1450)), date(2025, 6, 1));
        assert_eq!(light.final_malus(), dec!(0));
        assert!(!light.malus.is_exempt);

        let at = calc(&car(dec!(1600)), date(2025, 6, 1));
        assert_eq!(at.malus.base_malus, dec!(0));
        assert_eq!(at.final_malus(), dec!(0));
    }

    #[test]
    fn uses_shared_discount_schedule() {
        // 2023-07-01 -> 2025-06-01 is 23 months, 20% bracket
        let result = calc(&car(dec!(2145)), date(2023, 7, 1));
        assert_eq!(result.malus.discount_rate, dec!(0.20));
        assert_eq!(result.final_malus(), dec!(13080));
    }

    #[test]
    fn plugin_hybrid_is_exempt() {
        let vehicle = VehicleSpec {
            is_hybrid_plugin: true,
            ..car(dec!(2000))
        };
        let result = calc(&vehicle, date(2025, 6, 1));
        assert!(result.malus.is_exempt);
        assert_eq!(result.final_malus(), dec!(0));
        assert_eq!(
            result.malus.exemption_reason.as_deref(),
            Some("Véhicule électrique ou hybride rechargeable")
        );
    }

    #[test]
    fn registration_year_does_not_exempt_weight() {
        let result = calc(&car(dec!(1800)), date(2012, 1, 1));
        assert!(!result.malus.is_exempt);
        assert_eq!(result.malus.base_malus, dec!(4000));
        assert_eq!(result.final_malus(), dec!(1200));
    }
}
