use super::exemptions::{first_applicable, ExemptionSubject, CO2_EXEMPTIONS};
use super::malus::MalusResult;
use super::rates::FiscalRates;
use super::vehicle::{age_in_months, VehicleSpec};
use crate::money::Euros;
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Emissions rounded up to the whole gram, as the CO2 scale requires.
pub fn rounded_emissions(co2_emissions: Decimal) -> u32 {
    co2_emissions
        .max(Decimal::ZERO)
        .ceil()
        .to_u32()
        .unwrap_or(u32::MAX)
}

/// Base CO2 malus before any age discount.
pub fn base_co2_malus(co2_emissions: Decimal, rates: &FiscalRates) -> Euros {
    let rounded = rounded_emissions(co2_emissions);
    if rounded < rates.co2_malus_start {
        return Decimal::ZERO;
    }
    rates.co2_bracket_amount(rounded)
}

/// CO2 malus for a vehicle first registered on `first_registration_date`,
/// evaluated on `as_of`.
pub fn calculate_co2_malus(
    vehicle: &VehicleSpec,
    first_registration_date: NaiveDate,
    is_disabled_person: bool,
    as_of: NaiveDate,
    rates: &FiscalRates,
) -> MalusResult {
    let age = age_in_months(first_registration_date, as_of);

    let subject = ExemptionSubject {
        vehicle,
        first_registration_date,
        is_disabled_person,
    };
    if let Some(exemption) = first_applicable(&CO2_EXEMPTIONS, &subject, rates) {
        log::debug!("CO2 malus exempt: {:?}", exemption);
        return MalusResult::exempt(exemption.reason(rates), age);
    }

    let base = base_co2_malus(vehicle.co2_emissions, rates);
    if base.is_zero() {
        log::debug!(
            "CO2 malus: {} g/km below {} g/km threshold",
            vehicle.co2_emissions,
            rates.co2_malus_start
        );
        return MalusResult::zero(age);
    }

    let result = MalusResult::discounted(base, age, rates);
    log::debug!(
        "CO2 malus: {} g/km -> base={}, age={}m, discount={}, final={}",
        rounded_emissions(vehicle.co2_emissions),
        result.base_malus,
        age,
        result.discount_rate,
        result.final_malus
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vehicle::VehicleType;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn car(co2: Decimal) -> VehicleSpec {
        VehicleSpec {
            co2_emissions: co2,
            weight: dec!(1520),
            fuel_type: "Essence".to_string(),
            fiscal_power: 9,
            is_electric: false,
            is_hybrid_plugin: false,
            is_e85: false,
            vehicle_type: VehicleType::Passenger,
        }
    }

    fn calc(vehicle: &VehicleSpec, registered: NaiveDate, as_of: NaiveDate) -> MalusResult {
        calculate_co2_malus(vehicle, registered, false, as_of, FiscalRates::y2025())
    }

    #[test]
    fn new_155_g_km() {
        let as_of = date(2025, 6, 1);
        let result = calc(&car(dec!(155)), as_of, as_of);
        assert_eq!(result.base_malus, dec!(9200));
        assert_eq!(result.discount_rate, dec!(0));
        assert_eq!(result.final_malus, dec!(9200));
        assert!(!result.is_exempt);
        assert_eq!(result.age_in_months, 0);
    }

    #[test]
    fn used_155_g_km_in_20_percent_bracket() {
        // 2023-07-01 -> 2025-06-01 is 701 days, 23 months
        let result = calc(&car(dec!(155)), date(2023, 7, 1), date(2025, 6, 1));
        assert_eq!(result.age_in_months, 23);
        assert_eq!(result.base_malus, dec!(9200));
        assert_eq!(result.discount_rate, dec!(0.20));
        assert_eq!(result.discount_amount, dec!(1840));
        assert_eq!(result.final_malus, dec!(7360));
    }

    #[test]
    fn threshold_boundary() {
        let as_of = date(2025, 6, 1);
        assert_eq!(calc(&car(dec!(113)), as_of, as_of).base_malus, dec!(50));
        // Emissions are rounded up before the lookup
        assert_eq!(calc(&car(dec!(112.4)), as_of, as_of).base_malus, dec!(50));
        assert_eq!(calc(&car(dec!(112.0)), as_of, as_of).base_malus, dec!(0));
        let below = calc(&car(dec!(100)), as_of, as_of);
        assert_eq!(below.final_malus, dec!(0));
        assert!(!below.is_exempt);
    }

    #[test]
    fn scale_tops_out_at_70000() {
        let as_of = date(2025, 6, 1);
        assert_eq!(calc(&car(dec!(225)), as_of, as_of).final_malus, dec!(70000));
        assert_eq!(calc(&car(dec!(310)), as_of, as_of).final_malus, dec!(70000));
    }

    #[test]
    fn electric_is_exempt_whatever_the_emissions() {
        let as_of = date(2025, 6, 1);
        let vehicle = VehicleSpec {
            is_electric: true,
            ..car(dec!(300))
        };
        let result = calc(&vehicle, date(2024, 1, 1), as_of);
        assert!(result.is_exempt);
        assert_eq!(result.final_malus, dec!(0));
        assert_eq!(result.exemption_reason.as_deref(), Some("Véhicule électrique"));
    }

    #[test]
    fn registered_before_2015_is_exempt() {
        let result = calc(&car(dec!(180)), date(2014, 6, 1), date(2025, 6, 1));
        assert!(result.is_exempt);
        assert_eq!(
            result.exemption_reason.as_deref(),
            Some("Véhicule mis en circulation avant 2015")
        );
    }

    #[test]
    fn disabled_person_is_exempt() {
        let as_of = date(2025, 6, 1);
        let result = calculate_co2_malus(
            &car(dec!(180)),
            as_of,
            true,
            as_of,
            FiscalRates::y2025(),
        );
        assert!(result.is_exempt);
        assert_eq!(
            result.exemption_reason.as_deref(),
            Some("Exemption personne en situation de handicap")
        );
    }

    #[test]
    fn ten_year_old_vehicle_gets_maximum_discount() {
        let result = calc(&car(dec!(180)), date(2015, 1, 1), date(2025, 6, 1));
        assert_eq!(result.discount_rate, dec!(0.70));
        assert_eq!(result.final_malus, dec!(6840));
    }
}
