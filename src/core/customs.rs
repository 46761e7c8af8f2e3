use super::rates::FiscalRates;
use super::vehicle::VehicleType;
use crate::money::{round_eur, Euros, Rate};
use rust_decimal::Decimal;

pub fn customs_rate(vehicle_type: VehicleType, rates: &FiscalRates) -> Rate {
    match vehicle_type {
        VehicleType::Passenger => rates.customs.passenger_cars,
        VehicleType::Motorcycle => rates.customs.motorcycles,
        VehicleType::Commercial => rates.customs.commercial_vehicles,
    }
}

/// Import duty on the purchase price. Nothing is owed inside the EU customs union.
pub fn customs_duty(
    purchase_price: Euros,
    is_eu_origin: bool,
    vehicle_type: VehicleType,
    rates: &FiscalRates,
) -> Euros {
    if is_eu_origin {
        return Decimal::ZERO;
    }
    round_eur(purchase_price * customs_rate(vehicle_type, rates))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn japanese_car() {
        let duty = customs_duty(dec!(30000), false, VehicleType::Passenger, FiscalRates::y2025());
        assert_eq!(duty, dec!(3000));
    }

    #[test]
    fn eu_origin_owes_nothing() {
        let duty = customs_duty(dec!(30000), true, VehicleType::Commercial, FiscalRates::y2025());
        assert_eq!(duty, dec!(0));
    }

    #[test]
    fn rate_depends_on_vehicle_type() {
        let rates = FiscalRates::y2025();
        assert_eq!(
            customs_duty(dec!(10000), false, VehicleType::Motorcycle, rates),
            dec!(600)
        );
        assert_eq!(
            customs_duty(dec!(10000), false, VehicleType::Commercial, rates),
            dec!(2200)
        );
    }

    #[test]
    fn duty_is_rounded_to_the_euro() {
        let duty = customs_duty(dec!(12345), false, VehicleType::Passenger, FiscalRates::y2025());
        // 1234.5 rounds away from zero
        assert_eq!(duty, dec!(1235));
    }
}
