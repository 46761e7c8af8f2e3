use super::rates::FiscalRates;
use super::vehicle::VehicleAge;
use crate::money::{round_eur, Euros, Rate};
use rust_decimal::Decimal;
use serde::Serialize;

/// Outcome of a malus rule. Shared by the CO2 and weight malus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalusResult {
    pub base_malus: Euros,
    pub discount_rate: Rate,
    pub discount_amount: Euros,
    pub final_malus: Euros,
    pub is_exempt: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exemption_reason: Option<String>,
    pub age_in_months: u32,
}

impl MalusResult {
    pub fn exempt(reason: String, age_in_months: u32) -> Self {
        MalusResult {
            exemption_reason: Some(reason),
            is_exempt: true,
            ..Self::zero(age_in_months)
        }
    }

    /// Nothing owed and not exempt (below the malus threshold).
    pub fn zero(age_in_months: u32) -> Self {
        MalusResult {
            base_malus: Decimal::ZERO,
            discount_rate: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            final_malus: Decimal::ZERO,
            is_exempt: false,
            exemption_reason: None,
            age_in_months,
        }
    }

    /// Applies the shared age discount schedule to a base malus.
    pub fn discounted(base_malus: Euros, age_in_months: u32, rates: &FiscalRates) -> Self {
        let discount_rate = rates.discount_rate(age_in_months);
        let discount = base_malus * discount_rate;
        MalusResult {
            base_malus,
            discount_rate,
            discount_amount: round_eur(discount),
            final_malus: round_eur(base_malus - discount).max(Decimal::ZERO),
            is_exempt: false,
            exemption_reason: None,
            age_in_months,
        }
    }

    pub fn age(&self) -> VehicleAge {
        VehicleAge::from_months(self.age_in_months)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn discount_follows_age() {
        let rates = FiscalRates::y2025();
        let new = MalusResult::discounted(dec!(9200), 0, rates);
        assert_eq!(new.discount_rate, dec!(0));
        assert_eq!(new.final_malus, dec!(9200));

        let used = MalusResult::discounted(dec!(9200), 18, rates);
        assert_eq!(used.discount_rate, dec!(0.20));
        assert_eq!(used.discount_amount, dec!(1840));
        assert_eq!(used.final_malus, dec!(7360));
    }

    #[test]
    fn final_is_rounded_to_the_euro() {
        let rates = FiscalRates::y2025();
        // 75 * 0.9 = 67.5
        let r = MalusResult::discounted(dec!(75), 6, rates);
        assert_eq!(r.final_malus, dec!(68));
        assert_eq!(r.discount_amount, dec!(8));
    }

    #[test]
    fn exempt_result_owes_nothing() {
        let r = MalusResult::exempt("Véhicule électrique".to_string(), 14);
        assert!(r.is_exempt);
        assert_eq!(r.final_malus, dec!(0));
        assert_eq!(r.discount_rate, dec!(0));
        assert_eq!(r.age_in_months, 14);
    }
}
