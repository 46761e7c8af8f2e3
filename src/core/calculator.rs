//! Aggregate import cost calculation.

use super::co2::calculate_co2_malus;
use super::customs::customs_duty;
use super::fees::{
    calculate_dreal_fees, calculate_registration_fees, DrealFees, DrealRequest, RegistrationFees,
};
use super::malus::MalusResult;
use super::rates::FiscalRates;
use super::vat::{calculate_vat, VatInput, VatResult};
use super::vehicle::{ImportContext, VehicleSpec};
use super::warnings::Warning;
use super::weight::{calculate_weight_malus, WeightMalusResult};
use crate::money::{round_eur, Euros};
use chrono::NaiveDate;
use serde::Serialize;

/// Full cost breakdown of one import.
///
/// `co2_malus` and `weight_malus` hold the rule results untouched; when the
/// combined malus cap applies, the amounts actually owed are in
/// `capped_co2_malus` and `capped_weight_malus`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculationBreakdown {
    pub as_of: NaiveDate,
    pub purchase_price: Euros,
    pub is_new_vehicle: bool,
    pub is_eu_origin: bool,
    pub vat: VatResult,
    pub co2_malus: MalusResult,
    pub weight_malus: WeightMalusResult,
    pub combined_malus_before_cap: Euros,
    pub combined_malus_after_cap: Euros,
    pub capped_co2_malus: Euros,
    pub capped_weight_malus: Euros,
    pub customs_duty: Euros,
    pub dreal_fees: Euros,
    pub dreal: DrealFees,
    pub registration_fees: Euros,
    pub registration: RegistrationFees,
    pub total_taxes: Euros,
    pub total_fees: Euros,
    pub total_cost: Euros,
    pub warnings: Vec<Warning>,
}

impl CalculationBreakdown {
    pub fn is_malus_capped(&self) -> bool {
        self.combined_malus_before_cap > self.combined_malus_after_cap
    }
}

/// Calculate import costs with the 2025 rates.
pub fn calculate_import_costs(
    vehicle: &VehicleSpec,
    context: &ImportContext,
    as_of: NaiveDate,
) -> CalculationBreakdown {
    calculate_import_costs_with(FiscalRates::y2025(), vehicle, context, as_of)
}

pub fn calculate_import_costs_with(
    rates: &FiscalRates,
    vehicle: &VehicleSpec,
    context: &ImportContext,
    as_of: NaiveDate,
) -> CalculationBreakdown {
    let mut warnings = Vec::new();

    if context.first_registration_date > as_of {
        warnings.push(Warning::RegistrationAfterCalculationDate);
    }
    let age = context.age_in_months(as_of);
    let is_new_vehicle = age < rates.new_vehicle_months;

    let origin = rates.country(&context.origin_country);
    if origin.is_none() {
        log::debug!("Unknown origin country '{}'", context.origin_country);
        warnings.push(Warning::UnknownOriginCountry {
            code: context.origin_country.clone(),
        });
    }
    let is_eu_origin = origin.is_some_and(|c| c.is_eu);

    let mut vat = calculate_vat(
        &VatInput {
            purchase_price: context.purchase_price,
            origin,
            is_new_vehicle,
            is_professional_seller: context.is_professional_seller,
            buyer_type: context.buyer_type,
            department: &context.department,
            has_vat_included: context.has_vat_included,
        },
        rates,
    );
    warnings.append(&mut vat.warnings);

    let co2_malus = calculate_co2_malus(
        vehicle,
        context.first_registration_date,
        context.is_disabled_person,
        as_of,
        rates,
    );
    let weight_malus = calculate_weight_malus(
        vehicle,
        context.first_registration_date,
        context.is_disabled_person,
        as_of,
        rates,
    );

    let cap = apply_malus_cap(
        co2_malus.final_malus,
        weight_malus.final_malus(),
        rates.combined_malus_cap,
    );
    if cap.before > cap.after {
        log::debug!(
            "Combined malus {} capped to {}: co2 {} -> {}, weight {} -> {}",
            cap.before,
            cap.after,
            co2_malus.final_malus,
            cap.co2,
            weight_malus.final_malus(),
            cap.weight
        );
        warnings.push(Warning::MalusCapped {
            before: cap.before,
            after: cap.after,
        });
    }

    let customs_duty = customs_duty(
        context.purchase_price,
        is_eu_origin,
        vehicle.vehicle_type,
        rates,
    );

    let dreal = calculate_dreal_fees(
        &DrealRequest {
            vehicle_type: vehicle.vehicle_type,
            expedited: context.expedited_dreal,
            technical_control: context.needs_technical_control,
            conformity_certificate: context.needs_conformity_certificate,
        },
        rates,
    );
    let registration = calculate_registration_fees(
        vehicle.fiscal_power,
        vehicle.co2_emissions,
        &context.department,
        rates,
    );

    let total_taxes = vat.vat_due + cap.co2 + cap.weight + customs_duty;
    let total_fees = dreal.total + registration.total;
    let total_cost = context.purchase_price + total_taxes + total_fees;

    log::info!(
        "Import from {} ({} months, new={}): taxes={} fees={} total={}",
        context.origin_country,
        age,
        is_new_vehicle,
        total_taxes,
        total_fees,
        total_cost
    );

    CalculationBreakdown {
        as_of,
        purchase_price: context.purchase_price,
        is_new_vehicle,
        is_eu_origin,
        vat,
        co2_malus,
        weight_malus,
        combined_malus_before_cap: cap.before,
        combined_malus_after_cap: cap.after,
        capped_co2_malus: cap.co2,
        capped_weight_malus: cap.weight,
        customs_duty,
        dreal_fees: dreal.total,
        dreal,
        registration_fees: registration.total,
        registration,
        total_taxes,
        total_fees,
        total_cost,
        warnings,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MalusCap {
    before: Euros,
    after: Euros,
    co2: Euros,
    weight: Euros,
}

/// Scale both maluses down proportionally when their sum exceeds `cap`. Each
/// component is rounded on its own, so the capped parts may differ from
/// `after` by a euro.
fn apply_malus_cap(co2: Euros, weight: Euros, cap: Euros) -> MalusCap {
    let before = co2 + weight;
    if before <= cap || before.is_zero() {
        return MalusCap {
            before,
            after: before,
            co2,
            weight,
        };
    }
    MalusCap {
        before,
        after: cap,
        co2: round_eur(co2 * cap / before),
        weight: round_eur(weight * cap / before),
    }
}
