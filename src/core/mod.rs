pub mod advice;
pub mod calculator;
pub mod co2;
pub mod compare;
pub mod countries;
pub mod customs;
pub mod describe;
pub mod exemptions;
pub mod fees;
pub mod malus;
pub mod rates;
pub mod regions;
pub mod schema;
pub mod validation;
pub mod vat;
pub mod vehicle;
pub mod warnings;
pub mod weight;

// Flat public surface for domain types and functions.
pub use advice::{
    environmental_impact, recommendations, vehicle_profile, EnvironmentalCategory,
    EnvironmentalImpact, Recommendation, VehicleProfile, WeightCategory,
};
pub use calculator::{calculate_import_costs, calculate_import_costs_with, CalculationBreakdown};
pub use co2::{base_co2_malus, calculate_co2_malus};
pub use compare::{compare_scenarios, ComparisonItem, ScenarioComparison};
pub use countries::CountryEntry;
pub use customs::customs_duty;
pub use describe::{
    calculation_summary, cost_shares, describe_co2_malus, describe_vat, describe_weight_malus,
    malus_cap_saving, required_documents, CostShares,
};
pub use exemptions::Exemption;
pub use fees::{
    calculate_dreal_fees, calculate_registration_fees, dreal_documents,
    requires_technical_control, total_processing_time, DrealFees, DrealRequest, ProcessingTime,
    RegistrationFees,
};
pub use malus::MalusResult;
pub use rates::FiscalRates;
pub use regions::Region;
pub use schema::InputField;
pub use validation::{validate_input, InputError, InputWarning, ValidationReport};
pub use vat::{calculate_vat, requires_fiscal_clearance, vat_caution, VatInput, VatResult, VatType};
pub use vehicle::{
    age_in_months, BuyerType, ImportContext, ImportInput, VehicleAge, VehicleSpec, VehicleType,
};
pub use warnings::Warning;
pub use weight::{calculate_weight_malus, WeightMalusResult};
