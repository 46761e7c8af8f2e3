//! Administrative fees: DREAL homologation and registration certificate (carte grise).

use super::rates::FiscalRates;
use super::regions::Region;
use super::vehicle::VehicleType;
use crate::money::{round_eur, Euros};
use rust_decimal::Decimal;
use serde::Serialize;

/// Working days added by the prefecture to issue the registration certificate.
const PREFECTURE_DAYS: u32 = 2;

/// Range of working days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessingTime {
    pub min_days: u32,
    pub max_days: u32,
}

impl ProcessingTime {
    const fn days(min_days: u32, max_days: u32) -> Self {
        ProcessingTime { min_days, max_days }
    }

    pub fn standard(vehicle_type: VehicleType) -> Self {
        match vehicle_type {
            VehicleType::Passenger => Self::days(5, 10),
            VehicleType::Commercial => Self::days(10, 15),
            VehicleType::Motorcycle => Self::days(3, 7),
        }
    }

    pub fn expedited(vehicle_type: VehicleType) -> Self {
        match vehicle_type {
            VehicleType::Passenger => Self::days(2, 3),
            VehicleType::Commercial => Self::days(3, 5),
            VehicleType::Motorcycle => Self::days(1, 2),
        }
    }
}

impl std::fmt::Display for ProcessingTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{} jours ouvrés", self.min_days, self.max_days)
    }
}

/// Options requested at the DREAL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrealRequest {
    pub vehicle_type: VehicleType,
    pub expedited: bool,
    pub technical_control: bool,
    pub conformity_certificate: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrealFees {
    pub base_fee: Euros,
    pub expedited_fee: Euros,
    pub technical_control_fee: Euros,
    pub conformity_certificate_fee: Euros,
    pub total: Euros,
    pub processing_time: ProcessingTime,
    /// One line per billed item
    pub description: Vec<String>,
}

pub fn calculate_dreal_fees(request: &DrealRequest, rates: &FiscalRates) -> DrealFees {
    let mut fees = DrealFees {
        base_fee: rates.dreal.base_fee,
        expedited_fee: Decimal::ZERO,
        technical_control_fee: Decimal::ZERO,
        conformity_certificate_fee: Decimal::ZERO,
        total: rates.dreal.base_fee,
        processing_time: ProcessingTime::standard(request.vehicle_type),
        description: vec!["Frais d'homologation DREAL de base".to_string()],
    };

    if request.expedited {
        fees.expedited_fee = rates.dreal.expedited;
        fees.processing_time = ProcessingTime::expedited(request.vehicle_type);
        fees.description
            .push(format!("Traitement accéléré ({})", fees.processing_time));
    }
    if request.technical_control {
        fees.technical_control_fee = rates.dreal.technical_control;
        fees.description
            .push("Contrôle technique complémentaire".to_string());
    }
    if request.conformity_certificate {
        fees.conformity_certificate_fee = rates.dreal.conformity_certificate;
        fees.description
            .push("Certificat de conformité supplémentaire".to_string());
    }

    fees.total = fees.base_fee
        + fees.expedited_fee
        + fees.technical_control_fee
        + fees.conformity_certificate_fee;
    log::debug!(
        "DREAL fees: {:?} -> {} ({})",
        request,
        fees.total,
        fees.processing_time
    );
    fees
}

/// Total delay until the registration certificate is issued. Incomplete
/// documents push the range to `max + 5 ..= max + 10` days.
pub fn total_processing_time(dreal: ProcessingTime, complete_documents: bool) -> ProcessingTime {
    if !complete_documents {
        return ProcessingTime::days(dreal.max_days + 5, dreal.max_days + 10);
    }
    ProcessingTime::days(
        dreal.min_days + PREFECTURE_DAYS,
        dreal.max_days + PREFECTURE_DAYS,
    )
}

/// Whether a technical control is expected before homologation: always for
/// non-EU vehicles, and for vehicles over 10 years old without EU type approval.
pub fn requires_technical_control(
    is_eu_origin: bool,
    age_years: u32,
    has_eu_type_approval: bool,
) -> bool {
    !is_eu_origin || (age_years > 10 && !has_eu_type_approval)
}

/// Documents to bring to the DREAL.
pub fn dreal_documents(is_eu_origin: bool, technical_control: bool) -> Vec<&'static str> {
    let mut documents = vec![
        "Certificat de conformité européen (COC) ou réception à titre isolé (RTI)",
        "Facture d'achat du véhicule",
        "Justificatif de dédouanement (si hors UE)",
        "Demande d'immatriculation (Cerfa 13750*07)",
        "Justificatif de domicile de moins de 6 mois",
        "Pièce d'identité en cours de validité",
    ];
    if technical_control {
        documents.push("Procès-verbal de contrôle technique favorable");
    }
    if !is_eu_origin {
        documents.push("Certificat de dédouanement complet");
        documents.push("Facture de transport international");
    }
    documents
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationFees {
    /// `None` when the department is not in the map and the national average applies
    pub region: Option<Region>,
    pub rate_per_cv: Euros,
    pub regional_tax: Euros,
    pub pollution_tax: Euros,
    /// Administrative fee plus delivery
    pub fixed_fees: Euros,
    pub total: Euros,
}

/// Registration certificate cost. Only the total is rounded.
pub fn calculate_registration_fees(
    fiscal_power: u32,
    co2_emissions: Decimal,
    department: &str,
    rates: &FiscalRates,
) -> RegistrationFees {
    let region = rates.region_for(department);
    let rate_per_cv = rates.regional_rate(region);
    let regional_tax = Decimal::from(fiscal_power) * rate_per_cv;
    let pollution_tax = rates.pollution_tax(co2_emissions);
    let fixed_fees =
        rates.registration.base_administrative_fee + rates.registration.delivery_fee;
    let total = round_eur(regional_tax + pollution_tax + fixed_fees);

    log::debug!(
        "Registration: dept={} region={:?} {} CV x {} + pollution {} + fixed {} = {}",
        department,
        region,
        fiscal_power,
        rate_per_cv,
        pollution_tax,
        fixed_fees,
        total
    );
    RegistrationFees {
        region,
        rate_per_cv,
        regional_tax,
        pollution_tax,
        fixed_fees,
        total,
    }
}
