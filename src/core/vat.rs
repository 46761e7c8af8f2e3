//! VAT treatment of an imported vehicle.
//!
//! The outcome depends on who sells (private or professional), who buys, whether
//! the vehicle counts as new and whether it comes from inside the EU.

use super::countries::CountryEntry;
use super::rates::FiscalRates;
use super::vehicle::BuyerType;
use super::warnings::Warning;
use crate::money::{round_eur, Euros, Rate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VatType {
    None,
    French,
    OriginCountry,
    ReverseCharge,
}

impl VatType {
    pub fn display(&self) -> &'static str {
        match self {
            VatType::None => "Aucune",
            VatType::French => "TVA française",
            VatType::OriginCountry => "TVA du pays d'origine",
            VatType::ReverseCharge => "Autoliquidation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VatResult {
    /// VAT still to pay in France
    pub vat_due: Euros,
    pub vat_rate: Rate,
    /// VAT already contained in the purchase price
    pub vat_included_in_price: Euros,
    pub net_price: Euros,
    pub total_price: Euros,
    pub is_vat_applicable: bool,
    pub vat_type: VatType,
    pub description: String,
    /// Quitus fiscal needed before registration
    pub requires_fiscal_clearance: bool,
    /// VAT bond to lodge with customs
    pub requires_customs_bond: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caution_amount: Option<Euros>,
    #[serde(skip)]
    pub warnings: Vec<Warning>,
}

/// Inputs of the VAT rule.
#[derive(Debug, Clone, Copy)]
pub struct VatInput<'a> {
    pub purchase_price: Euros,
    /// `None` when the origin country is not in the reference table
    pub origin: Option<&'a CountryEntry>,
    pub is_new_vehicle: bool,
    pub is_professional_seller: bool,
    pub buyer_type: BuyerType,
    pub department: &'a str,
    pub has_vat_included: bool,
}

impl<'a> VatInput<'a> {
    fn is_eu_origin(&self) -> bool {
        self.origin.is_some_and(|c| c.is_eu)
    }
}

pub fn calculate_vat(input: &VatInput, rates: &FiscalRates) -> VatResult {
    let result = match (input.is_professional_seller, input.buyer_type) {
        (false, BuyerType::Private) => private_to_private(input),
        (true, BuyerType::Private) => professional_to_private(input, rates),
        (true, BuyerType::Professional) => professional_to_professional(input, rates),
        (false, BuyerType::Professional) => no_vat(
            input.purchase_price,
            "Configuration non supportée",
        )
        .with_warning(Warning::UnsupportedSaleConfiguration),
    };
    log::debug!(
        "VAT: seller_pro={}, buyer={:?}, new={}, eu={} -> {:?} {} due={}",
        input.is_professional_seller,
        input.buyer_type,
        input.is_new_vehicle,
        input.is_eu_origin(),
        result.vat_type,
        result.vat_rate,
        result.vat_due
    );
    result
}

/// VAT rate for a registration department: reduced rate in Corsica.
pub fn department_vat_rate(department: &str, rates: &FiscalRates) -> Rate {
    match department.trim().to_ascii_uppercase().as_str() {
        "2A" | "2B" => rates.vat.corsica,
        _ => rates.vat.standard,
    }
}

/// The customs VAT bond equals the VAT amount.
pub fn vat_caution(vat_amount: Euros) -> Euros {
    round_eur(vat_amount)
}

/// Whether a fiscal clearance (quitus fiscal) is actually needed: flagged and
/// some VAT is due.
pub fn requires_fiscal_clearance(vat: &VatResult) -> bool {
    vat.requires_fiscal_clearance && vat.vat_due > Decimal::ZERO
}

fn private_to_private(input: &VatInput) -> VatResult {
    if input.is_new_vehicle {
        return no_vat(
            input.purchase_price,
            "Vente particulier à particulier - Véhicule neuf : vérifier la situation fiscale du vendeur",
        )
        .with_warning(Warning::PrivateSaleOfNewVehicle);
    }
    no_vat(
        input.purchase_price,
        "Vente particulier à particulier - Véhicule d'occasion : pas de TVA",
    )
}

fn professional_to_private(input: &VatInput, rates: &FiscalRates) -> VatResult {
    let price = input.purchase_price;
    let vat_rate = department_vat_rate(input.department, rates);

    if input.is_new_vehicle {
        if input.has_vat_included {
            return vat_included(price, vat_rate, VatType::French)
                .described("Véhicule neuf - TVA française incluse dans le prix");
        }
        let vat = price * vat_rate;
        return VatResult {
            requires_fiscal_clearance: true,
            requires_customs_bond: true,
            caution_amount: Some(vat_caution(vat)),
            ..vat_on_top(price, vat_rate, "Véhicule neuf - TVA française à acquitter")
        };
    }

    if input.is_eu_origin() {
        if input.has_vat_included {
            let (origin_rate, origin_name) = input
                .origin
                .map(|c| (c.vat_rate / dec!(100), c.name))
                .unwrap_or((rates.vat.standard, "origine"));
            return vat_included(price, origin_rate, VatType::OriginCountry).described(&format!(
                "Véhicule d'occasion UE - TVA {origin_name} incluse"
            ));
        }
        return no_vat(
            price,
            "Véhicule d'occasion UE - TVA à vérifier selon le statut du vendeur",
        )
        .with_warning(Warning::VatToVerify);
    }

    VatResult {
        requires_fiscal_clearance: true,
        ..vat_on_top(price, vat_rate, "Véhicule hors UE - TVA française à acquitter")
    }
}

fn professional_to_professional(input: &VatInput, rates: &FiscalRates) -> VatResult {
    let price = input.purchase_price;
    if input.is_eu_origin() {
        return VatResult {
            vat_rate: rates.vat.standard,
            is_vat_applicable: true,
            vat_type: VatType::ReverseCharge,
            ..no_vat(
                price,
                "Vente B2B UE - Autoliquidation de la TVA par l'acheteur",
            )
        };
    }
    VatResult {
        requires_fiscal_clearance: true,
        ..vat_on_top(
            price,
            rates.vat.standard,
            "Vente B2B hors UE - TVA française + droits de douane",
        )
    }
}

fn no_vat(purchase_price: Euros, description: &str) -> VatResult {
    VatResult {
        vat_due: Decimal::ZERO,
        vat_rate: Decimal::ZERO,
        vat_included_in_price: Decimal::ZERO,
        net_price: purchase_price,
        total_price: purchase_price,
        is_vat_applicable: false,
        vat_type: VatType::None,
        description: description.to_string(),
        requires_fiscal_clearance: false,
        requires_customs_bond: false,
        caution_amount: None,
        warnings: Vec::new(),
    }
}

/// French VAT added on top of the price.
fn vat_on_top(purchase_price: Euros, vat_rate: Rate, description: &str) -> VatResult {
    let vat = purchase_price * vat_rate;
    VatResult {
        vat_due: round_eur(vat),
        vat_rate,
        total_price: round_eur(purchase_price + vat),
        is_vat_applicable: true,
        vat_type: VatType::French,
        ..no_vat(purchase_price, description)
    }
}

/// VAT already contained in the price: back-calculate the net price, nothing due.
fn vat_included(purchase_price: Euros, vat_rate: Rate, vat_type: VatType) -> VatResult {
    let net = purchase_price / (Decimal::ONE + vat_rate);
    VatResult {
        vat_rate,
        vat_included_in_price: round_eur(purchase_price - net),
        net_price: round_eur(net),
        is_vat_applicable: true,
        vat_type,
        ..no_vat(purchase_price, "")
    }
}

impl VatResult {
    fn with_warning(mut self, warning: Warning) -> Self {
        self.warnings.push(warning);
        self
    }

    fn described(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates() -> &'static FiscalRates {
        FiscalRates::y2025()
    }

    fn input(price: Euros, origin: &str) -> VatInput<'static> {
        VatInput {
            purchase_price: price,
            origin: rates().country(origin),
            is_new_vehicle: false,
            is_professional_seller: true,
            buyer_type: BuyerType::Private,
            department: "75",
            has_vat_included: false,
        }
    }

    #[test]
    fn private_sale_of_used_vehicle_has_no_vat() {
        let vat = calculate_vat(
            &VatInput {
                is_professional_seller: false,
                ..input(dec!(20000), "DE")
            },
            rates(),
        );
        assert_eq!(vat.vat_due, dec!(0));
        assert_eq!(vat.vat_type, VatType::None);
        assert!(!vat.is_vat_applicable);
        assert!(vat.warnings.is_empty());
    }

    #[test]
    fn private_sale_of_new_vehicle_is_flagged_not_resolved() {
        let vat = calculate_vat(
            &VatInput {
                is_professional_seller: false,
                is_new_vehicle: true,
                ..input(dec!(35000), "DE")
            },
            rates(),
        );
        assert_eq!(vat.vat_due, dec!(0));
        assert!(!vat.is_vat_applicable);
        assert!(vat.description.contains("particulier à particulier"));
        assert!(vat.description.contains("vérifier"));
        assert_eq!(vat.warnings, vec![Warning::PrivateSaleOfNewVehicle]);
    }

    #[test]
    fn new_vehicle_from_professional_owes_french_vat() {
        let vat = calculate_vat(
            &VatInput {
                is_new_vehicle: true,
                ..input(dec!(45000), "DE")
            },
            rates(),
        );
        assert_eq!(vat.vat_due, dec!(9000));
        assert_eq!(vat.vat_rate, dec!(0.20));
        assert_eq!(vat.vat_type, VatType::French);
        assert_eq!(vat.total_price, dec!(54000));
        assert!(vat.requires_fiscal_clearance);
        assert!(vat.requires_customs_bond);
        assert_eq!(vat.caution_amount, Some(dec!(9000)));
        assert!(requires_fiscal_clearance(&vat));
    }

    #[test]
    fn corsica_uses_reduced_rate() {
        let vat = calculate_vat(
            &VatInput {
                is_new_vehicle: true,
                department: "2B",
                ..input(dec!(30000), "IT")
            },
            rates(),
        );
        assert_eq!(vat.vat_rate, dec!(0.13));
        assert_eq!(vat.vat_due, dec!(3900));
    }

    #[test]
    fn new_vehicle_with_vat_included_is_back_calculated() {
        let vat = calculate_vat(
            &VatInput {
                is_new_vehicle: true,
                has_vat_included: true,
                ..input(dec!(36000), "BE")
            },
            rates(),
        );
        assert_eq!(vat.vat_due, dec!(0));
        assert_eq!(vat.net_price, dec!(30000));
        assert_eq!(vat.vat_included_in_price, dec!(6000));
        assert_eq!(vat.vat_type, VatType::French);
        assert!(!vat.requires_customs_bond);
        assert_eq!(vat.caution_amount, None);
    }

    #[test]
    fn used_eu_vehicle_with_vat_included_uses_origin_rate() {
        let vat = calculate_vat(
            &VatInput {
                has_vat_included: true,
                ..input(dec!(23800), "DE")
            },
            rates(),
        );
        assert_eq!(vat.vat_due, dec!(0));
        assert_eq!(vat.vat_rate, dec!(0.19));
        assert_eq!(vat.net_price, dec!(20000));
        assert_eq!(vat.vat_included_in_price, dec!(3800));
        assert_eq!(vat.vat_type, VatType::OriginCountry);
        assert!(vat.description.contains("Allemagne"));
    }

    #[test]
    fn used_eu_vehicle_without_stated_vat_is_to_verify() {
        let vat = calculate_vat(&input(dec!(25000), "DE"), rates());
        assert_eq!(vat.vat_due, dec!(0));
        assert_eq!(vat.vat_type, VatType::None);
        assert!(vat.description.contains("à vérifier"));
        assert_eq!(vat.warnings, vec![Warning::VatToVerify]);
    }

    #[test]
    fn used_non_eu_vehicle_owes_french_vat_without_bond() {
        let vat = calculate_vat(&input(dec!(30000), "JP"), rates());
        assert_eq!(vat.vat_due, dec!(6000));
        assert_eq!(vat.vat_type, VatType::French);
        assert!(vat.requires_fiscal_clearance);
        assert!(!vat.requires_customs_bond);
        assert_eq!(vat.caution_amount, None);
    }

    #[test]
    fn b2b_inside_eu_is_reverse_charged() {
        let vat = calculate_vat(
            &VatInput {
                buyer_type: BuyerType::Professional,
                ..input(dec!(40000), "NL")
            },
            rates(),
        );
        assert_eq!(vat.vat_due, dec!(0));
        assert_eq!(vat.vat_type, VatType::ReverseCharge);
        assert_eq!(vat.vat_rate, dec!(0.20));
        assert!(vat.is_vat_applicable);
        assert!(!requires_fiscal_clearance(&vat));
    }

    #[test]
    fn b2b_outside_eu_owes_standard_vat_even_in_corsica() {
        let vat = calculate_vat(
            &VatInput {
                buyer_type: BuyerType::Professional,
                department: "2A",
                ..input(dec!(40000), "KR")
            },
            rates(),
        );
        assert_eq!(vat.vat_due, dec!(8000));
        assert_eq!(vat.vat_rate, dec!(0.20));
        assert!(vat.requires_fiscal_clearance);
        assert!(!vat.requires_customs_bond);
    }

    #[test]
    fn unknown_origin_is_treated_as_non_eu() {
        let vat = calculate_vat(&input(dec!(10000), "ZZ"), rates());
        assert_eq!(vat.vat_type, VatType::French);
        assert_eq!(vat.vat_due, dec!(2000));
    }

    #[test]
    fn private_seller_to_professional_buyer_is_unsupported() {
        let vat = calculate_vat(
            &VatInput {
                is_professional_seller: false,
                buyer_type: BuyerType::Professional,
                ..input(dec!(10000), "DE")
            },
            rates(),
        );
        assert_eq!(vat.vat_due, dec!(0));
        assert_eq!(vat.warnings, vec![Warning::UnsupportedSaleConfiguration]);
    }

    #[test]
    fn vat_amounts_are_rounded() {
        let vat = calculate_vat(&input(dec!(12345.67), "JP"), rates());
        // 2469.134
        assert_eq!(vat.vat_due, dec!(2469));
    }
}
