use crate::money::{format_eur, Euros};
use serde::Serialize;

/// Domain warnings emitted during calculation. They never change an amount,
/// they flag results that need a human look.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Warning {
    /// A private seller selling a new vehicle is atypical; VAT treatment is
    /// left unresolved.
    PrivateSaleOfNewVehicle,
    /// Used vehicle from a professional in the EU without VAT stated on the price.
    VatToVerify,
    /// Seller/buyer combination the VAT rule does not cover.
    UnsupportedSaleConfiguration,
    /// Origin country missing from the reference table, treated as non-EU.
    UnknownOriginCountry { code: String },
    /// Combined malus exceeded the statutory cap and was rescaled.
    MalusCapped { before: Euros, after: Euros },
    /// First registration date is after the calculation date, age taken as 0.
    RegistrationAfterCalculationDate,
}

impl Warning {
    pub fn message(&self) -> String {
        match self {
            Warning::PrivateSaleOfNewVehicle => {
                "Véhicule neuf vendu par un particulier : vérifier la situation fiscale du vendeur"
                    .to_string()
            }
            Warning::VatToVerify => {
                "TVA non mentionnée sur le prix : vérifier le régime appliqué par le vendeur"
                    .to_string()
            }
            Warning::UnsupportedSaleConfiguration => {
                "Configuration vendeur/acheteur non prise en charge : TVA non calculée".to_string()
            }
            Warning::UnknownOriginCountry { code } => {
                format!("Pays d'origine inconnu ({code}) : traité comme pays hors UE")
            }
            Warning::MalusCapped { before, after } => format!(
                "Malus combiné de {} plafonné à {}",
                format_eur(*before),
                format_eur(*after)
            ),
            Warning::RegistrationAfterCalculationDate => {
                "Date de première immatriculation postérieure à la date de calcul".to_string()
            }
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}
