use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Origin country reference entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountryEntry {
    /// ISO 3166-1 alpha-2 code
    pub code: &'static str,
    pub name: &'static str,
    /// Standard VAT rate in percent (19 = 19%)
    pub vat_rate: Decimal,
    pub is_eu: bool,
    pub currency: &'static str,
}

const fn eu(code: &'static str, name: &'static str, vat_rate: Decimal) -> CountryEntry {
    CountryEntry {
        code,
        name,
        vat_rate,
        is_eu: true,
        currency: "EUR",
    }
}

const fn eu_local(
    code: &'static str,
    name: &'static str,
    vat_rate: Decimal,
    currency: &'static str,
) -> CountryEntry {
    CountryEntry {
        code,
        name,
        vat_rate,
        is_eu: true,
        currency,
    }
}

const fn third(
    code: &'static str,
    name: &'static str,
    vat_rate: Decimal,
    currency: &'static str,
) -> CountryEntry {
    CountryEntry {
        code,
        name,
        vat_rate,
        is_eu: false,
        currency,
    }
}

pub static COUNTRIES: [CountryEntry; 35] = [
    eu("AT", "Autriche", dec!(20)),
    eu("BE", "Belgique", dec!(21)),
    eu_local("BG", "Bulgarie", dec!(20), "BGN"),
    eu("HR", "Croatie", dec!(25)),
    eu("CY", "Chypre", dec!(19)),
    eu_local("CZ", "République tchèque", dec!(21), "CZK"),
    eu_local("DK", "Danemark", dec!(25), "DKK"),
    eu("EE", "Estonie", dec!(22)),
    eu("FI", "Finlande", dec!(25.5)),
    eu("FR", "France", dec!(20)),
    eu("DE", "Allemagne", dec!(19)),
    eu("GR", "Grèce", dec!(24)),
    eu_local("HU", "Hongrie", dec!(27), "HUF"),
    eu("IE", "Irlande", dec!(23)),
    eu("IT", "Italie", dec!(22)),
    eu("LV", "Lettonie", dec!(21)),
    eu("LT", "Lituanie", dec!(21)),
    eu("LU", "Luxembourg", dec!(17)),
    eu("MT", "Malte", dec!(18)),
    eu("NL", "Pays-Bas", dec!(21)),
    eu_local("PL", "Pologne", dec!(23), "PLN"),
    eu("PT", "Portugal", dec!(23)),
    eu_local("RO", "Roumanie", dec!(19), "RON"),
    eu("SK", "Slovaquie", dec!(23)),
    eu("SI", "Slovénie", dec!(22)),
    eu("ES", "Espagne", dec!(21)),
    eu_local("SE", "Suède", dec!(25), "SEK"),
    third("CH", "Suisse", dec!(8.1), "CHF"),
    third("GB", "Royaume-Uni", dec!(20), "GBP"),
    third("NO", "Norvège", dec!(25), "NOK"),
    third("JP", "Japon", dec!(10), "JPY"),
    third("KR", "Corée du Sud", dec!(10), "KRW"),
    third("US", "États-Unis", dec!(0), "USD"),
    third("CA", "Canada", dec!(5), "CAD"),
    third("AE", "Émirats arabes unis", dec!(5), "AED"),
];
