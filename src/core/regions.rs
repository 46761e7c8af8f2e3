use serde::Serialize;

/// Metropolitan administrative region, used to pick the per-CV registration tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Region {
    AuvergneRhoneAlpes,
    BourgogneFrancheComte,
    Bretagne,
    CentreValDeLoire,
    Corse,
    GrandEst,
    HautsDeFrance,
    IleDeFrance,
    Normandie,
    NouvelleAquitaine,
    Occitanie,
    PaysDeLaLoire,
    ProvenceAlpesCoteAzur,
}

impl Region {
    pub fn display(&self) -> &'static str {
        match self {
            Region::AuvergneRhoneAlpes => "Auvergne-Rhône-Alpes",
            Region::BourgogneFrancheComte => "Bourgogne-Franche-Comté",
            Region::Bretagne => "Bretagne",
            Region::CentreValDeLoire => "Centre-Val de Loire",
            Region::Corse => "Corse",
            Region::GrandEst => "Grand Est",
            Region::HautsDeFrance => "Hauts-de-France",
            Region::IleDeFrance => "Île-de-France",
            Region::Normandie => "Normandie",
            Region::NouvelleAquitaine => "Nouvelle-Aquitaine",
            Region::Occitanie => "Occitanie",
            Region::PaysDeLaLoire => "Pays de la Loire",
            Region::ProvenceAlpesCoteAzur => "Provence-Alpes-Côte d'Azur",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

use Region::*;

/// Metropolitan department codes. Overseas departments are not mapped and
/// fall back to the national average rate.
pub static DEPARTMENT_REGIONS: [(&str, Region); 96] = [
    ("01", AuvergneRhoneAlpes),
    ("02", HautsDeFrance),
    ("03", AuvergneRhoneAlpes),
    ("04", ProvenceAlpesCoteAzur),
    ("05", ProvenceAlpesCoteAzur),
    ("06", ProvenceAlpesCoteAzur),
    ("07", AuvergneRhoneAlpes),
    ("08", GrandEst),
    ("09", Occitanie),
    ("10", GrandEst),
    ("11", Occitanie),
    ("12", Occitanie),
    ("13", ProvenceAlpesCoteAzur),
    ("14", Normandie),
    ("15", AuvergneRhoneAlpes),
    ("16", NouvelleAquitaine),
    ("17", NouvelleAquitaine),
    ("18", CentreValDeLoire),
    ("19", NouvelleAquitaine),
    ("2A", Corse),
    ("2B", Corse),
    ("21", BourgogneFrancheComte),
    ("22", Bretagne),
    ("23", NouvelleAquitaine),
    ("24", NouvelleAquitaine),
    ("25", BourgogneFrancheComte),
    ("26", AuvergneRhoneAlpes),
    ("27", Normandie),
    ("28", CentreValDeLoire),
    ("29", Bretagne),
    ("30", Occitanie),
    ("31", Occitanie),
    ("32", Occitanie),
    ("33", NouvelleAquitaine),
    ("34", Occitanie),
    ("35", Bretagne),
    ("36", CentreValDeLoire),
    ("37", CentreValDeLoire),
    ("38", AuvergneRhoneAlpes),
    ("39", BourgogneFrancheComte),
    ("40", NouvelleAquitaine),
    ("41", CentreValDeLoire),
    ("42", AuvergneRhoneAlpes),
    ("43", AuvergneRhoneAlpes),
    ("44", PaysDeLaLoire),
    ("45", CentreValDeLoire),
    ("46", Occitanie),
    ("47", NouvelleAquitaine),
    ("48", Occitanie),
    ("49", PaysDeLaLoire),
    ("50", Normandie),
    ("51", GrandEst),
    ("52", GrandEst),
    ("53", PaysDeLaLoire),
    ("54", GrandEst),
    ("55", GrandEst),
    ("56", Bretagne),
    ("57", GrandEst),
    ("58", BourgogneFrancheComte),
    ("59", HautsDeFrance),
    ("60", HautsDeFrance),
    ("61", Normandie),
    ("62", HautsDeFrance),
    ("63", AuvergneRhoneAlpes),
    ("64", NouvelleAquitaine),
    ("65", Occitanie),
    ("66", Occitanie),
    ("67", GrandEst),
    ("68", GrandEst),
    ("69", AuvergneRhoneAlpes),
    ("70", BourgogneFrancheComte),
    ("71", BourgogneFrancheComte),
    ("72", PaysDeLaLoire),
    ("73", AuvergneRhoneAlpes),
    ("74", AuvergneRhoneAlpes),
    ("75", IleDeFrance),
    ("76", Normandie),
    ("77", IleDeFrance),
    ("78", IleDeFrance),
    ("79", NouvelleAquitaine),
    ("80", HautsDeFrance),
    ("81", Occitanie),
    ("82", Occitanie),
    ("83", ProvenceAlpesCoteAzur),
    ("84", ProvenceAlpesCoteAzur),
    ("85", PaysDeLaLoire),
    ("86", NouvelleAquitaine),
    ("87", NouvelleAquitaine),
    ("88", GrandEst),
    ("89", BourgogneFrancheComte),
    ("90", BourgogneFrancheComte),
    ("91", IleDeFrance),
    ("92", IleDeFrance),
    ("93", IleDeFrance),
    ("94", IleDeFrance),
    ("95", IleDeFrance),
];
