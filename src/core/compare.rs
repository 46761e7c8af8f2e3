use super::calculator::CalculationBreakdown;
use crate::money::Euros;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonItem {
    pub item: &'static str,
    pub first: Euros,
    pub second: Euros,
    /// `second - first`
    pub difference: Euros,
    /// Change relative to `first`, in percent. 0 when `first` is 0.
    pub percent_change: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioComparison {
    pub first_label: String,
    pub second_label: String,
    pub items: Vec<ComparisonItem>,
    pub total_difference: Euros,
    pub percentage_difference: Decimal,
    /// Label of the cheaper scenario, the first one on a tie
    pub winner: String,
}

/// Line by line comparison of two calculations.
pub fn compare_scenarios(
    first: &CalculationBreakdown,
    second: &CalculationBreakdown,
    first_label: &str,
    second_label: &str,
) -> ScenarioComparison {
    let lines: [(&'static str, fn(&CalculationBreakdown) -> Euros); 8] = [
        ("Prix d'achat", |b| b.purchase_price),
        ("TVA", |b| b.vat.vat_due),
        ("Droits de douane", |b| b.customs_duty),
        ("Malus CO2", |b| b.capped_co2_malus),
        ("Malus poids", |b| b.capped_weight_malus),
        ("Frais DREAL", |b| b.dreal_fees),
        ("Carte grise", |b| b.registration_fees),
        ("TOTAL", |b| b.total_cost),
    ];

    let items = lines
        .into_iter()
        .map(|(item, value)| {
            let (a, b) = (value(first), value(second));
            ComparisonItem {
                item,
                first: a,
                second: b,
                difference: b - a,
                percent_change: percent_change(a, b),
            }
        })
        .collect();

    let total_difference = second.total_cost - first.total_cost;
    let winner = if total_difference < Decimal::ZERO {
        second_label
    } else {
        first_label
    };

    ScenarioComparison {
        first_label: first_label.to_string(),
        second_label: second_label.to_string(),
        items,
        total_difference,
        percentage_difference: percent_change(first.total_cost, second.total_cost),
        winner: winner.to_string(),
    }
}

fn percent_change(from: Euros, to: Euros) -> Decimal {
    if from <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    ((to - from) / from * dec!(100))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
