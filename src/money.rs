use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Euro amounts. All monetary values go through `Decimal`, never `f64`.
pub type Euros = Decimal;

/// Rates expressed as fractions (0.20 = 20%).
pub type Rate = Decimal;

const GROUP_SEPARATOR: char = '\u{202F}';
const CURRENCY_SEPARATOR: char = '\u{00A0}';

/// Round to the nearest whole euro, halves away from zero.
pub fn round_eur(amount: Decimal) -> Euros {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// French formatting of a whole-euro amount, e.g. `45 000 €`.
pub fn format_eur(amount: Decimal) -> String {
    let rounded = round_eur(amount);
    format!(
        "{}{}{CURRENCY_SEPARATOR}€",
        sign(rounded),
        group_thousands(rounded)
    )
}

/// Like [`format_eur`] but keeps the cents, e.g. `86,90 €`.
pub fn format_eur_cents(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let cents = (rounded.abs().fract() * dec!(100)).trunc();
    format!(
        "{}{},{:0>2}{CURRENCY_SEPARATOR}€",
        sign(rounded),
        group_thousands(rounded),
        cents.to_string()
    )
}

fn sign(amount: Decimal) -> &'static str {
    if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    }
}

fn group_thousands(amount: Decimal) -> String {
    let digits = amount.abs().trunc().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(c);
    }
    grouped
}

/// French formatting of a rate with at most one decimal, e.g. `5,5 %`.
pub fn format_percent(rate: Rate) -> String {
    let pct = (rate * dec!(100))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    format!("{}{GROUP_SEPARATOR}%", pct.to_string().replace('.', ","))
}

/// Plain display of a decimal without trailing zeros (`2145.0` -> `2145`).
pub fn display_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}
