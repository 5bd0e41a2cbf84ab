//! Presentation helpers. The core never formats; the shell and the
//! exporters call into here.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

pub const DEFAULT_SYMBOL: &str = "$";
const GROUPING_SEPARATOR: char = ',';

/// Rounds half away from zero to `precision` places and pins the scale so
/// trailing zeros are printed.
fn to_precision(value: Decimal, precision: u32) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(precision);
    rounded
}

/// `1234.5` -> `1,234.50`. Negative values keep a leading `-`.
pub fn format_number(value: Decimal, precision: u32) -> String {
    let body = to_precision(value, precision).to_string();
    let (sign, unsigned) = match body.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", body.as_str()),
    };
    match unsigned.split_once('.') {
        Some((int_part, frac)) => format!("{}{}.{}", sign, group_digits(int_part), frac),
        None => format!("{}{}", sign, group_digits(unsigned)),
    }
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, GROUPING_SEPARATOR);
        }
        grouped.insert(0, ch);
    }
    grouped
}

/// `-1234.5` with `$` -> `-$1,234.50`.
pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    let body = format_number(amount.abs(), 2);
    if to_precision(amount, 2) < Decimal::ZERO {
        format!("-{}{}", symbol, body)
    } else {
        format!("{}{}", symbol, body)
    }
}

/// Ratio `0.2` -> `20.0%`.
pub fn format_percent(ratio: Decimal) -> String {
    format!("{}%", format_number(ratio.saturating_mul(Decimal::ONE_HUNDRED), 1))
}

/// `2024-03-09` -> `09 March 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d %B %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn formats_with_grouping_and_cents() {
        assert_eq!(format_currency(dec!(1250), "$"), "$1,250.00");
        assert_eq!(format_currency(dec!(1234567.891), "$"), "$1,234,567.89");
        assert_eq!(format_currency(dec!(0.005), "$"), "$0.01");
        assert_eq!(format_currency(dec!(999), "€"), "€999.00");
    }

    #[test]
    fn negative_amounts_lead_with_sign() {
        assert_eq!(format_currency(dec!(-400), "$"), "-$400.00");
        assert_eq!(format_currency(dec!(-0.001), "$"), "$0.00");
    }

    #[test]
    fn monthly_normalization_displays_two_places() {
        let normalized = crate::domain::normalize(dec!(100), crate::domain::Frequency::Monthly);
        assert_eq!(format_currency(normalized, "$"), "$46.15");
    }

    #[test]
    fn percent_uses_one_decimal() {
        assert_eq!(format_percent(dec!(0.2)), "20.0%");
        assert_eq!(format_percent(dec!(0.12345)), "12.3%");
        assert_eq!(format_percent(dec!(-0.2)), "-20.0%");
    }

    #[test]
    fn percent_of_extreme_ratio_is_formatted() {
        assert!(format_percent(Decimal::MIN).starts_with("-79,228,162,514"));
    }

    #[test]
    fn dates_are_long_form() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(format_date(date), "09 March 2024");
    }
}
