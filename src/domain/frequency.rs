use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::BudgetError;

/// Weeks in a fortnight.
pub const WEEKS_PER_FORTNIGHT: Decimal = dec!(2);

/// Fortnights in a month. This is an approximation (52 / 12 / 2 ≈ 2.1667),
/// not a calendar conversion.
pub const FORTNIGHTS_PER_MONTH: Decimal = dec!(2.1667);

/// Cadence at which an amount was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Frequency {
    Weekly,
    #[default]
    Fortnightly,
    Monthly,
}

impl Frequency {
    pub const ALL: [Frequency; 3] = [Frequency::Weekly, Frequency::Fortnightly, Frequency::Monthly];

    pub fn label(self) -> &'static str {
        match self {
            Frequency::Weekly => "Weekly",
            Frequency::Fortnightly => "Fortnightly",
            Frequency::Monthly => "Monthly",
        }
    }

    /// Converts `amount` at this cadence into fortnightly-equivalent units.
    ///
    /// Saturates at the `Decimal` bounds instead of panicking; recorded
    /// entries never get near them.
    pub fn normalize(self, amount: Decimal) -> Decimal {
        self.checked_normalize(amount).unwrap_or(if amount.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
    }

    /// `None` when the fortnightly equivalent does not fit in a `Decimal`.
    pub fn checked_normalize(self, amount: Decimal) -> Option<Decimal> {
        match self {
            Frequency::Weekly => amount.checked_mul(WEEKS_PER_FORTNIGHT),
            Frequency::Fortnightly => Some(amount),
            Frequency::Monthly => amount.checked_div(FORTNIGHTS_PER_MONTH),
        }
    }
}

/// Converts an amount entered at `frequency` into the canonical fortnightly unit.
pub fn normalize(amount: Decimal, frequency: Frequency) -> Decimal {
    frequency.normalize(amount)
}

/// Label-based variant of [`normalize`]; an unrecognized label leaves the
/// amount unchanged.
pub fn normalize_label(amount: Decimal, label: &str) -> Decimal {
    match label.parse::<Frequency>() {
        Ok(frequency) => frequency.normalize(amount),
        Err(_) => amount,
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Frequency {
    type Err = BudgetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "weekly" | "week" | "w" => Ok(Frequency::Weekly),
            "fortnightly" | "fortnight" | "biweekly" | "f" => Ok(Frequency::Fortnightly),
            "monthly" | "month" | "m" => Ok(Frequency::Monthly),
            other => Err(BudgetError::validation(format!(
                "unknown frequency `{}` (expected weekly, fortnightly or monthly)",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekly_doubles() {
        assert_eq!(normalize(dec!(100), Frequency::Weekly), dec!(200));
    }

    #[test]
    fn fortnightly_is_identity() {
        assert_eq!(normalize(dec!(600), Frequency::Fortnightly), dec!(600));
    }

    #[test]
    fn monthly_divides_by_approximation() {
        let normalized = normalize(dec!(2166.70), Frequency::Monthly);
        assert_eq!(normalized, dec!(1000));
    }

    #[test]
    fn unknown_label_falls_back_to_identity() {
        assert_eq!(normalize_label(dec!(42.5), "quarterly"), dec!(42.5));
        assert_eq!(normalize_label(dec!(10), "Weekly"), dec!(20));
    }

    #[test]
    fn zero_stays_zero() {
        for frequency in Frequency::ALL {
            assert!(normalize(Decimal::ZERO, frequency).is_zero());
        }
    }

    #[test]
    fn weekly_overflow_saturates_instead_of_panicking() {
        assert_eq!(Frequency::Weekly.checked_normalize(Decimal::MAX), None);
        assert_eq!(normalize(Decimal::MAX, Frequency::Weekly), Decimal::MAX);
        assert_eq!(normalize(Decimal::MIN, Frequency::Weekly), Decimal::MIN);
        assert_eq!(
            Frequency::Monthly.checked_normalize(Decimal::MAX),
            Some(Decimal::MAX / FORTNIGHTS_PER_MONTH)
        );
    }
}
