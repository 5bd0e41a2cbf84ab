use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Savings balance after folding in a period's leftover, and the share of
/// the target it represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub new_saved: Decimal,
    /// At most 1. Negative when the period was overspent past the saved balance.
    pub ratio: Decimal,
}

impl GoalProgress {
    pub fn percent(&self) -> Decimal {
        self.ratio.saturating_mul(Decimal::ONE_HUNDRED)
    }

    pub fn is_complete(&self) -> bool {
        self.ratio >= Decimal::ONE
    }

    /// Amount still needed to reach `target`; zero once it is reached.
    pub fn remaining_to_target(&self, target: Decimal) -> Decimal {
        target.saturating_sub(self.new_saved).max(Decimal::ZERO)
    }
}

pub struct GoalService;

impl GoalService {
    /// `new_saved = current_saved + period_leftover`, never clamped.
    ///
    /// The ratio is 0 for a non-positive target, otherwise
    /// `min(1, new_saved / target)`. A quotient past the `Decimal` range
    /// clamps to 1, or to `Decimal::MIN` when the balance is negative.
    pub fn progress(
        current_saved: Decimal,
        period_leftover: Decimal,
        target: Decimal,
    ) -> GoalProgress {
        let new_saved = current_saved.saturating_add(period_leftover);
        let ratio = if target <= Decimal::ZERO {
            Decimal::ZERO
        } else {
            match new_saved.checked_div(target) {
                Some(ratio) => ratio.min(Decimal::ONE),
                None if new_saved.is_sign_negative() => Decimal::MIN,
                None => Decimal::ONE,
            }
        };
        GoalProgress { new_saved, ratio }
    }
}
