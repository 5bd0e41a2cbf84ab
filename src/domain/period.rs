use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::common::ensure_within_limit;
use crate::errors::{BudgetError, Result};

pub const DEFAULT_GOAL_NAME: &str = "Primary Savings";
pub const DEFAULT_GOAL_TARGET: Decimal = dec!(1000);
/// Smallest non-zero goal target.
pub const MIN_GOAL_TARGET: Decimal = dec!(0.01);

/// Income entered once per period plus the leftover carried in from the prior one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodInputs {
    pub income_amount: Decimal,
    pub carryover_from_prior: Decimal,
}

impl PeriodInputs {
    pub fn new(income_amount: Decimal, carryover_from_prior: Decimal) -> Result<Self> {
        ensure_amount("income", income_amount)?;
        ensure_amount("carryover", carryover_from_prior)?;
        Ok(Self {
            income_amount,
            carryover_from_prior,
        })
    }

    pub fn total_pool(&self) -> Decimal {
        self.income_amount.saturating_add(self.carryover_from_prior)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub name: String,
    /// Zero means "no target"; progress against it is reported as 0.
    /// Otherwise at least [`MIN_GOAL_TARGET`].
    pub target_amount: Decimal,
    pub current_saved_amount: Decimal,
}

impl SavingsGoal {
    pub fn new(
        name: impl Into<String>,
        target_amount: Decimal,
        current_saved_amount: Decimal,
    ) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(BudgetError::validation("goal name cannot be empty"));
        }
        ensure_amount("goal target", target_amount)?;
        if !target_amount.is_zero() && target_amount < MIN_GOAL_TARGET {
            return Err(BudgetError::validation(format!(
                "goal target must be 0 or at least {} (got {})",
                MIN_GOAL_TARGET, target_amount
            )));
        }
        ensure_amount("saved balance", current_saved_amount)?;
        Ok(Self {
            name,
            target_amount,
            current_saved_amount,
        })
    }

    pub fn with_saved(&self, current_saved_amount: Decimal) -> Result<Self> {
        Self::new(self.name.clone(), self.target_amount, current_saved_amount)
    }
}

impl Default for SavingsGoal {
    fn default() -> Self {
        Self {
            name: DEFAULT_GOAL_NAME.into(),
            target_amount: DEFAULT_GOAL_TARGET,
            current_saved_amount: Decimal::ZERO,
        }
    }
}

/// Persisted per-period inputs, restored when a session is reopened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodState {
    pub inputs: PeriodInputs,
    pub goal: SavingsGoal,
}

impl PeriodState {
    /// Re-runs the constructor checks on state that bypassed them, such as a
    /// hand-edited `period.json`.
    pub fn validate(&self) -> Result<()> {
        PeriodInputs::new(self.inputs.income_amount, self.inputs.carryover_from_prior)?;
        SavingsGoal::new(
            self.goal.name.clone(),
            self.goal.target_amount,
            self.goal.current_saved_amount,
        )?;
        Ok(())
    }
}

fn ensure_amount(field: &str, value: Decimal) -> Result<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(BudgetError::validation(format!(
            "{} cannot be negative (got {})",
            field, value
        )));
    }
    ensure_within_limit(field, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pool_adds_carryover() {
        let inputs = PeriodInputs::new(dec!(2500), dec!(120.50)).unwrap();
        assert_eq!(inputs.total_pool(), dec!(2620.50));
    }

    #[test]
    fn negative_inputs_are_rejected() {
        assert!(PeriodInputs::new(dec!(-1), Decimal::ZERO).is_err());
        assert!(PeriodInputs::new(Decimal::ZERO, dec!(-0.01)).is_err());
        assert!(SavingsGoal::new("Trip", dec!(-100), Decimal::ZERO).is_err());
        assert!(SavingsGoal::new("Trip", dec!(100), dec!(-1)).is_err());
    }

    #[test]
    fn zero_target_is_accepted() {
        let goal = SavingsGoal::new("Buffer", Decimal::ZERO, Decimal::ZERO).unwrap();
        assert!(goal.target_amount.is_zero());
    }

    #[test]
    fn default_goal_matches_dashboard_defaults() {
        let goal = SavingsGoal::default();
        assert_eq!(goal.name, "Primary Savings");
        assert_eq!(goal.target_amount, dec!(1000));
    }

    #[test]
    fn tiny_and_huge_goal_targets_are_rejected() {
        assert!(SavingsGoal::new("Tiny", dec!(0.0000000000000000000001), Decimal::ZERO)
            .unwrap_err()
            .is_validation());
        assert!(SavingsGoal::new("Cent", MIN_GOAL_TARGET, Decimal::ZERO).is_ok());
        assert!(SavingsGoal::new("Moon", Decimal::MAX, Decimal::ZERO).is_err());
        assert!(PeriodInputs::new(Decimal::MAX, Decimal::ZERO).is_err());
    }

    #[test]
    fn validate_catches_state_built_without_constructors() {
        let mut state = PeriodState::default();
        assert!(state.validate().is_ok());
        state.inputs.income_amount = dec!(-250);
        assert!(state.validate().unwrap_err().is_validation());

        let mut state = PeriodState::default();
        state.goal.name = "  ".into();
        assert!(state.validate().is_err());
    }
}
