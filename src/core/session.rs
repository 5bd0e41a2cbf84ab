use rust_decimal::Decimal;

use crate::core::services::{PeriodReport, SummaryService};
use crate::domain::{PeriodInputs, PeriodState, SavingsGoal, TransactionDraft, TransactionId};
use crate::errors::{BudgetError, Result};
use crate::ledger::Ledger;
use crate::storage::{MemoryStore, PeriodStore};

/// Owns the ledger and period inputs for one user session.
///
/// A period ends only when the caller invokes [`BudgetSession::rollover`] or
/// [`BudgetSession::reset`]; nothing here is calendar driven.
///
/// Every change to the inputs or goal is written to the period store before
/// it is applied in memory. When a call returns an error the in-memory state
/// is what it was before the call.
pub struct BudgetSession {
    ledger: Ledger,
    periods: Box<dyn PeriodStore>,
    inputs: PeriodInputs,
    goal: SavingsGoal,
    default_goal: SavingsGoal,
}

impl BudgetSession {
    pub fn new(
        ledger: Ledger,
        periods: impl PeriodStore + 'static,
        state: PeriodState,
        default_goal: SavingsGoal,
    ) -> Self {
        Self {
            ledger,
            periods: Box::new(periods),
            inputs: state.inputs,
            goal: state.goal,
            default_goal,
        }
    }

    /// Restores the saved period, or starts a fresh one on `default_goal`.
    pub fn open(
        ledger: Ledger,
        periods: impl PeriodStore + 'static,
        default_goal: SavingsGoal,
    ) -> Result<Self> {
        let state = periods.load_period()?.unwrap_or_else(|| PeriodState {
            inputs: PeriodInputs::default(),
            goal: default_goal.clone(),
        });
        Ok(Self::new(ledger, periods, state, default_goal))
    }

    /// Session over in-memory stores with default inputs.
    pub fn in_memory() -> Self {
        Self::new(
            Ledger::in_memory(),
            MemoryStore::new(),
            PeriodState::default(),
            SavingsGoal::default(),
        )
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn inputs(&self) -> &PeriodInputs {
        &self.inputs
    }

    pub fn goal(&self) -> &SavingsGoal {
        &self.goal
    }

    pub fn state(&self) -> PeriodState {
        PeriodState {
            inputs: self.inputs.clone(),
            goal: self.goal.clone(),
        }
    }

    pub fn record(&mut self, draft: TransactionDraft) -> Result<TransactionId> {
        self.ledger.record(draft)
    }

    pub fn set_income(&mut self, income: Decimal) -> Result<()> {
        let inputs = PeriodInputs::new(income, self.inputs.carryover_from_prior)?;
        self.commit(PeriodState {
            inputs,
            goal: self.goal.clone(),
        })
    }

    pub fn set_carryover(&mut self, carryover: Decimal) -> Result<()> {
        let inputs = PeriodInputs::new(self.inputs.income_amount, carryover)?;
        self.commit(PeriodState {
            inputs,
            goal: self.goal.clone(),
        })
    }

    /// Replaces the goal name and target, keeping the saved balance.
    pub fn set_goal(&mut self, name: &str, target: Decimal) -> Result<()> {
        let goal = SavingsGoal::new(name, target, self.goal.current_saved_amount)?;
        self.commit(PeriodState {
            inputs: self.inputs.clone(),
            goal,
        })
    }

    pub fn set_saved(&mut self, saved: Decimal) -> Result<()> {
        let goal = self.goal.with_saved(saved)?;
        self.commit(PeriodState {
            inputs: self.inputs.clone(),
            goal,
        })
    }

    /// Goal restored by [`BudgetSession::reset`].
    pub fn set_default_goal(&mut self, goal: SavingsGoal) {
        self.default_goal = goal;
    }

    /// Empties the ledger without touching inputs or goal.
    pub fn clear_transactions(&mut self) -> Result<()> {
        self.ledger.clear()
    }

    pub fn summary(&self) -> PeriodReport {
        SummaryService::summarize(&self.ledger, &self.inputs, &self.goal)
    }

    /// Clears the ledger and restores default inputs and goal.
    pub fn reset(&mut self) -> Result<()> {
        let next = PeriodState {
            inputs: PeriodInputs::default(),
            goal: self.default_goal.clone(),
        };
        self.close_period(next)?;
        tracing::info!("session reset to defaults");
        Ok(())
    }

    /// Closes the current period: returns its report, clears the ledger and
    /// carries a positive leftover into the next period. Income is kept.
    pub fn rollover(&mut self) -> Result<PeriodReport> {
        let closing = self.summary();
        let carryover = closing.leftover.max(Decimal::ZERO);
        let next = PeriodState {
            inputs: PeriodInputs::new(self.inputs.income_amount, carryover)?,
            goal: self.goal.clone(),
        };
        self.close_period(next)?;
        tracing::info!(%carryover, "period rolled over");
        Ok(closing)
    }

    fn commit(&mut self, next: PeriodState) -> Result<()> {
        self.periods.save_period(&next)?;
        self.inputs = next.inputs;
        self.goal = next.goal;
        Ok(())
    }

    /// Writes the next period, then clears the ledger. A failed clear puts
    /// the previous period back on disk.
    fn close_period(&mut self, next: PeriodState) -> Result<()> {
        let previous = self.state();
        self.periods.save_period(&next)?;
        if let Err(err) = self.ledger.clear() {
            return Err(self.restore_period(&previous, err));
        }
        self.inputs = next.inputs;
        self.goal = next.goal;
        Ok(())
    }

    fn restore_period(&self, previous: &PeriodState, cause: BudgetError) -> BudgetError {
        match self.periods.save_period(previous) {
            Ok(()) => {
                tracing::warn!(error = %cause, "period close aborted; previous period restored");
                cause
            }
            Err(restore) => {
                tracing::error!(error = %cause, %restore, "period close left files out of step");
                BudgetError::Inconsistent(format!(
                    "{}; restoring the previous period also failed: {}",
                    cause, restore
                ))
            }
        }
    }
}

impl std::fmt::Debug for BudgetSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BudgetSession")
            .field("ledger", &self.ledger)
            .field("inputs", &self.inputs)
            .field("goal", &self.goal)
            .finish_non_exhaustive()
    }
}
