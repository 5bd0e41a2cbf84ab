use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Bucket, PeriodInputs, SavingsGoal};
use crate::export::StatementFields;
use crate::ledger::Ledger;

use super::allocation_service::AllocationService;
use super::goal_service::{GoalProgress, GoalService};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketAllocation {
    pub bucket: Bucket,
    pub target_amount: Decimal,
    pub spent_amount: Decimal,
    pub remaining_amount: Decimal,
}

/// Everything the presentation layer needs for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodReport {
    pub total_pool: Decimal,
    pub total_spent: Decimal,
    pub leftover: Decimal,
    /// Essential, Discretionary, Temporary.
    pub per_bucket: Vec<BucketAllocation>,
    pub goal_name: String,
    pub goal_target: Decimal,
    pub goal_progress: GoalProgress,
}

impl PeriodReport {
    pub fn allocation(&self, bucket: Bucket) -> Option<&BucketAllocation> {
        self.per_bucket.iter().find(|entry| entry.bucket == bucket)
    }

    pub fn is_overspent(&self) -> bool {
        self.leftover < Decimal::ZERO
    }

    pub fn statement_fields(&self, generated_at: DateTime<Utc>) -> StatementFields {
        StatementFields {
            total_pool: self.total_pool,
            total_spent: self.total_spent,
            leftover: self.leftover,
            generated_at,
        }
    }
}

pub struct SummaryService;

impl SummaryService {
    /// Builds a fresh report from the ledger's current contents. Nothing is
    /// cached between calls.
    pub fn summarize(ledger: &Ledger, inputs: &PeriodInputs, goal: &SavingsGoal) -> PeriodReport {
        let total_pool = inputs.total_pool();
        let totals = ledger.totals_by_bucket();
        let allocation = AllocationService::allocate(total_pool);

        let per_bucket = allocation
            .iter()
            .map(|(bucket, target_amount)| {
                let spent_amount = totals.get(bucket);
                BucketAllocation {
                    bucket,
                    target_amount,
                    spent_amount,
                    remaining_amount: target_amount.saturating_sub(spent_amount),
                }
            })
            .collect();

        let total_spent = totals.total();
        let leftover = total_pool.saturating_sub(total_spent);
        let goal_progress =
            GoalService::progress(goal.current_saved_amount, leftover, goal.target_amount);

        PeriodReport {
            total_pool,
            total_spent,
            leftover,
            per_bucket,
            goal_name: goal.name.clone(),
            goal_target: goal.target_amount,
            goal_progress,
        }
    }
}
