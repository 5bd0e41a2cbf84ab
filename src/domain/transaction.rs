//! Ledger transaction records and the entry draft that produces them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    bucket::Bucket,
    common::{ensure_within_limit, Displayable, Identifiable},
    frequency::Frequency,
};
use crate::errors::{BudgetError, Result};

pub type TransactionId = Uuid;

/// Raw entry tuple supplied by an entry form.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub description: String,
    pub bucket: Bucket,
    pub amount: Decimal,
    pub frequency: Frequency,
    pub date: NaiveDate,
}

impl TransactionDraft {
    pub fn new(
        description: impl Into<String>,
        bucket: Bucket,
        amount: Decimal,
        frequency: Frequency,
        date: NaiveDate,
    ) -> Self {
        Self {
            description: description.into(),
            bucket,
            amount,
            frequency,
            date,
        }
    }

    /// Rejects empty descriptions, non-positive amounts and amounts above
    /// [`MAX_AMOUNT`](crate::domain::MAX_AMOUNT).
    pub fn validate(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(BudgetError::validation("description cannot be empty"));
        }
        if self.amount <= Decimal::ZERO {
            return Err(BudgetError::validation(format!(
                "amount must be greater than 0 (got {})",
                self.amount
            )));
        }
        ensure_within_limit("amount", self.amount)?;
        self.frequency.checked_normalize(self.amount).ok_or_else(|| {
            BudgetError::validation(format!("amount {} is out of range", self.amount))
        })?;
        Ok(())
    }
}

/// An immutable, recorded expense.
///
/// The raw entered amount and its frequency are kept alongside the
/// fortnightly-equivalent amount; only the latter participates in totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TransactionRecord", into = "TransactionRecord")]
pub struct Transaction {
    id: TransactionId,
    date: NaiveDate,
    description: String,
    bucket: Bucket,
    amount: Decimal,
    frequency: Frequency,
    normalized_amount: Decimal,
}

impl Transaction {
    /// Builds a transaction from an already validated draft.
    pub(crate) fn from_draft(draft: TransactionDraft) -> Self {
        Self::assemble(
            Uuid::new_v4(),
            draft.date,
            draft.description.trim().to_string(),
            draft.bucket,
            draft.amount,
            draft.frequency,
        )
    }

    fn assemble(
        id: TransactionId,
        date: NaiveDate,
        description: String,
        bucket: Bucket,
        amount: Decimal,
        frequency: Frequency,
    ) -> Self {
        Self {
            id,
            date,
            description,
            bucket,
            amount,
            frequency,
            normalized_amount: frequency.normalize(amount),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn bucket(&self) -> Bucket {
        self.bucket
    }

    /// Amount as entered, at [`Transaction::frequency`] cadence.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Fortnightly-equivalent amount.
    pub fn normalized_amount(&self) -> Decimal {
        self.normalized_amount
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("{} [{}]", self.description, self.bucket)
    }
}

/// Persisted layout of a transaction: one record per entry with the bucket
/// stored under `category` and the raw entered amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TransactionRecord {
    id: TransactionId,
    date: NaiveDate,
    description: String,
    category: Bucket,
    amount: Decimal,
    #[serde(default)]
    frequency: Frequency,
}

/// Stored records go through the same checks as new entries.
impl TryFrom<TransactionRecord> for Transaction {
    type Error = BudgetError;

    fn try_from(record: TransactionRecord) -> Result<Self> {
        let draft = TransactionDraft::new(
            record.description,
            record.category,
            record.amount,
            record.frequency,
            record.date,
        );
        draft.validate().map_err(|err| {
            BudgetError::storage(format!("transaction {}: {}", record.id, err))
        })?;
        Ok(Transaction::assemble(
            record.id,
            draft.date,
            draft.description,
            draft.bucket,
            draft.amount,
            draft.frequency,
        ))
    }
}

impl From<Transaction> for TransactionRecord {
    fn from(txn: Transaction) -> Self {
        Self {
            id: txn.id,
            date: txn.date,
            description: txn.description,
            category: txn.bucket,
            amount: txn.amount,
            frequency: txn.frequency,
        }
    }
}
