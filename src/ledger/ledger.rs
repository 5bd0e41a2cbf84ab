use std::fmt;

use rust_decimal::Decimal;

use crate::domain::{Identifiable, Transaction, TransactionDraft, TransactionId};
use crate::errors::{BudgetError, Result};
use crate::storage::{MemoryStore, TransactionStore};

use super::totals::BucketTotals;

/// Append-only transaction log for the current period.
///
/// The ledger exclusively owns its transactions. Mutations go through the
/// storage adapter first; if the adapter fails, in-memory state is unchanged.
pub struct Ledger {
    transactions: Vec<Transaction>,
    store: Box<dyn TransactionStore>,
}

impl Ledger {
    /// Hydrates a ledger from the given store.
    pub fn open(store: impl TransactionStore + 'static) -> Result<Self> {
        let transactions = store.load()?;
        tracing::debug!(count = transactions.len(), "ledger hydrated");
        Ok(Self {
            transactions,
            store: Box::new(store),
        })
    }

    /// Ledger over a fresh, empty in-memory store.
    pub fn in_memory() -> Self {
        Self {
            transactions: Vec::new(),
            store: Box::new(MemoryStore::new()),
        }
    }

    /// Validates, normalizes and appends an entry, returning its identifier.
    pub fn record(&mut self, draft: TransactionDraft) -> Result<TransactionId> {
        draft.validate()?;
        let txn = Transaction::from_draft(draft);
        let id = txn.id();
        let bucket = txn.bucket();
        let normalized = txn.normalized_amount();
        if self.totals_by_bucket().checked_add(bucket, normalized).is_none() {
            return Err(BudgetError::validation(format!(
                "recording {} would overflow the {} total",
                normalized, bucket
            )));
        }

        self.transactions.push(txn);
        if let Err(err) = self.store.save(&self.transactions) {
            self.transactions.pop();
            tracing::warn!(error = %err, "record aborted by storage failure");
            return Err(err);
        }

        tracing::info!(%id, %bucket, %normalized, "transaction recorded");
        Ok(id)
    }

    /// Sums of normalized amounts grouped by bucket.
    pub fn totals_by_bucket(&self) -> BucketTotals {
        self.transactions
            .iter()
            .fold(BucketTotals::default(), |mut totals, txn| {
                totals.add(txn.bucket(), txn.normalized_amount());
                totals
            })
    }

    pub fn total_spent(&self) -> Decimal {
        self.totals_by_bucket().total()
    }

    /// Transactions in insertion order.
    pub fn all_transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id() == id)
    }

    /// Irreversibly removes every transaction.
    pub fn clear(&mut self) -> Result<()> {
        self.store.save(&[])?;
        let removed = self.transactions.len();
        self.transactions.clear();
        tracing::info!(removed, "ledger cleared");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("transactions", &self.transactions.len())
            .finish_non_exhaustive()
    }
}
