use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use crate::{
    domain::{PeriodState, Transaction},
    errors::{BudgetError, Result},
};

use super::{PeriodStore, TransactionStore};

/// Ephemeral store backed by shared state.
///
/// Clones share the same contents, so a test can keep a handle while the
/// ledger owns another. Transaction and period writes can each be made to
/// fail on demand.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    transactions: Arc<Mutex<Vec<Transaction>>>,
    period: Arc<Mutex<Option<PeriodState>>>,
    fail_writes: Arc<AtomicBool>,
    fail_period_writes: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: Arc::new(Mutex::new(transactions)),
            ..Self::default()
        }
    }

    /// Makes subsequent transaction `save` calls fail with a storage error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Makes subsequent `save_period` calls fail with a storage error.
    pub fn set_fail_period_writes(&self, fail: bool) {
        self.fail_period_writes.store(fail, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> Result<Vec<Transaction>> {
        self.load()
    }
}

fn poisoned<T>(_: T) -> BudgetError {
    BudgetError::storage("memory store lock poisoned")
}

impl TransactionStore for MemoryStore {
    fn load(&self) -> Result<Vec<Transaction>> {
        let guard = self.transactions.lock().map_err(poisoned)?;
        Ok(guard.clone())
    }

    fn save(&self, transactions: &[Transaction]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BudgetError::storage("memory store rejected write"));
        }
        let mut guard = self.transactions.lock().map_err(poisoned)?;
        *guard = transactions.to_vec();
        Ok(())
    }
}

impl PeriodStore for MemoryStore {
    fn load_period(&self) -> Result<Option<PeriodState>> {
        let guard = self.period.lock().map_err(poisoned)?;
        Ok(guard.clone())
    }

    fn save_period(&self, state: &PeriodState) -> Result<()> {
        if self.fail_period_writes.load(Ordering::SeqCst) {
            return Err(BudgetError::storage("memory store rejected period write"));
        }
        let mut guard = self.period.lock().map_err(poisoned)?;
        *guard = Some(state.clone());
        Ok(())
    }
}
