pub mod json_backend;
pub mod memory;

use crate::{
    domain::{PeriodState, Transaction},
    errors::Result,
};

/// Abstraction over persistence backends capable of hydrating and persisting
/// the transaction log.
///
/// `save` replaces the stored log with the given ordered sequence. A failed
/// save must leave the previously stored log intact.
pub trait TransactionStore: Send + Sync {
    fn load(&self) -> Result<Vec<Transaction>>;
    fn save(&self, transactions: &[Transaction]) -> Result<()>;
}

impl<S: TransactionStore + ?Sized> TransactionStore for Box<S> {
    fn load(&self) -> Result<Vec<Transaction>> {
        (**self).load()
    }

    fn save(&self, transactions: &[Transaction]) -> Result<()> {
        (**self).save(transactions)
    }
}

/// Persistence for the period inputs and savings goal.
///
/// `load_period` returns `None` when nothing has been saved yet and rejects
/// stored state that fails domain validation. A failed `save_period` must
/// leave the previously stored state intact.
pub trait PeriodStore: Send + Sync {
    fn load_period(&self) -> Result<Option<PeriodState>>;
    fn save_period(&self, state: &PeriodState) -> Result<()>;
}

impl<S: PeriodStore + ?Sized> PeriodStore for Box<S> {
    fn load_period(&self) -> Result<Option<PeriodState>> {
        (**self).load_period()
    }

    fn save_period(&self, state: &PeriodState) -> Result<()> {
        (**self).save_period(state)
    }
}

pub use json_backend::{JsonStorage, TRANSACTIONS_SCHEMA_VERSION};
pub use memory::MemoryStore;
