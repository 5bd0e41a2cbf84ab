pub mod bucket;
pub mod common;
pub mod frequency;
pub mod period;
pub mod transaction;

pub use bucket::Bucket;
pub use common::{Displayable, Identifiable, MAX_AMOUNT};
pub use frequency::{normalize, normalize_label, Frequency};
pub use period::{PeriodInputs, PeriodState, SavingsGoal};
pub use transaction::{Transaction, TransactionDraft, TransactionId};
