//! The bucket-tagged transaction log and its aggregates.

#[allow(clippy::module_inception)]
pub mod ledger;
pub mod totals;

pub use ledger::Ledger;
pub use totals::BucketTotals;
