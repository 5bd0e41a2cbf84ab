#![doc(test(attr(deny(warnings))))]

//! Bucket Budget splits a fortnightly pool of income across three spending
//! buckets (Essential 50%, Discretionary 30%, Temporary 20%), tracks
//! transactions entered at weekly, fortnightly or monthly cadence against
//! those buckets, and projects the period's leftover into a savings goal.
//!
//! ```
//! use bucket_budget::core::BudgetSession;
//! use bucket_budget::domain::{Bucket, Frequency, TransactionDraft};
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//!
//! let mut session = BudgetSession::in_memory();
//! session.set_income(dec!(2000)).unwrap();
//! session
//!     .record(TransactionDraft::new(
//!         "Rent",
//!         Bucket::Essential,
//!         dec!(1800),
//!         Frequency::Fortnightly,
//!         NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
//!     ))
//!     .unwrap();
//!
//! let report = session.summary();
//! assert_eq!(report.leftover, dec!(200));
//! assert_eq!(report.goal_progress.percent(), dec!(20));
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod export;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Bucket Budget tracing initialized.");
    });
}
