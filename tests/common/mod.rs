#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use bucket_budget::domain::{Bucket, Frequency, TransactionDraft};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh data directory that outlives the calling test.
pub fn temp_data_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn draft(
    description: &str,
    bucket: Bucket,
    amount: Decimal,
    frequency: Frequency,
) -> TransactionDraft {
    TransactionDraft::new(
        description,
        bucket,
        amount,
        frequency,
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
    )
}
