use std::ops::Index;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::Bucket;

/// Per-bucket sums of normalized amounts. Every bucket is always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketTotals {
    values: [Decimal; 3],
}

impl BucketTotals {
    pub fn get(&self, bucket: Bucket) -> Decimal {
        self.values[bucket.index()]
    }

    /// Saturates at `Decimal::MAX`; [`Ledger::record`](super::Ledger::record)
    /// refuses entries that would get there.
    pub(crate) fn add(&mut self, bucket: Bucket, amount: Decimal) {
        let slot = &mut self.values[bucket.index()];
        *slot = slot.saturating_add(amount);
    }

    /// `None` when adding `amount` to `bucket` or to the grand total would
    /// overflow.
    pub(crate) fn checked_add(&self, bucket: Bucket, amount: Decimal) -> Option<Self> {
        let mut next = *self;
        next.values[bucket.index()] = self.values[bucket.index()].checked_add(amount)?;
        next.checked_total()?;
        Some(next)
    }

    pub fn total(&self) -> Decimal {
        self.values
            .iter()
            .fold(Decimal::ZERO, |sum, value| sum.saturating_add(*value))
    }

    fn checked_total(&self) -> Option<Decimal> {
        self.values
            .iter()
            .try_fold(Decimal::ZERO, |sum, value| sum.checked_add(*value))
    }

    /// Totals in fixed bucket order.
    pub fn iter(&self) -> impl Iterator<Item = (Bucket, Decimal)> + '_ {
        Bucket::ALL.into_iter().map(move |bucket| (bucket, self.get(bucket)))
    }
}

impl Index<Bucket> for BucketTotals {
    type Output = Decimal;

    fn index(&self, bucket: Bucket) -> &Self::Output {
        &self.values[bucket.index()]
    }
}
