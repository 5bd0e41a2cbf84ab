//! Fixed-weight split of the period pool into bucket targets.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::Bucket;

/// Share of the total pool assigned to each bucket. The weights sum to 1.
pub const BUCKET_WEIGHTS: [(Bucket, Decimal); 3] = [
    (Bucket::Essential, dec!(0.50)),
    (Bucket::Discretionary, dec!(0.30)),
    (Bucket::Temporary, dec!(0.20)),
];

pub fn weight(bucket: Bucket) -> Decimal {
    BUCKET_WEIGHTS[bucket.index()].1
}

/// Target budget per bucket for one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub essential: Decimal,
    pub discretionary: Decimal,
    pub temporary: Decimal,
}

impl Allocation {
    pub fn target(&self, bucket: Bucket) -> Decimal {
        match bucket {
            Bucket::Essential => self.essential,
            Bucket::Discretionary => self.discretionary,
            Bucket::Temporary => self.temporary,
        }
    }

    /// Targets in fixed bucket order.
    pub fn iter(&self) -> impl Iterator<Item = (Bucket, Decimal)> + '_ {
        Bucket::ALL
            .into_iter()
            .map(move |bucket| (bucket, self.target(bucket)))
    }

    pub fn total(&self) -> Decimal {
        self.essential + self.discretionary + self.temporary
    }
}

pub struct AllocationService;

impl AllocationService {
    /// Splits `total_pool` by [`BUCKET_WEIGHTS`]. No rounding is applied.
    pub fn allocate(total_pool: Decimal) -> Allocation {
        Allocation {
            essential: total_pool * weight(Bucket::Essential),
            discretionary: total_pool * weight(Bucket::Discretionary),
            temporary: total_pool * weight(Bucket::Temporary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_are_exhaustive() {
        let sum: Decimal = BUCKET_WEIGHTS.iter().map(|(_, weight)| *weight).sum();
        assert_eq!(sum, Decimal::ONE);
        for (idx, (bucket, _)) in BUCKET_WEIGHTS.iter().enumerate() {
            assert_eq!(Bucket::ALL[idx], *bucket);
        }
    }

    #[test]
    fn splits_2500_into_fixed_shares() {
        let allocation = AllocationService::allocate(dec!(2500));
        assert_eq!(allocation.essential, dec!(1250.00));
        assert_eq!(allocation.discretionary, dec!(750.00));
        assert_eq!(allocation.temporary, dec!(500.00));
        assert_eq!(allocation.total(), dec!(2500));
    }

    #[test]
    fn keeps_sub_cent_precision() {
        let allocation = AllocationService::allocate(dec!(0.01));
        assert_eq!(allocation.essential, dec!(0.005));
        assert_eq!(allocation.total(), dec!(0.01));
    }
}
