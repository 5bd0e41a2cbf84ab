mod common;

use bucket_budget::core::services::{AllocationService, GoalService, SummaryService};
use bucket_budget::core::BudgetSession;
use bucket_budget::domain::{
    normalize, normalize_label, Bucket, Frequency, PeriodInputs, SavingsGoal, MAX_AMOUNT,
};
use bucket_budget::errors::BudgetError;
use bucket_budget::ledger::Ledger;
use common::draft;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn pool_of_2500_splits_50_30_20() {
    let inputs = PeriodInputs::new(dec!(2500), Decimal::ZERO).unwrap();
    assert_eq!(inputs.total_pool(), dec!(2500));

    let report = SummaryService::summarize(&Ledger::in_memory(), &inputs, &SavingsGoal::default());
    let target = |bucket| report.allocation(bucket).unwrap().target_amount;
    assert_eq!(target(Bucket::Essential), dec!(1250.00));
    assert_eq!(target(Bucket::Discretionary), dec!(750.00));
    assert_eq!(target(Bucket::Temporary), dec!(500.00));
}

#[test]
fn fortnightly_rent_counts_as_entered() {
    let mut ledger = Ledger::in_memory();
    ledger
        .record(draft("Rent", Bucket::Essential, dec!(600), Frequency::Fortnightly))
        .unwrap();
    assert_eq!(ledger.totals_by_bucket()[Bucket::Essential], dec!(600));
}

#[test]
fn weekly_groceries_double() {
    let mut ledger = Ledger::in_memory();
    let id = ledger
        .record(draft("Groceries", Bucket::Essential, dec!(100), Frequency::Weekly))
        .unwrap();
    assert_eq!(ledger.transaction(id).unwrap().normalized_amount(), dec!(200));
    assert_eq!(ledger.totals_by_bucket()[Bucket::Essential], dec!(200));
}

#[test]
fn leftover_feeds_goal_progress() {
    let mut session = BudgetSession::in_memory();
    session.set_income(dec!(2000)).unwrap();
    session
        .record(draft("Rent", Bucket::Essential, dec!(1800), Frequency::Fortnightly))
        .unwrap();

    let report = session.summary();
    assert_eq!(report.total_pool, dec!(2000));
    assert_eq!(report.total_spent, dec!(1800));
    assert_eq!(report.leftover, dec!(200));
    assert_eq!(report.goal_target, dec!(1000));
    assert_eq!(report.goal_progress.new_saved, dec!(200));
    assert_eq!(report.goal_progress.ratio, dec!(0.2));
}

#[test]
fn invalid_entries_are_rejected() {
    let mut ledger = Ledger::in_memory();
    ledger
        .record(draft("Rent", Bucket::Essential, dec!(600), Frequency::Fortnightly))
        .unwrap();

    let zero = ledger.record(draft("Gym", Bucket::Discretionary, Decimal::ZERO, Frequency::Weekly));
    assert!(matches!(zero, Err(BudgetError::Validation(_))));
    let blank = ledger.record(draft("", Bucket::Discretionary, dec!(20), Frequency::Weekly));
    assert!(matches!(blank, Err(BudgetError::Validation(_))));
    assert_eq!(ledger.len(), 1);
}

#[test]
fn overspend_shows_negative_remaining() {
    let mut session = BudgetSession::in_memory();
    session.set_income(dec!(1000)).unwrap();
    session
        .record(draft("Concert", Bucket::Discretionary, dec!(400), Frequency::Fortnightly))
        .unwrap();

    let report = session.summary();
    let wants = report.allocation(Bucket::Discretionary).unwrap();
    assert_eq!(wants.target_amount, dec!(300));
    assert_eq!(wants.remaining_amount, dec!(-100));
    assert!(!report.is_overspent());
}

#[test]
fn unknown_frequency_labels_pass_through() {
    assert_eq!(normalize_label(dec!(75), "Quarterly"), dec!(75));
    assert_eq!(normalize_label(dec!(75), "weekly"), dec!(150));
}

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn positive_amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn bucket_strategy() -> impl Strategy<Value = Bucket> {
    prop_oneof![
        Just(Bucket::Essential),
        Just(Bucket::Discretionary),
        Just(Bucket::Temporary),
    ]
}

fn frequency_strategy() -> impl Strategy<Value = Frequency> {
    prop_oneof![
        Just(Frequency::Weekly),
        Just(Frequency::Fortnightly),
        Just(Frequency::Monthly),
    ]
}

fn entry_strategy() -> impl Strategy<Value = (Bucket, Decimal, Frequency)> {
    (bucket_strategy(), positive_amount_strategy(), frequency_strategy())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn normalization_follows_fixed_factors(amount in amount_strategy()) {
        prop_assert_eq!(normalize(amount, Frequency::Fortnightly), amount);
        prop_assert_eq!(normalize(amount, Frequency::Weekly), amount * dec!(2));

        let monthly = normalize(amount, Frequency::Monthly);
        let drift = (monthly * dec!(2.1667) - amount).abs();
        prop_assert!(drift < dec!(0.000001), "drift {} too large", drift);
    }

    #[test]
    fn allocation_is_exhaustive(pool in amount_strategy()) {
        let allocation = AllocationService::allocate(pool);
        prop_assert_eq!(allocation.total(), pool);
        prop_assert_eq!(allocation.target(Bucket::Essential), pool * dec!(0.50));
        prop_assert_eq!(allocation.target(Bucket::Discretionary), pool * dec!(0.30));
        prop_assert_eq!(allocation.target(Bucket::Temporary), pool * dec!(0.20));
    }

    #[test]
    fn summarize_is_idempotent(
        income in amount_strategy(),
        entries in prop::collection::vec(entry_strategy(), 0..20),
    ) {
        let mut session = BudgetSession::in_memory();
        session.set_income(income).unwrap();
        for (bucket, amount, frequency) in entries {
            session.record(draft("Entry", bucket, amount, frequency)).unwrap();
        }
        prop_assert_eq!(session.summary(), session.summary());
    }

    #[test]
    fn non_positive_target_has_zero_ratio(
        saved in amount_strategy(),
        leftover in (-1_000_000i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2)),
        target in (-1_000_000i64..=0i64).prop_map(|n| Decimal::new(n, 2)),
    ) {
        let progress = GoalService::progress(saved, leftover, target);
        prop_assert_eq!(progress.ratio, Decimal::ZERO);
        prop_assert_eq!(progress.new_saved, saved + leftover);
    }

    #[test]
    fn clear_empties_every_bucket(entries in prop::collection::vec(entry_strategy(), 1..20)) {
        let mut ledger = Ledger::in_memory();
        for (bucket, amount, frequency) in entries {
            ledger.record(draft("Entry", bucket, amount, frequency)).unwrap();
        }
        ledger.clear().unwrap();
        prop_assert!(ledger.all_transactions().is_empty());
        for bucket in Bucket::ALL {
            prop_assert_eq!(ledger.totals_by_bucket()[bucket], Decimal::ZERO);
        }
    }

    #[test]
    fn any_entry_amount_records_or_is_rejected(
        lo in any::<u32>(),
        mid in any::<u32>(),
        hi in any::<u32>(),
        scale in 0u32..=28,
        frequency in frequency_strategy(),
    ) {
        let amount = Decimal::from_parts(lo, mid, hi, false, scale);
        let mut session = BudgetSession::in_memory();
        let accepted = session
            .record(draft("Entry", Bucket::Essential, amount, frequency))
            .is_ok();
        prop_assert_eq!(accepted, amount > Decimal::ZERO && amount <= MAX_AMOUNT);
        let report = session.summary();
        prop_assert!(report.goal_progress.ratio <= Decimal::ONE);
    }
}
