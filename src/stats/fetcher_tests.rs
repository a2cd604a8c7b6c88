//! Tests for snapshot fetching and window reduction

use proptest::prelude::*;

use super::*;
use crate::test_utils::test_helpers::{FakeLedger, network_error};

fn default_sampling() -> SamplingConfig {
    SamplingConfig::default()
}

#[test]
fn test_average_over_full_window() {
    assert_eq!(average_transactions(&[3, 0, 5, 2, 0, 1, 4, 0, 0, 2], 10), 1.7);
}

#[test]
fn test_average_treats_missing_samples_as_zero() {
    // Only 3 of 10 samples present
    assert_eq!(average_transactions(&[10, 10, 10], 10), 3.0);
}

#[test]
fn test_average_with_empty_window() {
    assert_eq!(average_transactions(&[], 10), 0.0);
    assert_eq!(average_transactions(&[], 0), 0.0);
}

#[test]
fn test_active_accounts_estimate() {
    assert_eq!(estimate_active_accounts(1000, 15), 150);
    assert_eq!(estimate_active_accounts(7, 15), 1);
    assert_eq!(estimate_active_accounts(6, 15), 0);
    assert_eq!(estimate_active_accounts(0, 15), 0);
}

#[test]
fn test_active_accounts_estimate_does_not_overflow() {
    assert_eq!(estimate_active_accounts(u64::MAX, 100), u64::MAX);
}

#[test]
fn test_window_heights_newest_first() {
    let heights: Vec<u64> = window_heights(100, 3).collect();
    assert_eq!(heights, vec![100, 99, 98]);
}

#[test]
fn test_window_heights_stop_at_genesis() {
    let heights: Vec<u64> = window_heights(3, 10).collect();
    assert_eq!(heights, vec![3, 2, 1]);
    assert_eq!(window_heights(0, 10).count(), 0);
}

// Property: active accounts are exactly floor(15% of total) for any total
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_active_accounts_is_floor_of_fifteen_percent(total in 0u64..u64::MAX / 100) {
        let active = estimate_active_accounts(total, 15);
        prop_assert!(active * 100 <= total * 15);
        prop_assert!((active + 1) * 100 > total * 15);
    }
}

// Property: the average always divides by the window, never by the sample count
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_average_divides_by_window(
        counts in prop::collection::vec(0u64..500, 0..10),
        window in 10u32..20
    ) {
        let total: u64 = counts.iter().sum();
        let average = average_transactions(&counts, window);
        prop_assert_eq!(average, total as f64 / window as f64);
    }
}

#[tokio::test]
async fn test_fetch_builds_snapshot() {
    let ledger = FakeLedger::new(500, 42_000, 1000)
        .with_block(500, 3)
        .with_block(499, 0)
        .with_block(498, 5)
        .with_block(497, 2)
        .with_block(496, 0)
        .with_block(495, 1)
        .with_block(494, 4)
        // 493 is unavailable
        .with_block(492, 0)
        .with_block(491, 2);
    let fetcher = SnapshotFetcher::new(ledger, default_sampling());

    let before = Utc::now();
    let snapshot = fetcher.fetch_snapshot().await.unwrap();

    assert_eq!(snapshot.total_accounts, 1000);
    assert_eq!(snapshot.total_posts, 42_000);
    assert_eq!(snapshot.active_accounts, 150);
    assert_eq!(snapshot.average_transactions, 1.7);
    assert!(snapshot.timestamp >= before);
}

#[tokio::test]
async fn test_fetch_requests_exactly_the_trailing_window() {
    let fetcher = SnapshotFetcher::new(FakeLedger::new(500, 0, 0), default_sampling());
    fetcher.fetch_snapshot().await.unwrap();

    let expected: Vec<u64> = (491..=500).collect();
    assert_eq!(fetcher.client().requested_heights(), expected);
}

#[tokio::test]
async fn test_failed_blocks_degrade_average() {
    let ledger = FakeLedger::new(20, 0, 0)
        .with_block(20, 10)
        .with_failing_block(19)
        .with_failing_block(18)
        .with_block(17, 10);
    let fetcher = SnapshotFetcher::new(ledger, default_sampling());

    let snapshot = fetcher.fetch_snapshot().await.unwrap();
    assert_eq!(snapshot.average_transactions, 2.0);
}

#[tokio::test]
async fn test_short_chain_still_divides_by_window() {
    let ledger = FakeLedger::new(2, 0, 0).with_block(2, 6).with_block(1, 4);
    let fetcher = SnapshotFetcher::new(ledger, default_sampling());

    let snapshot = fetcher.fetch_snapshot().await.unwrap();
    assert_eq!(snapshot.average_transactions, 1.0);
    assert_eq!(fetcher.client().requested_heights(), vec![1, 2]);
}

#[tokio::test]
async fn test_properties_failure_fails_fetch() {
    let mut ledger = FakeLedger::new(100, 0, 1000);
    ledger.properties = Err(network_error());
    let fetcher = SnapshotFetcher::new(ledger, default_sampling());

    assert_eq!(fetcher.fetch_snapshot().await, Err(network_error()));
}

#[tokio::test]
async fn test_account_count_failure_fails_fetch() {
    let mut ledger = FakeLedger::new(100, 0, 1000);
    ledger.account_count = Err(StatsError::Protocol("bad count".to_string()));
    let fetcher = SnapshotFetcher::new(ledger, default_sampling());

    let err = fetcher.fetch_snapshot().await.unwrap_err();
    assert_eq!(err.kind(), crate::error::ErrorKind::Protocol);
}

#[tokio::test]
async fn test_custom_sampling() {
    let ledger = FakeLedger::new(10, 0, 200).with_block(10, 4).with_block(9, 2);
    let sampling = SamplingConfig {
        window_size: 2,
        active_account_percent: 50,
    };
    let fetcher = SnapshotFetcher::new(ledger, sampling);

    let snapshot = fetcher.fetch_snapshot().await.unwrap();
    assert_eq!(snapshot.active_accounts, 100);
    assert_eq!(snapshot.average_transactions, 3.0);
    assert_eq!(fetcher.client().requested_heights(), vec![9, 10]);
}

#[tokio::test]
async fn test_fetcher_is_a_snapshot_source() {
    let fetcher = SnapshotFetcher::new(FakeLedger::new(1, 5, 20), default_sampling());
    let snapshot = SnapshotSource::fetch(&fetcher).await.unwrap();
    assert_eq!(snapshot.total_posts, 5);
}
