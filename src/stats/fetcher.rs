//! Snapshot fetching
//!
//! Pulls global counters plus a trailing window of recent blocks and reduces
//! them into one [`StatsSnapshot`]. Counter failures abort the fetch; block
//! failures only degrade the average.

use chrono::Utc;
use futures::future::join_all;

use super::SnapshotSource;
use super::snapshot::StatsSnapshot;
use crate::config::SamplingConfig;
use crate::error::StatsError;
use crate::ledger::LedgerClient;

/// Mean transactions per block over `window` samples
///
/// Samples missing from `counts` are treated as zero, so the divisor is
/// always the full window.
pub fn average_transactions(counts: &[u64], window: u32) -> f64 {
    if window == 0 {
        return 0.0;
    }
    let total: u64 = counts.iter().sum();
    total as f64 / window as f64
}

/// `floor(total * percent / 100)` without going through floating point
pub fn estimate_active_accounts(total_accounts: u64, percent: u8) -> u64 {
    (total_accounts as u128 * percent as u128 / 100) as u64
}

/// Heights of the trailing window, newest first; heights below 1 are dropped
fn window_heights(head: u64, window: u32) -> impl Iterator<Item = u64> {
    (0..window as u64)
        .filter_map(move |offset| head.checked_sub(offset))
        .filter(|height| *height >= 1)
}

/// Builds snapshots from a ledger client
pub struct SnapshotFetcher<C> {
    client: C,
    sampling: SamplingConfig,
}

impl<C: LedgerClient> SnapshotFetcher<C> {
    pub fn new(client: C, sampling: SamplingConfig) -> Self {
        Self { client, sampling }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn sampling(&self) -> SamplingConfig {
        self.sampling
    }

    /// Fetch and reduce one snapshot
    pub async fn fetch_snapshot(&self) -> Result<StatsSnapshot, StatsError> {
        let (properties, total_accounts) = futures::try_join!(
            self.client.get_global_properties(),
            self.client.get_account_count()
        )?;

        let counts = self.sample_window(properties.head_block_number).await;
        let average = average_transactions(&counts, self.sampling.window_size);

        log::debug!(
            "Sampled {} blocks below head {}: average {:.2} transactions",
            counts.len(),
            properties.head_block_number,
            average
        );

        Ok(StatsSnapshot {
            total_accounts,
            total_posts: properties.post_count,
            active_accounts: estimate_active_accounts(
                total_accounts,
                self.sampling.active_account_percent,
            ),
            average_transactions: average,
            timestamp: Utc::now(),
        })
    }

    /// Transaction counts of the trailing window, fetched concurrently
    ///
    /// Every lookup settles before this returns. Unavailable or failed blocks
    /// count as zero.
    async fn sample_window(&self, head: u64) -> Vec<u64> {
        let lookups = window_heights(head, self.sampling.window_size).map(|height| async move {
            match self.client.get_block(height).await {
                Ok(Some(block)) => block.transaction_count(),
                Ok(None) => {
                    log::debug!("Block {} unavailable, counting 0 transactions", height);
                    0
                }
                Err(e) => {
                    log::warn!("Block {} lookup failed, counting 0 transactions: {}", height, e);
                    0
                }
            }
        });

        join_all(lookups).await
    }
}

impl<C> SnapshotSource for SnapshotFetcher<C>
where
    C: LedgerClient + 'static,
{
    async fn fetch(&self) -> Result<StatsSnapshot, StatsError> {
        self.fetch_snapshot().await
    }
}

#[cfg(test)]
#[path = "fetcher_tests.rs"]
mod fetcher_tests;
