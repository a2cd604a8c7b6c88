//! Ledger statistics: snapshots, their reduction from raw ledger data, and
//! period-over-period deltas.

mod delta;
mod fetcher;
mod snapshot;

use std::future::Future;
use std::sync::Arc;

pub use delta::{DeltaView, Trend, percent_change};
pub use fetcher::{SnapshotFetcher, average_transactions, estimate_active_accounts};
pub use snapshot::{Metric, StatsSnapshot};

use crate::error::StatsError;

/// Anything that can produce a fresh snapshot on demand
pub trait SnapshotSource: Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = Result<StatsSnapshot, StatsError>> + Send;
}

impl<T: SnapshotSource> SnapshotSource for Arc<T> {
    fn fetch(&self) -> impl Future<Output = Result<StatsSnapshot, StatsError>> + Send {
        T::fetch(self)
    }
}
