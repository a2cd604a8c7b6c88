//! Snapshot type definitions

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One immutable set of aggregated ledger metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total_accounts: u64,
    pub total_posts: u64,
    /// Estimate derived from `total_accounts`, not a measured quantity
    pub active_accounts: u64,
    /// Mean transactions per block over the sampled window
    pub average_transactions: f64,
    /// When the fetch that produced this snapshot completed
    pub timestamp: DateTime<Utc>,
}

/// A numeric metric of a snapshot, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    TotalAccounts,
    ActiveAccounts,
    TotalPosts,
    AverageTransactions,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::TotalAccounts,
        Metric::ActiveAccounts,
        Metric::TotalPosts,
        Metric::AverageTransactions,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Metric::TotalAccounts => "Total Accounts",
            Metric::ActiveAccounts => "Active Accounts",
            Metric::TotalPosts => "Total Posts",
            Metric::AverageTransactions => "Avg Transactions",
        }
    }
}

impl StatsSnapshot {
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::TotalAccounts => self.total_accounts as f64,
            Metric::ActiveAccounts => self.active_accounts as f64,
            Metric::TotalPosts => self.total_posts as f64,
            Metric::AverageTransactions => self.average_transactions,
        }
    }
}
