//! Period-over-period change between two snapshots

use std::fmt;

use super::snapshot::{Metric, StatsSnapshot};

/// Percentage change from `previous` to `current`, rounded to one decimal
///
/// Zero when there is no previous value or it is zero.
pub fn percent_change(current: f64, previous: Option<f64>) -> f64 {
    match previous {
        Some(previous) if previous != 0.0 => round1((current - previous) / previous * 100.0),
        _ => 0.0,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Direction of a change, for arrow rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub fn of(change: f64) -> Self {
        if change > 0.0 {
            Trend::Up
        } else if change < 0.0 {
            Trend::Down
        } else {
            Trend::Flat
        }
    }

    pub fn arrow(self) -> char {
        match self {
            Trend::Up => '↑',
            Trend::Down => '↓',
            Trend::Flat => '→',
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.arrow())
    }
}

/// Percent change per metric between the two most recent snapshots
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DeltaView {
    pub total_accounts: f64,
    pub total_posts: f64,
    pub active_accounts: f64,
    pub average_transactions: f64,
}

impl DeltaView {
    /// All zeros when `current` is absent
    pub fn between(current: Option<&StatsSnapshot>, previous: Option<&StatsSnapshot>) -> Self {
        let Some(current) = current else {
            return DeltaView::default();
        };

        let change = |metric: Metric| {
            percent_change(current.value(metric), previous.map(|p| p.value(metric)))
        };

        DeltaView {
            total_accounts: change(Metric::TotalAccounts),
            total_posts: change(Metric::TotalPosts),
            active_accounts: change(Metric::ActiveAccounts),
            average_transactions: change(Metric::AverageTransactions),
        }
    }

    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::TotalAccounts => self.total_accounts,
            Metric::ActiveAccounts => self.active_accounts,
            Metric::TotalPosts => self.total_posts,
            Metric::AverageTransactions => self.average_transactions,
        }
    }
}

#[cfg(test)]
#[path = "delta_tests.rs"]
mod delta_tests;
