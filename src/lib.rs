//! Hive blockchain statistics
//!
//! Fetches ledger-wide counters and a window of recent blocks, reduces them
//! into [`stats::StatsSnapshot`]s and keeps them refreshed on a schedule.
//! The terminal [`dashboard`] renders the resulting view model.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod ledger;
pub mod refresh;
pub mod stats;
