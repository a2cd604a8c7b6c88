//! Ledger query interface
//!
//! The fetcher only talks to the ledger through [`LedgerClient`], so the
//! transport can be swapped for a test double.

mod hive;

use std::future::Future;

use serde::Deserialize;

pub use hive::HiveClient;

use crate::error::StatsError;

/// Global chain counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct GlobalProperties {
    pub head_block_number: u64,
    /// Some nodes no longer report this counter; treat it as zero when missing
    #[serde(default)]
    pub post_count: u64,
}

/// A block, reduced to what the stats need
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub transactions: Vec<serde_json::Value>,
}

impl Block {
    pub fn transaction_count(&self) -> u64 {
        self.transactions.len() as u64
    }
}

/// Read-only query surface of a ledger node
pub trait LedgerClient: Send + Sync {
    fn get_global_properties(
        &self,
    ) -> impl Future<Output = Result<GlobalProperties, StatsError>> + Send;

    fn get_account_count(&self) -> impl Future<Output = Result<u64, StatsError>> + Send;

    /// `Ok(None)` when the node does not have the block
    fn get_block(
        &self,
        height: u64,
    ) -> impl Future<Output = Result<Option<Block>, StatsError>> + Send;
}
