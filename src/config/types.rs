// Configuration type definitions

use serde::Deserialize;

use crate::refresh::RefreshPeriod;

pub const DEFAULT_ENDPOINTS: [&str; 2] = ["https://api.hive.blog", "https://api.hivekings.com"];
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Trailing blocks sampled per fetch
pub const DEFAULT_WINDOW_SIZE: u32 = 10;
/// Upper bound on the window; each sampled block is one concurrent request
pub const MAX_WINDOW_SIZE: u32 = 1000;
/// Share of all accounts reported as active (heuristic, not measured)
pub const DEFAULT_ACTIVE_ACCOUNT_PERCENT: u8 = 15;

fn default_endpoints() -> Vec<String> {
    DEFAULT_ENDPOINTS.iter().map(|e| e.to_string()).collect()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_window_size() -> u32 {
    DEFAULT_WINDOW_SIZE
}

fn default_active_account_percent() -> u8 {
    DEFAULT_ACTIVE_ACCOUNT_PERCENT
}

fn default_auto_refresh() -> bool {
    true
}

/// Ledger endpoint configuration section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LedgerConfig {
    /// Node URLs, tried in order
    #[serde(default = "default_endpoints")]
    pub endpoints: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        LedgerConfig {
            endpoints: default_endpoints(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Block sampling and estimation configuration section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SamplingConfig {
    #[serde(default = "default_window_size")]
    pub window_size: u32,
    #[serde(default = "default_active_account_percent")]
    pub active_account_percent: u8,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        SamplingConfig {
            window_size: DEFAULT_WINDOW_SIZE,
            active_account_percent: DEFAULT_ACTIVE_ACCOUNT_PERCENT,
        }
    }
}

/// Refresh scheduling configuration section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RefreshConfig {
    #[serde(default = "default_auto_refresh")]
    pub auto_refresh: bool,
    #[serde(default)]
    pub period: RefreshPeriod,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        RefreshConfig {
            auto_refresh: true,
            period: RefreshPeriod::default(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub sampling: SamplingConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
}
