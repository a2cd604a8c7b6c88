use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by a ledger fetch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// Transport or connectivity failure reaching the ledger endpoint
    #[error("Network error: {0}")]
    Network(String),

    /// Malformed or unexpected response from a required call
    #[error("Protocol error: {0}")]
    Protocol(String),
}

/// Coarse classification of a [`StatsError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Protocol,
}

impl StatsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StatsError::Network(_) => ErrorKind::Network,
            StatsError::Protocol(_) => ErrorKind::Protocol,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            StatsError::Network(message) | StatsError::Protocol(message) => message,
        }
    }
}

/// Errors raised while loading or validating the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
