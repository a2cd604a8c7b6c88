//! Refresh period options

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Interval between automatic polls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RefreshPeriod {
    #[default]
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "30m")]
    ThirtyMinutes,
}

impl RefreshPeriod {
    /// All options, shortest first
    pub const ALL: [RefreshPeriod; 4] = [
        RefreshPeriod::OneMinute,
        RefreshPeriod::FiveMinutes,
        RefreshPeriod::FifteenMinutes,
        RefreshPeriod::ThirtyMinutes,
    ];

    pub fn minutes(self) -> u64 {
        match self {
            RefreshPeriod::OneMinute => 1,
            RefreshPeriod::FiveMinutes => 5,
            RefreshPeriod::FifteenMinutes => 15,
            RefreshPeriod::ThirtyMinutes => 30,
        }
    }

    pub fn duration(self) -> Duration {
        Duration::from_secs(self.minutes() * 60)
    }

    pub fn label(self) -> &'static str {
        match self {
            RefreshPeriod::OneMinute => "1m",
            RefreshPeriod::FiveMinutes => "5m",
            RefreshPeriod::FifteenMinutes => "15m",
            RefreshPeriod::ThirtyMinutes => "30m",
        }
    }

    /// The next longer option, wrapping back to the shortest
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for RefreshPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for RefreshPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown refresh period '{}', expected one of 1m, 5m, 15m, 30m", s))
    }
}

#[cfg(test)]
#[path = "period_tests.rs"]
mod period_tests;
