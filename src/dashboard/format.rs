//! Number formatting for the dashboard

use crate::stats::{Metric, StatsSnapshot, Trend};

/// Format an integer with comma thousands separators: `1234567` -> `1,234,567`
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// Trend arrow followed by the magnitude of the change: `↑ 15.0%`
pub fn format_change(change: f64) -> String {
    format!("{} {:.1}%", Trend::of(change).arrow(), change.abs())
}

/// Card value for a metric; the average keeps one decimal
pub fn format_metric(metric: Metric, value: f64) -> String {
    match metric {
        Metric::AverageTransactions => format!("{:.1}", value),
        _ => format_count(value as u64),
    }
}

/// Plain-text report of one snapshot, one aligned line per metric
pub fn format_snapshot(snapshot: &StatsSnapshot) -> String {
    let timestamp = snapshot.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string();

    Metric::ALL
        .into_iter()
        .map(|metric| (metric.title(), format_metric(metric, snapshot.value(metric))))
        .chain(std::iter::once(("Fetched at", timestamp)))
        .map(|(label, value)| format!("{:<18}{}\n", label, value))
        .collect()
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod format_tests;
