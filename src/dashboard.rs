//! Terminal dashboard
//!
//! A thin presentation layer over [`RefreshScheduler`](crate::refresh::RefreshScheduler):
//! stat cards with trend arrows, a metrics bar chart and refresh controls.

mod app;
mod format;
mod render;

pub use app::DashboardApp;
pub use format::{format_change, format_count, format_metric, format_snapshot};
pub use render::render_dashboard;
