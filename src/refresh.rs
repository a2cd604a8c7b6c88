//! Refresh scheduling: when to poll the ledger and what the session remembers
//! between polls.

mod period;
mod scheduler;
mod timer;

pub use period::RefreshPeriod;
pub use scheduler::{PollOutcome, RefreshScheduler, SchedulerState};
pub use timer::RefreshTimer;
