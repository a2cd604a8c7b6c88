//! Refresh scheduling
//!
//! [`RefreshScheduler`] owns the [`SchedulerState`] of one dashboard session.
//! Polls may overlap; each poll takes a sequence number when it starts. A
//! snapshot is only applied if no newer snapshot has been, and an error only
//! if no newer outcome of either kind has been.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::period::RefreshPeriod;
use super::timer::RefreshTimer;
use crate::config::RefreshConfig;
use crate::error::StatsError;
use crate::stats::{DeltaView, SnapshotSource, StatsSnapshot};

/// Session state read by the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerState {
    pub current: Option<StatsSnapshot>,
    /// `current` as it was right before the latest successful poll
    pub previous: Option<StatsSnapshot>,
    pub auto_refresh_enabled: bool,
    pub period: RefreshPeriod,
    pub last_error: Option<StatsError>,
    /// Polls started and not yet settled
    pub polls_in_flight: u32,
    /// Sequence number of the newest poll whose outcome was applied
    pub applied_sequence: u64,
    /// Sequence number of the poll that produced `current`
    pub snapshot_sequence: u64,
}

impl SchedulerState {
    fn new(settings: &RefreshConfig) -> Self {
        Self {
            current: None,
            previous: None,
            auto_refresh_enabled: settings.auto_refresh,
            period: settings.period,
            last_error: None,
            polls_in_flight: 0,
            applied_sequence: 0,
            snapshot_sequence: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.polls_in_flight > 0
    }

    pub fn delta_view(&self) -> DeltaView {
        DeltaView::between(self.current.as_ref(), self.previous.as_ref())
    }
}

/// Result of one poll, as seen by whoever started it
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// The new snapshot became `current`
    Applied,
    /// The fetch failed; `last_error` was set
    Failed(StatsError),
    /// A newer poll was applied first; this outcome was discarded
    Stale,
}

/// Marks a poll as in flight until dropped
struct InFlight {
    state: watch::Sender<SchedulerState>,
}

impl InFlight {
    fn enter(state: &watch::Sender<SchedulerState>) -> Self {
        state.send_modify(|s| s.polls_in_flight += 1);
        Self {
            state: state.clone(),
        }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.state
            .send_modify(|s| s.polls_in_flight = s.polls_in_flight.saturating_sub(1));
    }
}

/// A poll that has been numbered but not run yet
struct PollTicket {
    sequence: u64,
    _in_flight: InFlight,
}

/// Shared between the scheduler, its timer task and spawned polls
struct PollCore<S> {
    source: S,
    state: watch::Sender<SchedulerState>,
    next_sequence: AtomicU64,
}

impl<S: SnapshotSource> PollCore<S> {
    fn begin(&self) -> PollTicket {
        PollTicket {
            sequence: self.next_sequence.fetch_add(1, Ordering::SeqCst) + 1,
            _in_flight: InFlight::enter(&self.state),
        }
    }

    async fn run(&self, ticket: PollTicket) -> PollOutcome {
        let result = self.source.fetch().await;
        self.apply(ticket.sequence, result)
    }

    fn apply(&self, sequence: u64, result: Result<StatsSnapshot, StatsError>) -> PollOutcome {
        let mut outcome = PollOutcome::Stale;

        self.state.send_if_modified(|state| match result {
            Ok(snapshot) => {
                if sequence <= state.snapshot_sequence {
                    return false;
                }
                state.previous = state.current.take();
                state.current = Some(snapshot);
                state.snapshot_sequence = sequence;
                // A newer failure keeps its error on screen
                if sequence > state.applied_sequence {
                    state.applied_sequence = sequence;
                    state.last_error = None;
                }
                outcome = PollOutcome::Applied;
                true
            }
            Err(e) => {
                if sequence <= state.applied_sequence {
                    return false;
                }
                state.applied_sequence = sequence;
                state.last_error = Some(e.clone());
                outcome = PollOutcome::Failed(e);
                true
            }
        });

        match &outcome {
            PollOutcome::Applied => log::debug!("Poll {} applied", sequence),
            PollOutcome::Failed(e) => log::warn!("Poll {} failed: {}", sequence, e),
            PollOutcome::Stale => log::debug!("Poll {} superseded, discarding", sequence),
        }

        outcome
    }
}

/// Owns polling, the auto-refresh timer and the session state
///
/// Two states: Idle (no timer) and AutoPolling (timer armed, polling every
/// `period`). Dropping the scheduler cancels the timer. Polls started by the
/// timer run as their own tasks, so cancelling the timer never drops one.
pub struct RefreshScheduler<S: SnapshotSource> {
    core: Arc<PollCore<S>>,
    timer: Option<RefreshTimer>,
}

impl<S: SnapshotSource> RefreshScheduler<S> {
    /// Create the scheduler, arming the timer if auto-refresh is on
    ///
    /// Must be called from within a Tokio runtime. No poll is started.
    pub fn new(source: S, settings: &RefreshConfig) -> Self {
        let (state, _) = watch::channel(SchedulerState::new(settings));

        let mut scheduler = Self {
            core: Arc::new(PollCore {
                source,
                state,
                next_sequence: AtomicU64::new(0),
            }),
            timer: None,
        };

        if settings.auto_refresh {
            scheduler.arm_timer(settings.period);
        }

        scheduler
    }

    /// Run one poll to completion
    pub async fn poll_now(&self) -> PollOutcome {
        let ticket = self.core.begin();
        self.core.run(ticket).await
    }

    /// Start one poll in the background
    ///
    /// The poll is numbered now, so polls spawned later always count as newer.
    pub fn spawn_poll(&self) -> JoinHandle<PollOutcome> {
        let ticket = self.core.begin();
        let core = Arc::clone(&self.core);
        tokio::spawn(async move { core.run(ticket).await })
    }

    /// Turn periodic polling on (re-arming the timer) or off
    pub fn set_auto_refresh(&mut self, enabled: bool) {
        self.core
            .state
            .send_modify(|s| s.auto_refresh_enabled = enabled);

        if enabled {
            let period = self.period();
            self.arm_timer(period);
        } else {
            self.cancel_timer();
        }
    }

    /// Change the period; re-arms the timer only when auto-refresh is on
    pub fn set_period(&mut self, period: RefreshPeriod) {
        self.core.state.send_modify(|s| s.period = period);

        if self.auto_refresh_enabled() {
            self.arm_timer(period);
        }
    }

    pub fn period(&self) -> RefreshPeriod {
        self.core.state.borrow().period
    }

    pub fn auto_refresh_enabled(&self) -> bool {
        self.core.state.borrow().auto_refresh_enabled
    }

    /// Period of the armed timer, `None` when idle
    pub fn armed_period(&self) -> Option<RefreshPeriod> {
        let timer = self.timer.as_ref()?;
        RefreshPeriod::ALL
            .into_iter()
            .find(|p| p.duration() == timer.period())
    }

    pub fn state(&self) -> SchedulerState {
        self.core.state.borrow().clone()
    }

    /// Receiver that wakes whenever the state changes
    pub fn subscribe(&self) -> watch::Receiver<SchedulerState> {
        self.core.state.subscribe()
    }

    pub fn delta_view(&self) -> DeltaView {
        self.core.state.borrow().delta_view()
    }

    pub fn source(&self) -> &S {
        &self.core.source
    }

    /// Cancel the timer; the state keeps its last values
    pub fn shutdown(&mut self) {
        self.cancel_timer();
    }

    fn arm_timer(&mut self, period: RefreshPeriod) {
        self.cancel_timer();

        let core = Arc::clone(&self.core);
        self.timer = Some(RefreshTimer::arm(period.duration(), move || {
            let core = Arc::clone(&core);
            async move {
                let ticket = core.begin();
                drop(tokio::spawn(async move { core.run(ticket).await }));
            }
        }));
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
    }
}

impl<S: SnapshotSource> Drop for RefreshScheduler<S> {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod scheduler_tests;
