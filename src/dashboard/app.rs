use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;
use tokio::sync::watch;

use super::render::render_dashboard;
use crate::refresh::{RefreshPeriod, RefreshScheduler, SchedulerState};
use crate::stats::SnapshotSource;

/// Dashboard view model: owns the scheduler and translates keys into commands
pub struct DashboardApp<S: SnapshotSource> {
    scheduler: RefreshScheduler<S>,
    should_quit: bool,
    pub frame_count: usize,
}

impl<S: SnapshotSource> DashboardApp<S> {
    pub fn new(scheduler: RefreshScheduler<S>) -> Self {
        Self {
            scheduler,
            should_quit: false,
            frame_count: 0,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn scheduler(&self) -> &RefreshScheduler<S> {
        &self.scheduler
    }

    /// Receiver that wakes whenever the scheduler state changes
    pub fn subscribe(&self) -> watch::Receiver<SchedulerState> {
        self.scheduler.subscribe()
    }

    /// Start a poll in the background; the result arrives through the state
    pub fn request_poll(&self) {
        drop(self.scheduler.spawn_poll());
    }

    /// Advance the spinner animation
    pub fn advance_frame(&mut self) {
        self.frame_count = self.frame_count.wrapping_add(1);
    }

    /// Handle a key event
    /// Returns true if the key was handled, false otherwise
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Only process key press events (avoid duplicates on release)
        if key.kind != KeyEventKind::Press {
            return false;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return true;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('r') => self.request_poll(),
            KeyCode::Char('a') => {
                let enabled = !self.scheduler.auto_refresh_enabled();
                self.scheduler.set_auto_refresh(enabled);
            }
            KeyCode::Char('p') => {
                let next = self.scheduler.period().next();
                self.scheduler.set_period(next);
            }
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.scheduler.set_period(RefreshPeriod::ALL[index]);
            }
            _ => return false,
        }

        true
    }

    pub fn render(&self, frame: &mut Frame) {
        let state = self.scheduler.state();
        render_dashboard(frame, &state, self.frame_count);
    }

    /// Cancel the refresh timer before exit
    pub fn shutdown(&mut self) {
        self.scheduler.shutdown();
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod app_tests;
