//! Cancellable progress polling tied to the playback lifecycle.
//!
//! While audio plays, the surface refreshes its progress display every
//! 100ms. The poller must be cancelled on every exit path -- pause, stop,
//! natural end, viewer close -- so no stale timer outlives playback.

use std::time::{Duration, Instant};

/// Poll interval while playing.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A periodic due-time tracker driven by the frame loop.
#[derive(Debug, Clone, Copy)]
pub struct ProgressPoller {
    next_due: Option<Instant>,
}

impl ProgressPoller {
    pub fn new() -> Self {
        Self { next_due: None }
    }

    /// Begin polling; the first tick fires one interval from `now`.
    /// Restarting an active poller resets its schedule.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + POLL_INTERVAL);
    }

    /// Stop polling.
    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    /// Whether polling is scheduled.
    pub fn active(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns `true` when a tick is due, advancing the schedule. Inactive
    /// pollers never tick.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + POLL_INTERVAL);
                true
            },
            _ => false,
        }
    }
}

impl Default for ProgressPoller {
    fn default() -> Self {
        Self::new()
    }
}
