//! Sync timing utilities for debounce and heartbeat management
//!
//! Pure state machines over caller-supplied instants, testable without any
//! host or timer integration.

use std::time::{Duration, Instant};

/// Coalescing window between a rebuild trigger and its execution
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(50);

/// Interval of the periodic missed-change check
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(2);

/// Trailing-edge debounce.
///
/// Every request re-arms the deadline to `now + window`, so a burst of
/// triggers collapses into a single firing no earlier than `window` after
/// the last trigger. A scheduled firing is never cancelled, only superseded
/// by a later re-arm.
#[derive(Debug)]
pub struct Debounce {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Schedule (or re-schedule) a firing at `now + window`
    pub fn request(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// Whether a firing is scheduled
    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the deadline if it has arrived. Returns true exactly once per
    /// scheduled firing.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Check whether the periodic fallback should run again.
///
/// # Arguments
/// * `last` - When the heartbeat last ran (None if never)
/// * `interval` - Minimum duration between heartbeat runs
pub fn heartbeat_due(last: Option<Instant>, now: Instant, interval: Duration) -> bool {
    match last {
        Some(last) => now.duration_since(last) >= interval,
        None => true,
    }
}
