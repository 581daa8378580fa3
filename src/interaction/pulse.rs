//! Transient "limit reached" indication.

use std::time::{Duration, Instant};

/// How long the pulse shows when nothing else is configured.
pub const DEFAULT_PULSE: Duration = Duration::from_millis(300);

/// A short-lived flag raised when a resize hits a bound.
///
/// Triggering while already active does not extend the pulse, so a burst
/// of rejected moves shows a single blink.
#[derive(Debug, Clone)]
pub struct LimitPulse {
    duration: Duration,
    until: Option<Instant>,
}

impl LimitPulse {
    /// Creates an inactive pulse lasting `duration` once triggered.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            until: None,
        }
    }

    /// Configured pulse length.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Raises the pulse at `now`.
    ///
    /// Returns `false` if it was already showing.
    pub fn trigger_at(&mut self, now: Instant) -> bool {
        if self.is_active_at(now) {
            return false;
        }
        self.until = Some(now + self.duration);
        true
    }

    /// Returns `true` while the pulse is showing.
    pub fn is_active_at(&self, now: Instant) -> bool {
        self.until.is_some_and(|until| now < until)
    }

    /// Clears an expired pulse. Returns `true` if it just went out.
    pub fn expire_at(&mut self, now: Instant) -> bool {
        match self.until {
            Some(until) if now >= until => {
                self.until = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for LimitPulse {
    fn default() -> Self {
        Self::new(DEFAULT_PULSE)
    }
}
