//! Short fixed-interval timers for the editing loop
//!
//! All timers take the current time as an argument instead of reading a
//! clock, so the event loop owns time and tests stay deterministic.

use std::time::{Duration, Instant};

/// Leading-edge guard: fires at most once per interval
///
/// Used for held keyboard shortcuts, where key-repeat would otherwise
/// trigger several actions per intended step.
#[derive(Debug, Clone)]
pub struct RepeatGuard {
    interval: Duration,
    last_fired: Option<Instant>,
}

impl RepeatGuard {
    pub fn new(interval: Duration) -> Self {
        Self { interval, last_fired: None }
    }

    /// Returns `true` and records the firing if the interval has elapsed
    pub fn try_fire(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_fired {
            if now.saturating_duration_since(last) < self.interval {
                return false;
            }
        }
        self.last_fired = Some(now);
        true
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn reset(&mut self) {
        self.last_fired = None;
    }
}

/// Trailing-edge debounce: fires once, `delay` after the last touch
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, deadline: None }
    }

    /// Arm the timer, or push its deadline back if already armed
    pub fn touch(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Returns `true` once when the deadline has passed, then disarms
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Reports whether a stream of activity has gone quiet
///
/// Unlike [`Debouncer`] this never fires; callers ask for the state when
/// they need it (e.g. whether a wheel-zoom burst has settled).
#[derive(Debug, Clone)]
pub struct IdleDetector {
    idle_after: Duration,
    last_activity: Option<Instant>,
}

impl IdleDetector {
    pub fn new(idle_after: Duration) -> Self {
        Self { idle_after, last_activity: None }
    }

    pub fn record_activity(&mut self, now: Instant) {
        self.last_activity = Some(now);
    }

    /// Idle when nothing happened yet or the quiet period has elapsed
    pub fn is_idle(&self, now: Instant) -> bool {
        match self.last_activity {
            Some(last) => now.saturating_duration_since(last) >= self.idle_after,
            None => true,
        }
    }

    pub fn idle_after(&self) -> Duration {
        self.idle_after
    }
}
