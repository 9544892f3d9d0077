//! Animation-frame throttling for pointer-driven recomputation
//!
//! Pointer-move events arrive far more often than the display refreshes.
//! Recomputing drag or resize geometry for every event wastes work and, when
//! the recomputation touches the element store, causes visible frame drops.
//!
//! [`FrameThrottle`] coalesces submitted events so at most one is processed
//! per animation frame. Later events in the same frame overwrite earlier ones,
//! so the frame always sees the most recent pointer position.
//!
//! # Target Frame Times
//! - 120 FPS (ProMotion): 8.33ms per frame
//! - 60 FPS (standard): 16.67ms per frame

use std::time::{Duration, Instant};

/// Frame interval for 60 FPS displays (16.67ms)
pub const FRAME_INTERVAL_60FPS: Duration = Duration::from_micros(16_667);

/// Frame interval for 120 FPS displays (8.33ms)
pub const FRAME_INTERVAL_120FPS: Duration = Duration::from_micros(8_333);

/// Coalesces events so at most one is handled per animation frame
///
/// Hosts with a real animation-frame callback call [`FrameThrottle::take_frame`]
/// from it. Hosts without one can drive the throttle from a clock with
/// [`FrameThrottle::poll`], which releases the pending event once a frame
/// interval has elapsed since the last release.
///
/// # Example
///
/// ```
/// use layout_editor_scheduler::FrameThrottle;
///
/// let mut throttle = FrameThrottle::new();
///
/// assert!(throttle.submit((1.0, 1.0)));
/// assert!(!throttle.submit((2.0, 2.0)));
/// assert!(!throttle.submit((3.0, 3.0)));
///
/// // One frame, one recomputation, with the latest position
/// assert_eq!(throttle.take_frame(), Some((3.0, 3.0)));
/// assert_eq!(throttle.take_frame(), None);
/// assert_eq!(throttle.coalesced(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct FrameThrottle<T> {
    /// Latest event not yet handed to a frame
    pending: Option<T>,

    /// Minimum spacing between releases when driven by `poll`
    interval: Duration,

    /// When `poll` last released an event
    last_release: Option<Instant>,

    /// Number of frames that released an event
    frames: u64,

    /// Number of events overwritten before their frame ran
    coalesced: u64,
}

impl<T> FrameThrottle<T> {
    /// Create a throttle paced for 60 FPS displays
    pub fn new() -> Self {
        Self::with_interval(FRAME_INTERVAL_60FPS)
    }

    /// Create a throttle with a custom frame interval
    pub fn with_interval(interval: Duration) -> Self {
        Self { pending: None, interval, last_release: None, frames: 0, coalesced: 0 }
    }

    /// Queue an event for the next frame
    ///
    /// Returns `true` when the queue was empty, meaning the caller should
    /// request an animation frame. Returns `false` when the event replaced
    /// one already waiting for the same frame.
    pub fn submit(&mut self, event: T) -> bool {
        let request_frame = self.pending.is_none();
        if !request_frame {
            self.coalesced += 1;
        }
        self.pending = Some(event);
        request_frame
    }

    /// Release the pending event for the current animation frame
    pub fn take_frame(&mut self) -> Option<T> {
        let event = self.pending.take()?;
        self.frames += 1;
        Some(event)
    }

    /// Release the pending event if a full frame interval has passed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        self.pending.as_ref()?;

        let due = match self.last_release {
            Some(last) => now.saturating_duration_since(last) >= self.interval,
            None => true,
        };
        if !due {
            return None;
        }

        self.last_release = Some(now);
        self.take_frame()
    }

    /// Release the pending event immediately, regardless of pacing
    ///
    /// Used at the end of a gesture so the final position is processed
    /// before anything is committed.
    pub fn flush(&mut self) -> Option<T> {
        self.take_frame()
    }

    /// Drop the pending event without processing it
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Check if an event is waiting for a frame
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Get the number of frames that released an event
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Get the number of events overwritten before their frame
    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }

    /// Get the frame interval used by `poll`
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Clear pending state and statistics
    pub fn reset(&mut self) {
        self.pending = None;
        self.last_release = None;
        self.frames = 0;
        self.coalesced = 0;
    }
}

impl<T> Default for FrameThrottle<T> {
    fn default() -> Self {
        Self::new()
    }
}
