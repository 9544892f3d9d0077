//! Layout Editor Scheduler Library
//!
//! Frame pacing and short timers for the single-threaded editing loop.
//!
//! The editor never blocks and never spawns threads. Work that must not run
//! on every input event is deferred to one of two kinds of suspension point:
//!
//! - animation frames, through [`FrameThrottle`], which coalesces pointer
//!   events so at most one recomputation happens per frame;
//! - short timers, through [`RepeatGuard`], [`Debouncer`] and
//!   [`IdleDetector`], which take the current [`std::time::Instant`] from the
//!   caller.
//!
//! # Example
//!
//! ```
//! use layout_editor_scheduler::{Debouncer, FrameThrottle};
//! use std::time::{Duration, Instant};
//!
//! let mut throttle = FrameThrottle::new();
//! throttle.submit(10);
//! throttle.submit(20);
//! assert_eq!(throttle.take_frame(), Some(20));
//!
//! let mut text_commit = Debouncer::new(Duration::from_millis(200));
//! let start = Instant::now();
//! text_commit.touch(start);
//! assert!(text_commit.poll(start + Duration::from_millis(200)));
//! ```

mod frame_throttle;
mod timers;

// Re-export public API
pub use frame_throttle::{FrameThrottle, FRAME_INTERVAL_120FPS, FRAME_INTERVAL_60FPS};
pub use timers::{Debouncer, IdleDetector, RepeatGuard};
