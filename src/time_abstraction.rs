//! Time sources and the playback tick schedule
//!
//! Playback is driven cooperatively: the host reads a [`TimeSource`] and
//! hands the current time to
//! [`NavigationSession::poll`](crate::session::NavigationSession::poll).
//! A [`TickSchedule`] turns elapsed time into a count of due ticks and can
//! be cancelled, so no timer runs behind the caller's back.
//!
//! # Usage
//!
//! ```
//! use geofence_navigator::time_abstraction::{ManualTimeSource, TickSchedule, TimeSource};
//!
//! let clock = ManualTimeSource::new();
//! let mut schedule = TickSchedule::new(clock.get_time_ms(), 500);
//!
//! clock.advance_ms(1250);
//! assert_eq!(schedule.due_ticks(clock.get_time_ms()), 2);
//!
//! schedule.cancel();
//! clock.advance_ms(5000);
//! assert_eq!(schedule.due_ticks(clock.get_time_ms()), 0);
//! ```

use core::sync::atomic::{AtomicU64, Ordering};
use log::debug;

/// Upper bound on ticks released by a single poll
pub const MAX_TICKS_PER_POLL: u32 = 1024;

/// Millisecond clock
pub trait TimeSource {
    /// Current time in milliseconds
    fn get_time_ms(&self) -> u64;
}

/// Clock advanced explicitly by the caller
#[derive(Debug, Default)]
pub struct ManualTimeSource {
    now_ms: AtomicU64,
}

impl ManualTimeSource {
    /// Create a clock at time zero
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Create a clock at the given time
    pub fn starting_at(ms: u64) -> Self {
        Self {
            now_ms: AtomicU64::new(ms),
        }
    }

    /// Move the clock forward
    pub fn advance_ms(&self, ms: u64) {
        self.now_ms.fetch_add(ms, Ordering::Relaxed);
    }

    /// Set the clock to an absolute value
    pub fn set_ms(&self, ms: u64) {
        self.now_ms.store(ms, Ordering::Relaxed);
    }
}

impl TimeSource for ManualTimeSource {
    fn get_time_ms(&self) -> u64 {
        self.now_ms.load(Ordering::Relaxed)
    }
}

/// Monotonic wall clock relative to construction
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct StdTimeSource {
    start_time: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdTimeSource {
    /// Create standard library time source
    pub fn new() -> Self {
        Self {
            start_time: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl TimeSource for StdTimeSource {
    fn get_time_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }
}

/// Repeating tick registration
///
/// Created when navigation starts and cancelled when it stops. The first
/// tick falls due one interval after the start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSchedule {
    interval_ms: u64,
    next_due_ms: u64,
    active: bool,
}

impl TickSchedule {
    /// Schedule ticks every `interval_ms` starting from `now_ms`
    pub fn new(now_ms: u64, interval_ms: u32) -> Self {
        let interval_ms = u64::from(interval_ms.max(1));
        Self {
            interval_ms,
            next_due_ms: now_ms.saturating_add(interval_ms),
            active: true,
        }
    }

    /// Number of ticks that fell due up to `now_ms`, consuming them.
    ///
    /// Returns zero once cancelled. A clock that went backwards yields no
    /// ticks. At most [`MAX_TICKS_PER_POLL`] are released per call; the
    /// rest are dropped so a stalled host does not replay a backlog.
    pub fn due_ticks(&mut self, now_ms: u64) -> u32 {
        if !self.active || now_ms < self.next_due_ms {
            return 0;
        }

        let behind = (now_ms - self.next_due_ms) / self.interval_ms + 1;
        let due = behind.min(MAX_TICKS_PER_POLL as u64) as u32;
        self.next_due_ms = self
            .next_due_ms
            .saturating_add(behind.saturating_mul(self.interval_ms));
        due
    }

    /// Stop releasing ticks
    pub fn cancel(&mut self) {
        if self.active {
            debug!("tick schedule cancelled");
        }
        self.active = false;
    }

    /// Still releasing ticks
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Tick period
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Time at which the next tick falls due
    pub fn next_due_ms(&self) -> u64 {
        self.next_due_ms
    }
}
