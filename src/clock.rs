//! Monotonic time sources.
//!
//! The controller never reads a global clock: it is constructed over a
//! [`Clock`] capability, so the same control code runs against the host
//! `Instant` source, an embassy-time driver on MCU targets, or a manually
//! stepped [`FakeClock`] in deterministic tests.

use core::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic millisecond counter.
///
/// Implementations must be non-decreasing. Wraparound at `u64::MAX`
/// milliseconds is not a practical concern for any realistic uptime.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin (e.g. boot).
    fn now_ms(&self) -> u64;
}

/// Host-side clock over [`std::time::Instant`].
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Clock for MCU targets running an embassy-time driver.
#[cfg(feature = "embassy")]
pub struct EmbassyClock;

#[cfg(feature = "embassy")]
impl Clock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        embassy_time::Instant::now().as_millis()
    }
}

/// Manually stepped clock for tests and simulation.
///
/// Cloning returns a handle to the same underlying counter, so a test can
/// keep one handle and give the other to the controller:
///
/// ```
/// use pidloop::{Clock, FakeClock};
///
/// let clock = FakeClock::new();
/// let handle = clock.clone();
/// handle.advance(250);
/// assert_eq!(clock.now_ms(), 250);
/// ```
#[derive(Clone, Default)]
pub struct FakeClock {
    now: Rc<Cell<u64>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by `ms`.
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    /// Jump to an absolute timestamp. Must not move backwards.
    pub fn set(&self, ms: u64) {
        debug_assert!(ms >= self.now.get(), "clock must be monotonic");
        self.now.set(ms);
    }
}

impl Clock for FakeClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}
