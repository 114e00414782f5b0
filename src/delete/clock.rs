//! Wall-clock access for the deleter.
//!
//! Rate-limit resets arrive as unix epochs, and throttling blocks the calling
//! thread. Both go through [`Clock`] so tests can run throttling scenarios
//! without waiting.

use std::time::Duration;

/// Source of unix time plus a blocking sleep.
pub trait Clock {
    /// Current time in whole unix seconds.
    fn now_unix(&self) -> i64;

    /// Blocks the caller for `duration`.
    fn sleep(&mut self, duration: Duration);
}

/// The real clock: `chrono` time and `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// A clock that only moves when slept on, recording every sleep.
///
/// # Example
///
/// ```
/// use chatpurge::delete::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let mut clock = ManualClock::at(1_000);
/// clock.sleep(Duration::from_secs(2));
///
/// assert_eq!(clock.now_unix(), 1_002);
/// assert_eq!(clock.total_slept(), Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: i64,
    sleeps: Vec<Duration>,
}

impl ManualClock {
    /// Creates a clock frozen at `now` (unix seconds).
    pub fn at(now: i64) -> Self {
        Self {
            now,
            sleeps: Vec::new(),
        }
    }

    /// Moves the clock forward without recording a sleep.
    pub fn advance(&mut self, secs: i64) {
        self.now = self.now.saturating_add(secs);
    }

    /// Every sleep requested so far, in order.
    pub fn sleeps(&self) -> &[Duration] {
        &self.sleeps
    }

    /// Sum of all sleeps.
    pub fn total_slept(&self) -> Duration {
        self.sleeps.iter().sum()
    }
}

impl Clock for ManualClock {
    fn now_unix(&self) -> i64 {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        self.sleeps.push(duration);
        let secs = i64::try_from(duration.as_secs()).unwrap_or(i64::MAX);
        self.now = self.now.saturating_add(secs);
    }
}
