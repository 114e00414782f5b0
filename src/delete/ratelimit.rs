//! Rate-limit accounting shared by all delete requests of a run.
//!
//! The platform reports its bucket state on every response. [`RateLimitState`]
//! keeps the latest values and turns them into wait durations:
//!
//! - throttled (429) with nothing remaining: wait until the reset epoch, plus
//!   one extra second per throttle already seen this run, so repeated
//!   collisions on the same reset boundary spread out
//! - any other response with nothing remaining: wait until the reset epoch
//!
//! The per-throttle skew is cleared once a success arrives after the counter
//! has grown past a threshold.

use std::time::Duration;

/// Rate-limit headers of one response, already decoded.
///
/// Absent values stay `None`; [`RateLimitState::observe`] applies the defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RateLimitSignals {
    /// `X-RateLimit-Remaining`
    pub remaining: Option<i64>,
    /// `X-RateLimit-Reset`, unix seconds (may be fractional)
    pub reset_at: Option<f64>,
    /// `Retry-After`, seconds (may be fractional)
    pub retry_after: Option<f64>,
}

impl RateLimitSignals {
    /// Signals of a response that only carried `Retry-After`.
    pub fn retry_after(secs: f64) -> Self {
        Self {
            retry_after: Some(secs),
            ..Self::default()
        }
    }

    /// Signals of a response that carried the bucket headers.
    pub fn bucket(remaining: i64, reset_at: f64) -> Self {
        Self {
            remaining: Some(remaining),
            reset_at: Some(reset_at),
            retry_after: None,
        }
    }
}

/// Value used for a missing remaining/reset header.
const ABSENT_DEFAULT: i64 = 1;

/// Process-wide throttling counters, owned by the deleter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitState {
    remaining: i64,
    reset_at: i64,
    retry_attempts: u32,
}

impl Default for RateLimitState {
    fn default() -> Self {
        Self {
            remaining: ABSENT_DEFAULT,
            reset_at: ABSENT_DEFAULT,
            retry_attempts: 0,
        }
    }
}

impl RateLimitState {
    /// Creates a fresh state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests left in the current bucket, as last reported.
    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    /// Unix second at which the bucket refills, as last reported.
    pub fn reset_at(&self) -> i64 {
        self.reset_at
    }

    /// Throttles seen since the last reset of the counter.
    pub fn retry_attempts(&self) -> u32 {
        self.retry_attempts
    }

    /// Records the signals of a response received at `now`.
    ///
    /// `Retry-After` wins over the bucket headers: it means nothing is left
    /// until `now + retry_after`.
    pub fn observe(&mut self, signals: &RateLimitSignals, now: i64) {
        if let Some(secs) = signals.retry_after {
            self.remaining = 0;
            self.reset_at = now.saturating_add(secs.max(0.0).ceil() as i64);
        } else {
            self.remaining = signals.remaining.unwrap_or(ABSENT_DEFAULT);
            self.reset_at = signals
                .reset_at
                .map(|r| r.ceil() as i64)
                .unwrap_or(ABSENT_DEFAULT);
        }
    }

    /// Wait owed after a throttled response. Bumps the retry-attempt counter
    /// whenever a wait is returned.
    pub fn throttle_wait(&mut self, now: i64) -> Option<Duration> {
        if self.remaining != 0 {
            return None;
        }
        let until_reset = self.reset_at.saturating_sub(now).max(0) as u64;
        let skew = u64::from(self.retry_attempts);
        let wait = Duration::from_secs(until_reset.saturating_add(skew));
        self.retry_attempts = self.retry_attempts.saturating_add(1);
        Some(wait)
    }

    /// Wait owed before the next request after a non-throttled response that
    /// emptied the bucket. No skew, counter untouched.
    pub fn exhausted_wait(&self, now: i64) -> Option<Duration> {
        if self.remaining == 0 && self.reset_at > now {
            Some(Duration::from_secs(self.reset_at.saturating_sub(now) as u64))
        } else {
            None
        }
    }

    /// Records a successful delete. Returns `true` if this cleared the
    /// retry-attempt counter.
    pub fn record_success(&mut self, reset_threshold: u32) -> bool {
        if self.retry_attempts > reset_threshold {
            self.retry_attempts = 0;
            true
        } else {
            false
        }
    }
}
