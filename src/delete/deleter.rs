//! One delete wave: every message of a work list, one request at a time.
//!
//! Requests are strictly sequential. The rate-limit counters only make sense
//! under serialized access, so a [`Deleter`] is `&mut self` throughout and is
//! meant to be the single worker of a run.
//!
//! Throttled messages are not re-sent inside the wave. After the wait they go
//! into the wave's retry list, which the caller hands to the next wave.

use tracing::{debug, info, warn};

use super::clock::{Clock, SystemClock};
use super::ratelimit::RateLimitState;
use super::transport::DeleteTransport;
use crate::config::{Auth, DeleterConfig};
use crate::core::WorkList;

/// What became of one delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// 2xx: the message is gone.
    Deleted,
    /// 404: the message was already gone.
    AlreadyGone,
    /// 429: deferred to the next wave.
    Throttled,
    /// Any other status: given up on for this run.
    Rejected(u16),
    /// No response at all: given up on for this run.
    TransportFailed,
}

/// Counters of one wave plus the messages deferred to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaveReport {
    /// Requests issued.
    pub attempted: usize,
    /// Messages deleted.
    pub deleted: usize,
    /// Messages that were already gone.
    pub already_gone: usize,
    /// Requests answered with a terminal error status.
    pub rejected: usize,
    /// Requests that produced no response.
    pub transport_errors: usize,
    /// Messages that must be retried.
    pub retry: WorkList,
}

impl WaveReport {
    fn record(&mut self, channel_id: i64, message_id: i64, outcome: DeleteOutcome) {
        self.attempted += 1;
        match outcome {
            DeleteOutcome::Deleted => self.deleted += 1,
            DeleteOutcome::AlreadyGone => self.already_gone += 1,
            DeleteOutcome::Throttled => self.retry.push(channel_id, message_id),
            DeleteOutcome::Rejected(_) => self.rejected += 1,
            DeleteOutcome::TransportFailed => self.transport_errors += 1,
        }
    }
}

/// Rate-limited deleter: owns the transport, the clock and the throttling state.
pub struct Deleter<T, C = SystemClock> {
    transport: T,
    clock: C,
    auth: Auth,
    config: DeleterConfig,
    state: RateLimitState,
}

impl<T: DeleteTransport> Deleter<T, SystemClock> {
    /// Creates a deleter on the system clock.
    pub fn new(transport: T, auth: Auth, config: DeleterConfig) -> Self {
        Self::with_clock(transport, SystemClock, auth, config)
    }
}

impl<T: DeleteTransport, C: Clock> Deleter<T, C> {
    /// Creates a deleter with an explicit clock.
    pub fn with_clock(transport: T, clock: C, auth: Auth, config: DeleterConfig) -> Self {
        Self {
            transport,
            clock,
            auth,
            config,
            state: RateLimitState::new(),
        }
    }

    /// Current throttling state.
    pub fn state(&self) -> &RateLimitState {
        &self.state
    }

    /// The transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Attempts every message of `work` once.
    pub fn run_wave(&mut self, work: &WorkList) -> WaveReport {
        let mut report = WaveReport::default();

        for channel in work.iter() {
            debug!(
                channel = channel.channel_id,
                messages = channel.messages.len(),
                "deleting channel"
            );
            for &message_id in &channel.messages {
                let outcome = self.delete_one(channel.channel_id, message_id);
                report.record(channel.channel_id, message_id, outcome);
            }
        }

        report
    }

    /// Sends one delete request and applies the throttling policy to its
    /// response. Blocks for as long as the policy says.
    pub fn delete_one(&mut self, channel_id: i64, message_id: i64) -> DeleteOutcome {
        let url = self.config.message_url(channel_id, message_id);

        let response = match self.transport.delete(&url, &self.auth) {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %url, error = %e, "delete request failed");
                return DeleteOutcome::TransportFailed;
            }
        };

        let now = self.clock.now_unix();
        self.state.observe(&response.signals, now);
        info!(status = response.status, url = %url, "delete attempt");

        if response.is_throttled() {
            if let Some(wait) = self.state.throttle_wait(now) {
                warn!(
                    wait_secs = wait.as_secs(),
                    attempts = self.state.retry_attempts(),
                    "rate limited, waiting"
                );
                self.clock.sleep(wait);
            }
            return DeleteOutcome::Throttled;
        }

        let outcome = match response.status {
            200..=299 => {
                if self.state.record_success(self.config.reset_threshold) {
                    debug!("throttle skew cleared");
                }
                DeleteOutcome::Deleted
            }
            404 => DeleteOutcome::AlreadyGone,
            status => {
                warn!(status, url = %url, "delete rejected");
                DeleteOutcome::Rejected(status)
            }
        };

        if let Some(wait) = self.state.exhausted_wait(now) {
            debug!(wait_secs = wait.as_secs(), "bucket empty, pausing");
            self.clock.sleep(wait);
        }

        outcome
    }
}
