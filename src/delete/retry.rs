//! Retry waves: keep draining the retry list while the operator agrees.
//!
//! ```text
//!              wave done, retry list non-empty, operator says yes
//!            ┌─────────────────────────────────────────────┐
//!            ▼                                             │
//!   HasPendingRetries(work) ── run_wave(work) ─────────────┤
//!                                                          │ retry list empty
//!                                                          │ or operator says no
//!                                                          ▼
//!                                                        Done
//! ```
//!
//! There is no wave cap. A message that stays throttled keeps coming back
//! until the operator declines.

use tracing::info;

use super::clock::Clock;
use super::deleter::{Deleter, WaveReport};
use super::transport::DeleteTransport;
use crate::core::{WorkList, WorkListSummary};

/// Decides whether another wave should run.
pub trait Confirm {
    /// Called after wave number `wave` (1-based) left messages pending.
    fn confirm(&mut self, wave: usize, report: &WaveReport) -> bool;
}

/// Always continues.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

impl Confirm for AutoConfirm {
    fn confirm(&mut self, _wave: usize, _report: &WaveReport) -> bool {
        true
    }
}

impl<F> Confirm for F
where
    F: FnMut(usize, &WaveReport) -> bool,
{
    fn confirm(&mut self, wave: usize, report: &WaveReport) -> bool {
        self(wave, report)
    }
}

/// Controller state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopState {
    /// A wave is due for these messages.
    HasPendingRetries(WorkList),
    /// Nothing more will be attempted.
    Done,
}

/// Totals over every wave of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Waves executed.
    pub waves: usize,
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
    /// Throttled requests across all waves.
    pub throttled: usize,
    /// Messages still pending when the operator declined another wave.
    pub abandoned: WorkListSummary,
}

impl RunSummary {
    fn absorb(&mut self, report: &WaveReport) {
        self.waves += 1;
        self.attempted += report.attempted;
        self.deleted += report.deleted;
        self.already_gone += report.already_gone;
        self.rejected += report.rejected;
        self.transport_errors += report.transport_errors;
        self.throttled += report.retry.message_count();
    }
}

/// Runs waves until the retry list is empty or `confirm` says stop.
pub fn run_waves<T, C>(
    deleter: &mut Deleter<T, C>,
    initial: WorkList,
    confirm: &mut dyn Confirm,
) -> RunSummary
where
    T: DeleteTransport,
    C: Clock,
{
    let mut summary = RunSummary::default();
    let mut state = if initial.is_empty() {
        LoopState::Done
    } else {
        LoopState::HasPendingRetries(initial)
    };

    while let LoopState::HasPendingRetries(work) = state {
        let report = deleter.run_wave(&work);
        summary.absorb(&report);

        let pending = report.retry.summary();
        info!(
            wave = summary.waves,
            deleted = report.deleted,
            pending_channels = pending.channels,
            pending_messages = pending.messages,
            "wave finished"
        );

        state = if report.retry.is_empty() {
            LoopState::Done
        } else if confirm.confirm(summary.waves, &report) {
            LoopState::HasPendingRetries(report.retry)
        } else {
            summary.abandoned = pending;
            LoopState::Done
        };
    }

    summary
}
