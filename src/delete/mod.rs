//! Rate-limited deletion of a work list.
//!
//! - [`Deleter`] runs one wave: every pending message, one request at a time,
//!   deferring throttled messages to a retry list
//! - [`run_waves`] feeds each wave's retry list into the next while the
//!   operator agrees
//! - [`DeleteTransport`] / [`Clock`] are the seams to the network and to time
//!
//! # Example
//!
//! ```rust,no_run
//! use chatpurge::config::{Auth, DeleterConfig};
//! use chatpurge::core::WorkList;
//! use chatpurge::delete::{AutoConfirm, Deleter, HttpTransport, run_waves};
//!
//! # fn main() -> chatpurge::Result<()> {
//! let config = DeleterConfig::default();
//! let auth = Auth::from_tokens(Some("bot-token".into()), None)?;
//! let mut deleter = Deleter::new(HttpTransport::new(&config)?, auth, config);
//!
//! let mut work = WorkList::new();
//! work.push(1, 111);
//! let summary = run_waves(&mut deleter, work, &mut AutoConfirm);
//! println!("deleted {} in {} waves", summary.deleted, summary.waves);
//! # Ok(())
//! # }
//! ```

mod clock;
mod deleter;
mod ratelimit;
mod retry;
mod transport;

pub use clock::{Clock, ManualClock, SystemClock};
pub use deleter::{DeleteOutcome, Deleter, WaveReport};
pub use ratelimit::{RateLimitSignals, RateLimitState};
pub use retry::{AutoConfirm, Confirm, LoopState, RunSummary, run_waves};
pub use transport::{
    DeleteResponse, DeleteTransport, HEADER_REMAINING, HEADER_RESET, HEADER_RETRY_AFTER,
    HttpTransport, signals_from_headers,
};
