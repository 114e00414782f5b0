//! # Chatpurge
//!
//! A Rust library for bulk-deleting your own Discord messages, driven by the
//! data you already have on disk.
//!
//! ## Overview
//!
//! Chatpurge reads message references from two export shapes:
//! - **Channel logs** - the data-package layout: one folder per channel with a
//!   `messages.csv` and a `channel.json` sidecar
//! - **Search results** - saved message-search responses, bundled as JSON
//!
//! It narrows them down with channel / guild / author allow-lists, groups the
//! message ids per channel, and deletes them one request at a time while
//! honouring the server's rate-limit headers. Throttled messages are collected
//! and retried in further waves while the operator agrees.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatpurge::prelude::*;
//! use std::path::Path;
//!
//! fn main() -> Result<()> {
//!     // Build the work list from a data-package export
//!     let source = create_source(SourceMode::Csv, &SourceConfig::default())?;
//!     let filters = FilterSets::new().with_channels([1234]);
//!     let extraction = extract_from_root(source.as_ref(), Path::new("messages"), &filters)?;
//!     println!("Found {}", extraction.work.summary());
//!
//!     // Delete it
//!     let config = DeleterConfig::default();
//!     let auth = Auth::from_tokens(Some("bot-token".into()), None)?;
//!     let mut deleter = Deleter::new(HttpTransport::new(&config)?, auth, config);
//!     let summary = run_waves(&mut deleter, extraction.work, &mut AutoConfirm);
//!     println!("Deleted {} messages", summary.deleted);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`source`] - Source readers
//!   - [`RecordSource`](source::RecordSource), [`RecordIterator`](source::RecordIterator)
//!   - [`ChannelLogSource`](source::ChannelLogSource), [`SearchResultSource`](source::SearchResultSource)
//! - [`core`] - Filtering and work-list building
//!   - [`core::filter`] - [`FilterSets`](core::FilterSets)
//!   - [`core::worklist`] - [`WorkList`](core::WorkList)
//!   - [`core::extract`] - the whole reader → filter → builder pass
//! - [`delete`] - Rate-limited deleter and retry waves
//! - [`config`] - Plain configuration types
//! - [`prompt`] - Operator prompts
//! - [`error`] - Unified error types ([`PurgeError`], [`Result`])
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod delete;
pub mod error;
#[cfg(feature = "cli")]
pub mod logging;
pub mod prompt;
pub mod record;
pub mod source;

// Re-export the main types at the crate root for convenience
pub use error::{PurgeError, Result};
pub use record::MessageRecord;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatpurge::prelude::*;
/// ```
pub mod prelude {
    // Core record type
    pub use crate::MessageRecord;

    // Error types
    pub use crate::error::{PurgeError, Result};

    // Configs
    pub use crate::config::{Auth, DeleterConfig, SourceConfig};

    // Readers
    pub use crate::source::{RecordIterator, RecordSource, SourceMode, create_source};

    // Filtering and work lists
    pub use crate::core::{
        Extraction, FilterSets, FilterWarning, WorkList, extract_from_root, extract_work_list,
    };

    // Deleting
    pub use crate::delete::{
        AutoConfirm, Confirm, DeleteTransport, Deleter, HttpTransport, RunSummary, WaveReport,
        run_waves,
    };
}
