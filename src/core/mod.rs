//! Format-agnostic processing: filtering and work-list building.
//!
//! This module contains:
//! - [`filter`] - channel / guild / author allow-lists
//! - [`worklist`] - channel id → message ids to delete
//! - [`extract`] - the reader → filter → builder pipeline
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use chatpurge::core::{FilterSets, extract_from_root};
//! use chatpurge::source::ChannelLogSource;
//! use std::path::Path;
//!
//! # fn main() -> chatpurge::Result<()> {
//! let filters = FilterSets::new().with_guilds([81384788765712384]);
//! let extraction = extract_from_root(&ChannelLogSource::new(), Path::new("messages"), &filters)?;
//! println!("{}", extraction.work.summary());
//! # Ok(())
//! # }
//! ```

pub mod extract;
pub mod filter;
pub mod worklist;

// Re-export main types for convenience
pub use extract::{Extraction, ExtractionStats, extract_from_root, extract_work_list};
pub use filter::{FilterSets, FilterWarning, apply_filters};
pub use worklist::{ChannelWork, WorkList, WorkListSummary};
