//! Source readers: export files in, [`MessageRecord`](crate::MessageRecord)s out.
//!
//! # Architecture
//!
//! Both export shapes sit behind one capability:
//! - [`RecordSource`] - discovers and opens the files of one export shape
//! - [`RecordIterator`] - single pass over one opened file
//!
//! Everything downstream (filtering, work-list building) only ever sees
//! records, so it does not care which reader produced them.
//!
//! # Supported Shapes
//!
//! - Per-channel CSV logs with a `channel.json` sidecar (via [`ChannelLogSource`])
//! - Saved message-search responses (via [`SearchResultSource`])
//!
//! # Example
//!
//! ```rust,no_run
//! use chatpurge::config::SourceConfig;
//! use chatpurge::source::{SourceMode, create_source};
//! use std::path::Path;
//!
//! # fn main() -> chatpurge::Result<()> {
//! let source = create_source(SourceMode::Search, &SourceConfig::default())?;
//! let files = source.discover(Path::new("search-dumps"))?;
//! println!("{} bundles", files.len());
//! # Ok(())
//! # }
//! ```

mod channel_log;
mod discovery;
mod search;
mod traits;

pub use channel_log::{ChannelLogIterator, ChannelLogSource, ChannelMetadata};
pub use discovery::{find_channel_logs, find_search_bundles};
pub use search::{SearchResultIterator, SearchResultSource};
pub use traits::{RecordIterator, RecordSource};

use serde::{Deserialize, Serialize};

use crate::config::SourceConfig;
use crate::error::Result;

/// Which export shape to read.
///
/// # Example
///
/// ```rust
/// use chatpurge::source::SourceMode;
/// use std::str::FromStr;
///
/// assert_eq!(SourceMode::from_str("search").unwrap(), SourceMode::Search);
/// assert!(SourceMode::Csv.carries_guild());
/// assert!(SourceMode::Search.carries_author());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    /// `messages.csv` + `channel.json` per channel
    #[default]
    Csv,

    /// JSON bundles of captured search responses
    Search,
}

impl SourceMode {
    /// Returns `true` if records from this mode can carry a guild id.
    pub fn carries_guild(&self) -> bool {
        matches!(self, SourceMode::Csv)
    }

    /// Returns `true` if records from this mode carry an author id.
    pub fn carries_author(&self) -> bool {
        matches!(self, SourceMode::Search)
    }
}

impl std::fmt::Display for SourceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceMode::Csv => write!(f, "CSV + metadata"),
            SourceMode::Search => write!(f, "Search JSON"),
        }
    }
}

impl std::str::FromStr for SourceMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(SourceMode::Csv),
            "search" | "json" => Ok(SourceMode::Search),
            _ => Err(format!(
                "Unknown source mode: '{}'. Expected one of: csv, search",
                s
            )),
        }
    }
}

/// Creates the reader for the given mode.
///
/// # Errors
///
/// Returns [`PurgeError::Config`](crate::PurgeError::Config) if the search URL
/// pattern in `config` does not compile.
pub fn create_source(mode: SourceMode, config: &SourceConfig) -> Result<Box<dyn RecordSource>> {
    Ok(match mode {
        SourceMode::Csv => Box::new(ChannelLogSource::with_config(config.clone())),
        SourceMode::Search => Box::new(SearchResultSource::with_config(config)?),
    })
}
