//! Core traits for source readers.
//!
//! - [`RecordSource`] - one export shape: how to find its files and open them
//! - [`RecordIterator`] - single-pass iterator over one opened file

use std::path::{Path, PathBuf};

use crate::MessageRecord;
use crate::error::Result;

use super::SourceMode;

/// Iterator over the records of one export file.
///
/// Malformed rows and entries are logged and skipped inside the iterator, so
/// every item it yields is a usable record. The counters let callers report
/// what was dropped.
///
/// # Object Safety
///
/// This trait is object-safe, enabling dynamic dispatch via `Box<dyn RecordIterator>`.
pub trait RecordIterator: Iterator<Item = MessageRecord> + Send {
    /// Number of records yielded so far.
    fn records_read(&self) -> usize;

    /// Number of rows or entries skipped so far.
    fn records_skipped(&self) -> usize;
}

/// An export shape that can be turned into [`MessageRecord`]s.
///
/// # Examples
///
/// ```no_run
/// use chatpurge::config::SourceConfig;
/// use chatpurge::source::{SourceMode, create_source};
/// use std::path::Path;
///
/// # fn main() -> chatpurge::Result<()> {
/// let source = create_source(SourceMode::Csv, &SourceConfig::default())?;
/// for path in source.discover(Path::new("package/messages"))? {
///     for record in source.open(&path)? {
///         println!("{} / {}", record.channel_id, record.message_id);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub trait RecordSource: Send + Sync {
    /// Returns the human-readable name of this source.
    fn name(&self) -> &'static str;

    /// Returns the mode this source implements.
    fn mode(&self) -> SourceMode;

    /// Lists the export files under `root`, sorted by path.
    ///
    /// # Errors
    ///
    /// Returns [`PurgeError::DirectoryRead`](crate::PurgeError::DirectoryRead)
    /// if `root` cannot be listed.
    fn discover(&self, root: &Path) -> Result<Vec<PathBuf>>;

    /// Opens one export file.
    ///
    /// # Errors
    ///
    /// Any error here means the whole file should be skipped.
    fn open(&self, path: &Path) -> Result<Box<dyn RecordIterator>>;
}
