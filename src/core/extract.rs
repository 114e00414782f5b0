//! Reader → filter → work-list pipeline.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::filter::FilterSets;
use super::worklist::WorkList;
use crate::error::Result;
use crate::source::RecordSource;

/// What happened while building a work list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    /// Export files handed to the pipeline.
    pub files_found: usize,
    /// Files that could not be opened and were skipped whole.
    pub files_skipped: usize,
    /// Records decoded from the files.
    pub records_read: usize,
    /// Rows or entries the readers skipped as malformed.
    pub records_malformed: usize,
    /// Records dropped by the filters.
    pub records_filtered: usize,
}

/// A work list together with the stats of the pass that built it.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Messages to delete, per channel.
    pub work: WorkList,
    /// Pipeline counters.
    pub stats: ExtractionStats,
}

/// Reads every file in `files`, keeps what passes `filters`, and groups the
/// message ids by channel.
///
/// Per-file failures are logged and counted; they never abort the pass.
pub fn extract_work_list(
    source: &dyn RecordSource,
    files: &[PathBuf],
    filters: &FilterSets,
) -> Extraction {
    let mut work = WorkList::new();
    let mut stats = ExtractionStats {
        files_found: files.len(),
        ..ExtractionStats::default()
    };

    for path in files {
        let mut records = match source.open(path) {
            Ok(records) => records,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping file");
                stats.files_skipped += 1;
                continue;
            }
        };

        for record in records.by_ref() {
            stats.records_read += 1;
            if filters.allows(&record) {
                work.push_record(&record);
            } else {
                stats.records_filtered += 1;
            }
        }
        stats.records_malformed += records.records_skipped();

        debug!(
            path = %path.display(),
            read = records.records_read(),
            skipped = records.records_skipped(),
            "finished file"
        );
    }

    info!(
        files = stats.files_found,
        skipped_files = stats.files_skipped,
        channels = work.channel_count(),
        messages = work.message_count(),
        "extraction finished"
    );

    Extraction { work, stats }
}

/// Discovers the export files under `root`, then runs [`extract_work_list`].
///
/// # Errors
///
/// Fails only if `root` cannot be listed.
pub fn extract_from_root(
    source: &dyn RecordSource,
    root: &Path,
    filters: &FilterSets,
) -> Result<Extraction> {
    let files = source.discover(root)?;
    Ok(extract_work_list(source, &files, filters))
}
