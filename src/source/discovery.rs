//! Locating export files under a user-selected root.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{PurgeError, Result};

/// Finds per-channel CSV logs.
///
/// Accepts either the `messages` directory of a data package (one `c<id>`
/// folder per channel) or a single channel folder. `root` may also point at
/// the log file itself.
pub fn find_channel_logs(root: &Path, file_name: &str) -> Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(if root.file_name().is_some_and(|n| n == file_name) {
            vec![root.to_path_buf()]
        } else {
            Vec::new()
        });
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(root).map_err(|e| PurgeError::directory_read(root, e))? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(dir = %root.display(), error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        let path = entry.path();

        if path.is_dir() {
            let candidate = path.join(file_name);
            if candidate.is_file() {
                files.push(candidate);
            } else {
                debug!(dir = %path.display(), "no {} in folder", file_name);
            }
        } else if entry.file_name() == file_name {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Finds search-result bundles: `root` itself if it is a file, otherwise every
/// `*.json` file directly inside it.
pub fn find_search_bundles(root: &Path) -> Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(root).map_err(|e| PurgeError::directory_read(root, e))? {
        let Ok(entry) = entry else {
            continue;
        };
        let path = entry.path();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
