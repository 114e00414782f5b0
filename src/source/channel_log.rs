//! Reader for per-channel CSV logs from a data-package export.
//!
//! Each channel folder holds `messages.csv` (first column: message id, with an
//! `ID` header row) and a `channel.json` sidecar naming the channel and, for
//! server channels, its guild.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::MessageRecord;
use crate::config::SourceConfig;
use crate::error::{PurgeError, Result, parse_id};

use super::discovery::find_channel_logs;
use super::{RecordIterator, RecordSource, SourceMode};

/// Header value of the id column.
const ID_HEADER: &str = "ID";

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

#[derive(Debug, Deserialize)]
struct RawChannel {
    id: String,
    #[serde(default)]
    guild: Option<RawGuild>,
}

#[derive(Debug, Deserialize)]
struct RawGuild {
    id: String,
}

/// Decoded `channel.json` sidecar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelMetadata {
    /// Channel id.
    pub channel_id: i64,
    /// Guild id; `None` for DMs and group DMs.
    pub guild_id: Option<i64>,
}

impl ChannelMetadata {
    /// Reads and decodes a sidecar file.
    ///
    /// # Errors
    ///
    /// Every failure is reported as [`PurgeError::Metadata`].
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| PurgeError::metadata(path, e.to_string()))?;
        Self::from_json(&content).map_err(|e| PurgeError::metadata(path, e.to_string()))
    }

    /// Decodes sidecar JSON.
    pub fn from_json(content: &str) -> Result<Self> {
        let raw: RawChannel = serde_json::from_str(content)?;
        let guild_id = match raw.guild {
            Some(guild) => Some(parse_id(&guild.id)?),
            None => None,
        };

        Ok(Self {
            channel_id: parse_id(&raw.id)?,
            guild_id,
        })
    }
}

/// Source for `c<id>/messages.csv` + `c<id>/channel.json` exports.
pub struct ChannelLogSource {
    config: SourceConfig,
}

impl ChannelLogSource {
    /// Creates a new source with default file names.
    pub fn new() -> Self {
        Self::with_config(SourceConfig::default())
    }

    /// Creates a new source with custom configuration.
    pub fn with_config(config: SourceConfig) -> Self {
        Self { config }
    }

    /// Path of the sidecar that belongs to `log`.
    pub fn metadata_path(&self, log: &Path) -> PathBuf {
        log.parent()
            .unwrap_or_else(|| Path::new("."))
            .join(&self.config.metadata_file)
    }
}

impl Default for ChannelLogSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordSource for ChannelLogSource {
    fn name(&self) -> &'static str {
        "Channel CSV"
    }

    fn mode(&self) -> SourceMode {
        SourceMode::Csv
    }

    fn discover(&self, root: &Path) -> Result<Vec<PathBuf>> {
        find_channel_logs(root, &self.config.messages_file)
    }

    fn open(&self, path: &Path) -> Result<Box<dyn RecordIterator>> {
        let metadata = ChannelMetadata::load(&self.metadata_path(path))?;

        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;

        debug!(
            path = %path.display(),
            channel = metadata.channel_id,
            guild = ?metadata.guild_id,
            "opened channel log"
        );

        Ok(Box::new(ChannelLogIterator {
            rows: reader.into_byte_records(),
            path: path.to_path_buf(),
            metadata,
            read: 0,
            skipped: 0,
            finished: false,
        }))
    }
}

/// Row-by-row iterator over one channel log.
pub struct ChannelLogIterator {
    rows: csv::ByteRecordsIntoIter<File>,
    path: PathBuf,
    metadata: ChannelMetadata,
    read: usize,
    skipped: usize,
    finished: bool,
}

impl Iterator for ChannelLogIterator {
    type Item = MessageRecord;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            // Only the id column is decoded, so bad bytes elsewhere in a row
            // never cost the row.
            let row = match self.rows.next()? {
                Ok(row) => row,
                Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => {
                    warn!(path = %self.path.display(), error = %e, "stopped reading CSV");
                    self.finished = true;
                    return None;
                }
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "skipping row");
                    self.skipped += 1;
                    continue;
                }
            };

            let Some(first) = row.get(0) else {
                self.skipped += 1;
                continue;
            };
            let first = first.strip_prefix(UTF8_BOM).unwrap_or(first);
            if first == ID_HEADER.as_bytes() {
                continue;
            }

            let parsed = std::str::from_utf8(first)
                .map_err(|_| PurgeError::invalid_id(String::from_utf8_lossy(first)))
                .and_then(parse_id);
            match parsed {
                Ok(message_id) => {
                    self.read += 1;
                    return Some(
                        MessageRecord::new(self.metadata.channel_id, message_id)
                            .with_guild_opt(self.metadata.guild_id),
                    );
                }
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "skipping row");
                    self.skipped += 1;
                }
            }
        }
        None
    }
}

impl RecordIterator for ChannelLogIterator {
    fn records_read(&self) -> usize {
        self.read
    }

    fn records_skipped(&self) -> usize {
        self.skipped
    }
}
