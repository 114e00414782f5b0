//! Reader for saved message-search responses.
//!
//! A bundle is a JSON array of captured requests:
//!
//! ```json
//! [
//!   {
//!     "url": "https://discord.com/api/v9/guilds/9/messages/search?author_id=3",
//!     "content": {"content": "{\"messages\": [[{\"id\": \"111\", \"channel_id\": \"1\", \"author\": {\"id\": \"3\"}}]]}"}
//!   }
//! ]
//! ```
//!
//! The inner `content.content` string is itself JSON. Entries whose URL is not
//! a search endpoint, that carry no body, or whose body does not decode are
//! skipped one at a time.

use std::collections::VecDeque;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::MessageRecord;
use crate::config::SourceConfig;
use crate::error::{PurgeError, Result, parse_id};

use super::discovery::find_search_bundles;
use super::{RecordIterator, RecordSource, SourceMode};

#[derive(Debug, Deserialize)]
struct SearchEntry {
    url: String,
    #[serde(default)]
    content: Option<SearchBody>,
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    messages: Vec<Vec<RawMessage>>,
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    id: String,
    channel_id: String,
    author: RawAuthor,
}

#[derive(Debug, Deserialize)]
struct RawAuthor {
    id: String,
}

impl RawMessage {
    fn to_record(&self) -> Result<MessageRecord> {
        Ok(MessageRecord::new(parse_id(&self.channel_id)?, parse_id(&self.id)?)
            .with_author(parse_id(&self.author.id)?))
    }
}

/// Decodes one search response body into records, all or nothing.
fn decode_page(body: &str) -> Result<Vec<MessageRecord>> {
    let page: SearchPage = serde_json::from_str(body)?;
    page.messages
        .iter()
        .flatten()
        .map(RawMessage::to_record)
        .collect()
}

/// Source for saved search-result bundles.
pub struct SearchResultSource {
    url_pattern: Regex,
}

impl SearchResultSource {
    /// Creates a new source with the default URL pattern.
    pub fn new() -> Result<Self> {
        Self::with_config(&SourceConfig::default())
    }

    /// Creates a new source with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PurgeError::Config`] if the URL pattern is not a valid regex.
    pub fn with_config(config: &SourceConfig) -> Result<Self> {
        let url_pattern = Regex::new(&config.search_url_pattern)
            .map_err(|e| PurgeError::config(format!("search URL pattern: {e}")))?;
        Ok(Self { url_pattern })
    }
}

impl RecordSource for SearchResultSource {
    fn name(&self) -> &'static str {
        "Search JSON"
    }

    fn mode(&self) -> SourceMode {
        SourceMode::Search
    }

    fn discover(&self, root: &Path) -> Result<Vec<PathBuf>> {
        find_search_bundles(root)
    }

    fn open(&self, path: &Path) -> Result<Box<dyn RecordIterator>> {
        let file = File::open(path)?;
        let entries: Vec<SearchEntry> = serde_json::from_reader(BufReader::new(file))?;

        debug!(path = %path.display(), entries = entries.len(), "opened search bundle");

        Ok(Box::new(SearchResultIterator {
            entries: entries.into_iter(),
            pending: VecDeque::new(),
            url_pattern: self.url_pattern.clone(),
            path: path.to_path_buf(),
            read: 0,
            skipped: 0,
        }))
    }
}

/// Iterator over the messages of one bundle, decoding entries on demand.
pub struct SearchResultIterator {
    entries: std::vec::IntoIter<SearchEntry>,
    pending: VecDeque<MessageRecord>,
    url_pattern: Regex,
    path: PathBuf,
    read: usize,
    skipped: usize,
}

impl SearchResultIterator {
    fn expand(&mut self, entry: SearchEntry) {
        if !self.url_pattern.is_match(&entry.url) {
            debug!(url = %entry.url, "ignoring non-search entry");
            self.skipped += 1;
            return;
        }

        let Some(body) = entry.content.and_then(|c| match c.content {
            Some(body) => Some(body),
            None => {
                if let Some(error) = c.error {
                    warn!(url = %entry.url, error = %error, "search entry recorded an error");
                }
                None
            }
        }) else {
            self.skipped += 1;
            return;
        };

        match decode_page(&body) {
            Ok(records) => self.pending.extend(records),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    url = %entry.url,
                    error = %e,
                    "skipping undecodable search entry"
                );
                self.skipped += 1;
            }
        }
    }
}

impl Iterator for SearchResultIterator {
    type Item = MessageRecord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.pending.pop_front() {
                self.read += 1;
                return Some(record);
            }
            let entry = self.entries.next()?;
            self.expand(entry);
        }
    }
}

impl RecordIterator for SearchResultIterator {
    fn records_read(&self) -> usize {
        self.read
    }

    fn records_skipped(&self) -> usize {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const SEARCH_URL: &str = "https://discord.com/api/v9/guilds/9/messages/search?author_id=3";

    fn entry(url: &str, body: &str) -> serde_json::Value {
        serde_json::json!({"url": url, "content": {"content": body}})
    }

    fn bundle(entries: &[serde_json::Value]) -> (tempfile::TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("search.json");
        fs::write(&path, serde_json::to_string(entries).unwrap()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_decode_page_flattens_batches() {
        let body = r#"{"messages": [
            [{"id": "111", "channel_id": "1", "author": {"id": "3"}}],
            [{"id": "222", "channel_id": "2", "author": {"id": "4"}, "content": "hi"}]
        ], "total_results": 2}"#;

        let records = decode_page(body).unwrap();
        assert_eq!(
            records,
            vec![
                MessageRecord::new(1, 111).with_author(3),
                MessageRecord::new(2, 222).with_author(4),
            ]
        );
    }

    #[test]
    fn test_decode_page_rejects_bad_id() {
        let body = r#"{"messages": [[{"id": "x", "channel_id": "1", "author": {"id": "3"}}]]}"#;
        assert!(decode_page(body).is_err());
    }

    #[test]
    fn test_reads_matching_entries() {
        let (_dir, path) = bundle(&[
            entry(
                SEARCH_URL,
                r#"{"messages": [[{"id": "111", "channel_id": "1", "author": {"id": "3"}}]]}"#,
            ),
            entry(
                "https://discord.com/api/v9/users/@me",
                r#"{"messages": [[{"id": "999", "channel_id": "1", "author": {"id": "3"}}]]}"#,
            ),
            serde_json::json!({"url": SEARCH_URL, "content": {"error": "rate limited"}}),
            serde_json::json!({"url": SEARCH_URL}),
            entry(SEARCH_URL, "{broken"),
            entry(
                "https://discord.com/api/v9/channels/1/messages/search?content=x",
                r#"{"messages": [[{"id": "222", "channel_id": "1", "author": {"id": "3"}}]]}"#,
            ),
        ]);

        let source = SearchResultSource::new().unwrap();
        let mut iter = source.open(&path).unwrap();
        let ids: Vec<i64> = iter.by_ref().map(|r| r.message_id).collect();

        assert_eq!(ids, vec![111, 222]);
        assert_eq!(iter.records_read(), 2);
        assert_eq!(iter.records_skipped(), 4);
    }

    #[test]
    fn test_invalid_bundle_is_file_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("search.json");
        fs::write(&path, r#"{"not": "a list"}"#).unwrap();

        let source = SearchResultSource::new().unwrap();
        assert!(source.open(&path).is_err());
    }

    #[test]
    fn test_bad_pattern_is_config_error() {
        let config = SourceConfig::new().with_search_url_pattern("(unclosed");
        let err = SearchResultSource::with_config(&config).err().unwrap();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_records_have_no_guild() {
        let (_dir, path) = bundle(&[entry(
            SEARCH_URL,
            r#"{"messages": [[{"id": "111", "channel_id": "1", "author": {"id": "3"}}]]}"#,
        )]);
        let source = SearchResultSource::new().unwrap();
        let record = source.open(&path).unwrap().next().unwrap();
        assert_eq!(record.guild_id, None);
    }
}
