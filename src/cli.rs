//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`parse_id_list`] - comma-delimited id lists as used by the filter flags
//!
//! # Example
//!
//! ```rust
//! use chatpurge::cli::parse_id_list;
//!
//! let (ids, rejected) = parse_id_list("1, 2,x");
//! assert_eq!(ids, vec![1, 2]);
//! assert_eq!(rejected, vec!["x".to_string()]);
//! ```

use std::time::Duration;

use clap::Parser;

use crate::config::{DEFAULT_API_BASE, DeleterConfig};
use crate::core::FilterSets;
use crate::error::parse_id;
use crate::source::SourceMode;

/// Bulk-delete your own Discord messages from a data-package export
/// or from saved message-search results.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatpurge")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatpurge --dir package/messages --bot-token <TOKEN>
    chatpurge --dir package/messages --guilds 81384788765712384 --dir-confirm
    chatpurge --search --dir search-dumps --authors 80351110224678912 --yes
    USER_TOKEN=<TOKEN> chatpurge --dir . --channels 1,2,3")]
pub struct Args {
    /// Export root to scan (prompted for when absent)
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<String>,

    /// Take --dir without asking for confirmation
    #[arg(long, alias = "dirconfirm")]
    pub dir_confirm: bool,

    /// Only delete in these channels (comma-delimited ids)
    #[arg(long, value_name = "IDS")]
    pub channels: Option<String>,

    /// Only delete in these guilds (comma-delimited ids, CSV mode only)
    #[arg(long, value_name = "IDS")]
    pub guilds: Option<String>,

    /// Only delete messages by these authors (comma-delimited ids, search mode only)
    #[arg(long, value_name = "IDS")]
    pub authors: Option<String>,

    /// Bot token, sent as "Bot <token>"
    #[arg(long, alias = "bottoken", env = "BOT_TOKEN", hide_env_values = true)]
    pub bot_token: Option<String>,

    /// User token, sent verbatim
    #[arg(long, alias = "usertoken", env = "USER_TOKEN", hide_env_values = true)]
    pub user_token: Option<String>,

    /// Read saved search-result JSON instead of channel CSV logs
    #[arg(short, long)]
    pub search: bool,

    /// Run retry waves without asking
    #[arg(short, long)]
    pub yes: bool,

    /// Delete endpoint prefix
    #[arg(long, value_name = "URL", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Successes reset the throttle skew only after this many retries
    #[arg(long, value_name = "N", default_value_t = 15)]
    pub reset_threshold: u32,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,
}

impl Args {
    /// The export shape selected by `--search`.
    pub fn mode(&self) -> SourceMode {
        if self.search {
            SourceMode::Search
        } else {
            SourceMode::Csv
        }
    }

    /// Builds the filter sets from the id-list flags.
    ///
    /// Returns the items that were not valid ids alongside.
    pub fn filters(&self) -> (FilterSets, Vec<String>) {
        let mut rejected = Vec::new();
        let mut list = |flag: &Option<String>| {
            let (ids, bad) = flag.as_deref().map(parse_id_list).unwrap_or_default();
            rejected.extend(bad);
            ids
        };

        let filters = FilterSets::new()
            .with_channels(list(&self.channels))
            .with_guilds(list(&self.guilds))
            .with_authors(list(&self.authors));
        (filters, rejected)
    }

    /// Deleter settings from the flags.
    pub fn deleter_config(&self) -> DeleterConfig {
        DeleterConfig::new()
            .with_api_base(self.api_base.as_str())
            .with_reset_threshold(self.reset_threshold)
            .with_timeout(Duration::from_secs(self.timeout))
    }
}

/// Splits a comma-delimited id list.
///
/// Empty items are skipped silently; items that are not integers are
/// returned in the second vector so the caller can warn about them.
pub fn parse_id_list(input: &str) -> (Vec<i64>, Vec<String>) {
    let mut ids = Vec::new();
    let mut rejected = Vec::new();

    for item in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match parse_id(item) {
            Ok(id) => ids.push(id),
            Err(_) => rejected.push(item.to_string()),
        }
    }

    (ids, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("chatpurge").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list("1,2,3"), (vec![1, 2, 3], vec![]));
        assert_eq!(parse_id_list(" 7 , ,8,"), (vec![7, 8], vec![]));
        assert_eq!(parse_id_list(""), (vec![], vec![]));
    }

    #[test]
    fn test_parse_id_list_rejects_garbage() {
        let (ids, rejected) = parse_id_list("1,abc,99999999999999999999,2");
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(rejected, vec!["abc", "99999999999999999999"]);
    }

    #[test]
    fn test_defaults() {
        let a = args(&[]);
        assert_eq!(a.mode(), SourceMode::Csv);
        assert_eq!(a.api_base, DEFAULT_API_BASE);
        assert_eq!(a.reset_threshold, 15);
        assert_eq!(a.timeout, 30);
        assert!(!a.yes);
        assert!(!a.filters().0.is_active());
    }

    #[test]
    fn test_search_mode() {
        assert_eq!(args(&["--search"]).mode(), SourceMode::Search);
    }

    #[test]
    fn test_filters_from_flags() {
        let a = args(&["--channels", "1,2", "--guilds", "9", "--authors", "5,x"]);
        let (filters, rejected) = a.filters();

        assert_eq!(filters.channels.len(), 2);
        assert!(filters.guilds.contains(&9));
        assert!(filters.authors.contains(&5));
        assert_eq!(rejected, vec!["x"]);
    }

    #[test]
    fn test_legacy_flag_aliases() {
        let a = args(&["--dirconfirm", "--bottoken", "abc"]);
        assert!(a.dir_confirm);
        assert_eq!(a.bot_token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_deleter_config_from_flags() {
        let a = args(&["--api-base", "http://localhost:1/channels/", "--reset-threshold", "3", "--timeout", "5"]);
        let config = a.deleter_config();

        assert_eq!(config.api_base, "http://localhost:1/channels");
        assert_eq!(config.reset_threshold, 3);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
