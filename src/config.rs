//! Configuration types for readers and the deleter.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`SourceConfig`] - file names and URL pattern used by the source readers
//! - [`DeleterConfig`] - endpoint, timeouts and throttling policy
//! - [`Auth`] - the credential attached to every delete request
//!
//! # Example
//!
//! ```rust
//! use chatpurge::config::{Auth, DeleterConfig};
//! use std::time::Duration;
//!
//! let config = DeleterConfig::new()
//!     .with_reset_threshold(20)
//!     .with_timeout(Duration::from_secs(10));
//!
//! let auth = Auth::from_tokens(Some("abc".into()), None).unwrap();
//! assert_eq!(auth.header_value(), "Bot abc");
//! ```

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PurgeError, Result};

/// Default delete endpoint prefix; `/{channel}/messages/{message}` is appended.
pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v9/channels";

/// URLs of search-result entries that are eligible for extraction.
pub const DEFAULT_SEARCH_URL_PATTERN: &str =
    r"^https://(?:(?:ptb|canary)\.)?discord(?:app)?\.com/api/v\d+/(?:guilds|channels)/\d+/messages/search";

/// Configuration for the source readers.
///
/// # Example
///
/// ```rust
/// use chatpurge::config::SourceConfig;
///
/// let config = SourceConfig::new().with_metadata_file("meta.json");
/// assert_eq!(config.messages_file, "messages.csv");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Name of the per-channel CSV log (default: `messages.csv`)
    pub messages_file: String,

    /// Name of the channel metadata sidecar next to it (default: `channel.json`)
    pub metadata_file: String,

    /// Regex a search-result URL must match (default: Discord message search)
    pub search_url_pattern: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            messages_file: "messages.csv".to_string(),
            metadata_file: "channel.json".to_string(),
            search_url_pattern: DEFAULT_SEARCH_URL_PATTERN.to_string(),
        }
    }
}

impl SourceConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the CSV log file name.
    #[must_use]
    pub fn with_messages_file(mut self, name: impl Into<String>) -> Self {
        self.messages_file = name.into();
        self
    }

    /// Sets the metadata sidecar file name.
    #[must_use]
    pub fn with_metadata_file(mut self, name: impl Into<String>) -> Self {
        self.metadata_file = name.into();
        self
    }

    /// Sets the search URL pattern.
    #[must_use]
    pub fn with_search_url_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.search_url_pattern = pattern.into();
        self
    }
}

/// Configuration for the rate-limited deleter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleterConfig {
    /// Endpoint prefix (default: [`DEFAULT_API_BASE`])
    pub api_base: String,

    /// Successes reset the retry-attempt counter only once it exceeds this (default: 15)
    pub reset_threshold: u32,

    /// Per-request timeout (default: 30s)
    pub timeout: Duration,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for DeleterConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            reset_threshold: 15,
            timeout: Duration::from_secs(30),
            user_agent: format!("chatpurge/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl DeleterConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the endpoint prefix. A trailing `/` is dropped.
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        let base = base.into();
        self.api_base = base.trim_end_matches('/').to_string();
        self
    }

    /// Sets the retry-counter reset threshold.
    #[must_use]
    pub fn with_reset_threshold(mut self, threshold: u32) -> Self {
        self.reset_threshold = threshold;
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Builds the delete URL for one message.
    pub fn message_url(&self, channel_id: i64, message_id: i64) -> String {
        format!("{}/{}/messages/{}", self.api_base, channel_id, message_id)
    }
}

/// Credential used for the `Authorization` header.
///
/// The token itself never shows up in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    /// Bot token, sent as `Bot {token}`
    Bot(String),

    /// User token, sent verbatim
    User(String),
}

impl Auth {
    /// Picks the credential to use. A bot token wins when both are present;
    /// blank tokens count as absent.
    pub fn from_tokens(bot: Option<String>, user: Option<String>) -> Result<Self> {
        let non_blank = |t: Option<String>| t.filter(|t| !t.trim().is_empty());

        match (non_blank(bot), non_blank(user)) {
            (Some(token), _) => Ok(Auth::Bot(token.trim().to_string())),
            (None, Some(token)) => Ok(Auth::User(token.trim().to_string())),
            (None, None) => Err(PurgeError::MissingToken),
        }
    }

    /// Value of the `Authorization` header.
    pub fn header_value(&self) -> String {
        match self {
            Auth::Bot(token) => format!("Bot {token}"),
            Auth::User(token) => token.clone(),
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Auth::Bot(_) => "bot",
            Auth::User(_) => "user",
        }
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Auth::{}(<redacted>)", self.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_config_defaults() {
        let config = SourceConfig::default();
        assert_eq!(config.messages_file, "messages.csv");
        assert_eq!(config.metadata_file, "channel.json");
        assert_eq!(config.search_url_pattern, DEFAULT_SEARCH_URL_PATTERN);
    }

    #[test]
    fn test_source_config_partial_deserialize() {
        let config: SourceConfig = serde_json::from_str(r#"{"metadata_file": "meta.json"}"#).unwrap();
        assert_eq!(config.metadata_file, "meta.json");
        assert_eq!(config.messages_file, "messages.csv");
    }

    #[test]
    fn test_deleter_config_builder() {
        let config = DeleterConfig::new()
            .with_api_base("http://localhost:8080/channels/")
            .with_reset_threshold(3)
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.api_base, "http://localhost:8080/channels");
        assert_eq!(config.reset_threshold, 3);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_message_url() {
        let config = DeleterConfig::default();
        assert_eq!(
            config.message_url(1, 111),
            "https://discord.com/api/v9/channels/1/messages/111"
        );
    }

    #[test]
    fn test_auth_bot_takes_precedence() {
        let auth = Auth::from_tokens(Some("bot".into()), Some("user".into())).unwrap();
        assert_eq!(auth, Auth::Bot("bot".into()));
        assert_eq!(auth.header_value(), "Bot bot");
    }

    #[test]
    fn test_auth_user_token() {
        let auth = Auth::from_tokens(None, Some("user".into())).unwrap();
        assert_eq!(auth.header_value(), "user");
        assert_eq!(auth.kind(), "user");
    }

    #[test]
    fn test_auth_blank_counts_as_absent() {
        let auth = Auth::from_tokens(Some("  ".into()), Some("user".into())).unwrap();
        assert_eq!(auth, Auth::User("user".into()));
        assert!(matches!(
            Auth::from_tokens(Some(String::new()), None),
            Err(PurgeError::MissingToken)
        ));
    }

    #[test]
    fn test_auth_debug_redacts() {
        let auth = Auth::Bot("super-secret".into());
        let debug = format!("{:?}", auth);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("bot"));
    }
}
