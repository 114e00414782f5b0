//! Normalized message record shared by every source reader.
//!
//! Both export shapes decode into [`MessageRecord`]: per-channel CSV logs know
//! the channel and (for server channels) the guild, but not the author; search
//! result bundles know the channel and the author, but not the guild. Missing
//! dimensions are `None`.
//!
//! # Example
//!
//! ```
//! use chatpurge::MessageRecord;
//!
//! let record = MessageRecord::new(1, 111).with_guild(9);
//! assert_eq!(record.channel_id, 1);
//! assert_eq!(record.guild_id, Some(9));
//! assert_eq!(record.author_id, None);
//! ```

use serde::{Deserialize, Serialize};

/// One message that is a candidate for deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Channel the message lives in.
    pub channel_id: i64,

    /// Guild owning the channel, when the export says so.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<i64>,

    /// Author of the message, when the export says so.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<i64>,

    /// Message snowflake.
    pub message_id: i64,
}

impl MessageRecord {
    /// Creates a record with only the mandatory ids.
    pub fn new(channel_id: i64, message_id: i64) -> Self {
        Self {
            channel_id,
            guild_id: None,
            author_id: None,
            message_id,
        }
    }

    /// Sets the guild id.
    #[must_use]
    pub fn with_guild(mut self, guild_id: i64) -> Self {
        self.guild_id = Some(guild_id);
        self
    }

    /// Sets the guild id from an optional value.
    #[must_use]
    pub fn with_guild_opt(mut self, guild_id: Option<i64>) -> Self {
        self.guild_id = guild_id;
        self
    }

    /// Sets the author id.
    #[must_use]
    pub fn with_author(mut self, author_id: i64) -> Self {
        self.author_id = Some(author_id);
        self
    }
}
