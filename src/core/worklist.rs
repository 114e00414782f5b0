//! Per-channel delete work lists.
//!
//! A [`WorkList`] maps a channel id to the message ids that still have to be
//! deleted in it. The extraction pipeline builds the first one; every delete
//! wave hands the next wave a fresh one holding whatever was throttled.
//!
//! # Ordering
//!
//! Message ids keep the order in which they were pushed, per channel.
//! Iteration order **across** channels is unspecified and may differ from run
//! to run.

use std::collections::HashMap;
use std::collections::hash_map;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::MessageRecord;

/// Messages to delete in one channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelWork {
    /// Channel the messages live in.
    pub channel_id: i64,
    /// Message ids, in collection order.
    pub messages: Vec<i64>,
}

impl ChannelWork {
    /// Creates an empty item for `channel_id`.
    pub fn new(channel_id: i64) -> Self {
        Self {
            channel_id,
            messages: Vec::new(),
        }
    }
}

/// Counts reported to the operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkListSummary {
    /// Number of channels with at least one message.
    pub channels: usize,
    /// Total number of message ids.
    pub messages: usize,
}

impl fmt::Display for WorkListSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} channels with {} messages",
            self.channels, self.messages
        )
    }
}

/// Channel id → pending message ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkList {
    channels: HashMap<i64, ChannelWork>,
}

impl WorkList {
    /// Creates an empty work list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `message_id` to the channel's item, creating it on first use.
    pub fn push(&mut self, channel_id: i64, message_id: i64) {
        self.channels
            .entry(channel_id)
            .or_insert_with(|| ChannelWork::new(channel_id))
            .messages
            .push(message_id);
    }

    /// Appends one record.
    pub fn push_record(&mut self, record: &MessageRecord) {
        self.push(record.channel_id, record.message_id);
    }

    /// Returns the item for `channel_id`, if any.
    pub fn get(&self, channel_id: i64) -> Option<&ChannelWork> {
        self.channels.get(&channel_id)
    }

    /// Returns `true` if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Number of channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Total number of message ids.
    pub fn message_count(&self) -> usize {
        self.channels.values().map(|c| c.messages.len()).sum()
    }

    /// Channel and message totals.
    pub fn summary(&self) -> WorkListSummary {
        WorkListSummary {
            channels: self.channel_count(),
            messages: self.message_count(),
        }
    }

    /// Channel ids in ascending order, for stable display.
    pub fn channel_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.channels.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Iterates over channel items in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &ChannelWork> {
        self.channels.values()
    }
}

impl FromIterator<MessageRecord> for WorkList {
    fn from_iter<T: IntoIterator<Item = MessageRecord>>(iter: T) -> Self {
        let mut list = WorkList::new();
        list.extend(iter);
        list
    }
}

impl Extend<MessageRecord> for WorkList {
    fn extend<T: IntoIterator<Item = MessageRecord>>(&mut self, iter: T) {
        for record in iter {
            self.push_record(&record);
        }
    }
}

impl IntoIterator for WorkList {
    type Item = ChannelWork;
    type IntoIter = hash_map::IntoValues<i64, ChannelWork>;

    fn into_iter(self) -> Self::IntoIter {
        self.channels.into_values()
    }
}
