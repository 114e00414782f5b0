//! Filter records by channel, guild and author.
//!
//! This module provides [`FilterSets`] for defining allow-lists and
//! [`apply_filters`] for filtering a record stream.
//!
//! # Filter Dimensions
//!
//! | Dimension | Method | Meaningful in |
//! |-----------|--------|---------------|
//! | Channel | [`with_channels`](FilterSets::with_channels) | every mode |
//! | Guild | [`with_guilds`](FilterSets::with_guilds) | CSV + metadata |
//! | Author | [`with_authors`](FilterSets::with_authors) | search JSON |
//!
//! # Example
//!
//! ```
//! use chatpurge::MessageRecord;
//! use chatpurge::core::filter::{FilterSets, apply_filters};
//!
//! let records = vec![
//!     MessageRecord::new(1, 10).with_guild(9),
//!     MessageRecord::new(2, 20).with_guild(9),
//!     MessageRecord::new(3, 30),
//! ];
//!
//! let filters = FilterSets::new().with_guilds([9]).with_channels([2, 3]);
//! let kept: Vec<_> = apply_filters(records, &filters).collect();
//!
//! assert_eq!(kept, vec![MessageRecord::new(2, 20).with_guild(9)]);
//! ```
//!
//! # Behavior Notes
//!
//! - An empty set never excludes anything on its dimension
//! - A record lacking the id of an active dimension is dropped
//! - Dimensions are combined with AND logic

use std::collections::HashSet;
use std::fmt;

use crate::MessageRecord;
use crate::source::SourceMode;

/// Allow-lists for the three filter dimensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSets {
    /// Keep only records in these channels (empty: keep all).
    pub channels: HashSet<i64>,

    /// Keep only records in these guilds (empty: keep all).
    pub guilds: HashSet<i64>,

    /// Keep only records by these authors (empty: keep all).
    pub authors: HashSet<i64>,
}

/// A filter dimension that the selected mode cannot evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterWarning {
    /// Guild filter set while reading search results.
    GuildIgnored {
        /// Number of guild ids that were configured
        count: usize,
    },
    /// Author filter set while reading CSV logs.
    AuthorIgnored {
        /// Number of author ids that were configured
        count: usize,
    },
}

impl fmt::Display for FilterWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterWarning::GuildIgnored { count } => write!(
                f,
                "guild filter ({count} ids) ignored: search results carry no guild id"
            ),
            FilterWarning::AuthorIgnored { count } => write!(
                f,
                "author filter ({count} ids) ignored: channel logs carry no author id"
            ),
        }
    }
}

impl FilterSets {
    /// Creates an empty filter set; every record passes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds channel ids to the channel allow-list.
    #[must_use]
    pub fn with_channels(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.channels.extend(ids);
        self
    }

    /// Adds guild ids to the guild allow-list.
    #[must_use]
    pub fn with_guilds(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.guilds.extend(ids);
        self
    }

    /// Adds author ids to the author allow-list.
    #[must_use]
    pub fn with_authors(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.authors.extend(ids);
        self
    }

    /// Returns `true` if any dimension is restricted.
    pub fn is_active(&self) -> bool {
        !self.channels.is_empty() || !self.guilds.is_empty() || !self.authors.is_empty()
    }

    /// Returns the sets that `mode` can evaluate, plus a warning for every
    /// dimension that had to be dropped.
    pub fn for_mode(&self, mode: SourceMode) -> (FilterSets, Vec<FilterWarning>) {
        let mut effective = self.clone();
        let mut warnings = Vec::new();

        if !mode.carries_guild() && !effective.guilds.is_empty() {
            warnings.push(FilterWarning::GuildIgnored {
                count: effective.guilds.len(),
            });
            effective.guilds.clear();
        }
        if !mode.carries_author() && !effective.authors.is_empty() {
            warnings.push(FilterWarning::AuthorIgnored {
                count: effective.authors.len(),
            });
            effective.authors.clear();
        }

        (effective, warnings)
    }

    /// Checks a record against every active dimension.
    pub fn allows(&self, record: &MessageRecord) -> bool {
        allowed(&self.channels, Some(record.channel_id))
            && allowed(&self.guilds, record.guild_id)
            && allowed(&self.authors, record.author_id)
    }
}

fn allowed(set: &HashSet<i64>, id: Option<i64>) -> bool {
    set.is_empty() || id.is_some_and(|id| set.contains(&id))
}

/// Lazily keeps the records that pass `filters`.
pub fn apply_filters<'a, I>(
    records: I,
    filters: &'a FilterSets,
) -> impl Iterator<Item = MessageRecord> + 'a
where
    I: IntoIterator<Item = MessageRecord>,
    I::IntoIter: 'a,
{
    records.into_iter().filter(move |r| filters.allows(r))
}
