//! Property-based tests for chatpurge.
//!
//! These tests generate random record streams, CSV logs and throttling
//! sequences to check the invariants of filtering, work-list building and
//! rate limiting.

use std::fs;

use proptest::prelude::*;
use tempfile::tempdir;

use chatpurge::MessageRecord;
use chatpurge::core::{FilterSets, WorkList, apply_filters};
use chatpurge::delete::{RateLimitSignals, RateLimitState};
use chatpurge::source::{ChannelLogSource, RecordSource};

/// Random record with ids from small pools so filters actually bite.
fn arb_record() -> impl Strategy<Value = MessageRecord> {
    (
        1i64..6,
        1i64..10_000,
        prop::option::of(1i64..4),
        prop::option::of(1i64..4),
    )
        .prop_map(|(channel, message, guild, author)| {
            let mut record = MessageRecord::new(channel, message).with_guild_opt(guild);
            record.author_id = author;
            record
        })
}

fn arb_records(max_len: usize) -> impl Strategy<Value = Vec<MessageRecord>> {
    prop::collection::vec(arb_record(), 0..max_len)
}

fn arb_id_set() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(1i64..6, 0..3)
}

fn arb_filters() -> impl Strategy<Value = FilterSets> {
    (arb_id_set(), arb_id_set(), arb_id_set()).prop_map(|(channels, guilds, authors)| {
        FilterSets::new()
            .with_channels(channels)
            .with_guilds(guilds)
            .with_authors(authors)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================
    // FILTER PROPERTIES
    // ============================================

    /// No filter means passthrough, whatever the ids
    #[test]
    fn no_filter_is_passthrough(records in arb_records(30)) {
        let kept: Vec<_> = apply_filters(records.clone(), &FilterSets::new()).collect();
        prop_assert_eq!(kept, records);
    }

    /// Filtering keeps a subsequence of the input
    #[test]
    fn filter_keeps_subsequence(records in arb_records(30), filters in arb_filters()) {
        let kept: Vec<_> = apply_filters(records.clone(), &filters).collect();
        let mut rest = records.iter();
        for record in &kept {
            prop_assert!(rest.any(|r| r == record), "order not preserved");
        }
    }

    /// Dimensions combine with AND: one pass equals three single-dimension passes, in any order
    #[test]
    fn filters_are_conjunctive_and_order_independent(
        records in arb_records(30),
        channels in arb_id_set(),
        guilds in arb_id_set(),
        authors in arb_id_set(),
    ) {
        let combined = FilterSets::new()
            .with_channels(channels.clone())
            .with_guilds(guilds.clone())
            .with_authors(authors.clone());
        let by_channel = FilterSets::new().with_channels(channels);
        let by_guild = FilterSets::new().with_guilds(guilds);
        let by_author = FilterSets::new().with_authors(authors);

        let at_once: Vec<_> = apply_filters(records.clone(), &combined).collect();

        let forward: Vec<_> = apply_filters(
            apply_filters(apply_filters(records.clone(), &by_channel), &by_guild),
            &by_author,
        )
        .collect();
        let backward: Vec<_> = apply_filters(
            apply_filters(apply_filters(records, &by_author), &by_guild),
            &by_channel,
        )
        .collect();

        prop_assert_eq!(&at_once, &forward);
        prop_assert_eq!(&at_once, &backward);
    }

    /// Every kept record matches every active dimension
    #[test]
    fn kept_records_satisfy_filters(records in arb_records(30), filters in arb_filters()) {
        for record in apply_filters(records, &filters) {
            if !filters.channels.is_empty() {
                prop_assert!(filters.channels.contains(&record.channel_id));
            }
            if !filters.guilds.is_empty() {
                prop_assert!(record.guild_id.is_some_and(|g| filters.guilds.contains(&g)));
            }
            if !filters.authors.is_empty() {
                prop_assert!(record.author_id.is_some_and(|a| filters.authors.contains(&a)));
            }
        }
    }

    // ============================================
    // WORK-LIST PROPERTIES
    // ============================================

    /// Grouping keeps every message once and per-channel order intact
    #[test]
    fn work_list_preserves_per_channel_order(records in arb_records(50)) {
        let work: WorkList = records.iter().copied().collect();
        prop_assert_eq!(work.message_count(), records.len());

        for channel in work.iter() {
            let expected: Vec<i64> = records
                .iter()
                .filter(|r| r.channel_id == channel.channel_id)
                .map(|r| r.message_id)
                .collect();
            prop_assert_eq!(&channel.messages, &expected);
        }
    }

    /// A CSV log with N id rows yields those N ids, in file order
    #[test]
    fn csv_log_yields_ids_in_order(ids in prop::collection::vec(1i64..i64::MAX, 0..40)) {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("channel.json"), r#"{"id": "7"}"#).unwrap();
        let mut csv = String::from("ID,Timestamp,Contents,Attachments\n");
        for id in &ids {
            csv.push_str(&format!("{},2024-01-01,text,\n", id));
        }
        let log = dir.path().join("messages.csv");
        fs::write(&log, csv).unwrap();

        let read: Vec<i64> = ChannelLogSource::new()
            .open(&log)
            .unwrap()
            .map(|r| r.message_id)
            .collect();
        prop_assert_eq!(read, ids);
    }

    // ============================================
    // RATE-LIMIT PROPERTIES
    // ============================================

    /// Consecutive throttles wait at least the reset delta, growing by one second each time
    #[test]
    fn throttle_waits_grow_with_skew(retry_after in 0.0f64..30.0, throttles in 1u32..20) {
        let now = 1_700_000_000;
        let mut state = RateLimitState::new();
        let base = retry_after.ceil() as u64;

        for attempt in 0..throttles {
            state.observe(&RateLimitSignals::retry_after(retry_after), now);
            let wait = state.throttle_wait(now).unwrap();
            prop_assert_eq!(wait.as_secs(), base + u64::from(attempt));
        }
        prop_assert_eq!(state.retry_attempts(), throttles);
    }

    /// Successes only clear the skew once it passed the threshold
    #[test]
    fn success_resets_only_past_threshold(throttles in 0u32..40, threshold in 0u32..30) {
        let mut state = RateLimitState::new();
        for _ in 0..throttles {
            state.observe(&RateLimitSignals::retry_after(0.0), 0);
            state.throttle_wait(0);
        }
        let reset = state.record_success(threshold);

        prop_assert_eq!(reset, throttles > threshold);
        let expected = if throttles > threshold { 0 } else { throttles };
        prop_assert_eq!(state.retry_attempts(), expected);
    }
}
