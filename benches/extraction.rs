//! Benchmarks for chatpurge extraction: readers, filters and work-list building.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench extraction -- channel_log`

use std::fs;
use std::path::Path;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tempfile::TempDir;

use chatpurge::MessageRecord;
use chatpurge::core::{FilterSets, WorkList, apply_filters, extract_from_root};
use chatpurge::source::{ChannelLogSource, SearchResultSource};

// =============================================================================
// Test Data Generators
// =============================================================================

fn write_channel_logs(root: &Path, channels: usize, per_channel: usize) {
    for c in 0..channels {
        let dir = root.join(format!("c{}", c));
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("channel.json"),
            format!(r#"{{"id": "{}", "guild": {{"id": "{}"}}}}"#, c, c % 3),
        )
        .unwrap();

        let mut csv = String::from("ID,Timestamp,Contents,Attachments\n");
        for i in 0..per_channel {
            csv.push_str(&format!(
                "{},2024-01-15 10:30:00.000000+00:00,Message number {},\n",
                c * per_channel + i,
                i
            ));
        }
        fs::write(dir.join("messages.csv"), csv).unwrap();
    }
}

fn write_search_bundle(root: &Path, count: usize) {
    let mut entries = Vec::new();
    for page in 0..count.div_ceil(25) {
        let hits: Vec<String> = (page * 25..((page + 1) * 25).min(count))
            .map(|i| {
                format!(
                    r#"[{{"id": "{}", "channel_id": "{}", "author": {{"id": "{}"}}}}]"#,
                    i,
                    i % 10,
                    i % 2
                )
            })
            .collect();
        let body = format!(r#"{{"messages": [{}]}}"#, hits.join(","));
        entries.push(serde_json::json!({
            "url": "https://discord.com/api/v9/guilds/1/messages/search?author_id=0",
            "content": { "content": body }
        }));
    }
    fs::write(
        root.join("search.json"),
        serde_json::to_string(&entries).unwrap(),
    )
    .unwrap();
}

fn generate_records(count: usize) -> Vec<MessageRecord> {
    (0..count)
        .map(|i| {
            let i = i as i64;
            MessageRecord::new(i % 50, i)
                .with_guild(i % 5)
                .with_author(i % 2)
        })
        .collect()
}

// =============================================================================
// Reader Benchmarks
// =============================================================================

fn bench_channel_log_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("channel_log");
    let source = ChannelLogSource::new();

    for size in [1_000_usize, 10_000, 100_000] {
        let dir = TempDir::new().unwrap();
        write_channel_logs(dir.path(), 20, size / 20);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &dir, |b, dir| {
            b.iter(|| {
                let extraction =
                    extract_from_root(&source, black_box(dir.path()), &FilterSets::new()).unwrap();
                black_box(extraction)
            });
        });
    }
    group.finish();
}

fn bench_search_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let source = SearchResultSource::new().unwrap();

    for size in [1_000_usize, 10_000, 50_000] {
        let dir = TempDir::new().unwrap();
        write_search_bundle(dir.path(), size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &dir, |b, dir| {
            b.iter(|| {
                let extraction =
                    extract_from_root(&source, black_box(dir.path()), &FilterSets::new()).unwrap();
                black_box(extraction)
            });
        });
    }
    group.finish();
}

// =============================================================================
// Filter / Work-List Benchmarks
// =============================================================================

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("filters");
    let filters = FilterSets::new()
        .with_channels(0..25)
        .with_guilds([1, 2, 3]);

    for size in [10_000_usize, 100_000] {
        let records = generate_records(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| {
                let kept = apply_filters(black_box(records.iter().copied()), &filters).count();
                black_box(kept)
            });
        });
    }
    group.finish();
}

fn bench_worklist_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("worklist");

    for size in [10_000_usize, 100_000] {
        let records = generate_records(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| {
                let work: WorkList = black_box(records.iter().copied()).collect();
                black_box(work)
            });
        });
    }
    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_channel_log_extraction,
    bench_search_extraction,
    bench_filters,
    bench_worklist_build,
);

criterion_main!(benches);
