//! Benchmark tests for the tree builders

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use knowledge_tree::tree::{
    build_record_tree, build_tree, format_tree, CloudRecord, FormatOptions, RecordTreeOptions,
    DRIVE_FOLDER_MIME,
};

/// Paths spread over `dir_count` folders, two levels deep
fn create_paths(file_count: usize, dir_count: usize) -> Vec<String> {
    (0..file_count)
        .map(|f| {
            let d = f % dir_count;
            format!("dir{}/sub{}/file{}.txt", d, d % 3, f)
        })
        .collect()
}

/// A flat folder layout in parent-pointer form, children listed before parents
fn create_records(file_count: usize, dir_count: usize) -> Vec<CloudRecord> {
    let mut records: Vec<CloudRecord> = (0..file_count)
        .map(|f| CloudRecord {
            id: format!("file{}", f),
            name: format!("file{}.txt", f),
            mime_type: Some("text/plain".to_string()),
            file_type: None,
            parents: vec![format!("dir{}", f % dir_count)],
        })
        .collect();
    records.extend((0..dir_count).map(|d| CloudRecord {
        id: format!("dir{}", d),
        name: format!("Folder {}", d),
        mime_type: Some(DRIVE_FOLDER_MIME.to_string()),
        file_type: None,
        parents: vec!["root".to_string()],
    }));
    records
}

fn benchmark_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("paths");

    for size in [100, 1000, 10000].iter() {
        let paths = create_paths(*size, 10);
        group.bench_with_input(BenchmarkId::new("build", size), size, |b, _| {
            b.iter(|| build_tree(black_box(&paths)))
        });
    }

    group.finish();
}

fn benchmark_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("records");
    let options = RecordTreeOptions::new().with_root_id("root");

    for size in [100, 1000, 10000].iter() {
        let records = create_records(*size, 50);
        group.bench_with_input(BenchmarkId::new("build", size), size, |b, _| {
            b.iter(|| build_record_tree(black_box(&records), &options))
        });
    }

    group.finish();
}

fn benchmark_format(c: &mut Criterion) {
    let nodes = build_tree(create_paths(1000, 10));
    let options = FormatOptions::new();

    c.bench_function("format_tree_1000", |b| {
        b.iter(|| format_tree(black_box(&nodes), &options))
    });
}

criterion_group!(benches, benchmark_paths, benchmark_records, benchmark_format);
criterion_main!(benches);
