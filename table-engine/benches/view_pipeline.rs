//! Benchmarks for the table view pipeline
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use engine::Record;
use table_engine::{
    calculate_table_view, Header, HeaderSet, RowsPerPage, TableRows, ViewOptions,
};

const CATEGORIES: [&str; 5] = ["alpha", "beta", "gamma", "delta", "epsilon"];

fn synthetic_records(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            Record::new()
                .with("id", i as f64)
                .with("name", format!("record-{}", i))
                .with("category", CATEGORIES[i % CATEGORIES.len()])
                .with("score", ((i * 37) % 1000) as f64)
        })
        .collect()
}

fn bench_sorted_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("sorted_view");
    for count in [100usize, 1_000, 10_000] {
        let items = synthetic_records(count);
        let headers = HeaderSet::new(vec![Header::new("name"), Header::new("score")]);
        let options = ViewOptions {
            sort_by: vec!["score".to_string(), "name".to_string()],
            sort_desc: vec![true, false],
            rows_per_page: RowsPerPage::Limited(25),
            ..ViewOptions::default()
        };

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &items, |b, items| {
            b.iter(|| {
                let view =
                    calculate_table_view(black_box(items), &headers, &options, None).unwrap();
                black_box(view)
            })
        });
    }
    group.finish();
}

fn bench_grouped_view(c: &mut Criterion) {
    let items = synthetic_records(10_000);
    let headers = HeaderSet::new(vec![Header::new("category"), Header::new("score")]);
    let options = ViewOptions {
        sort_by: vec!["score".to_string()],
        sort_desc: vec![false],
        rows_per_page: RowsPerPage::All,
        ..ViewOptions::default()
    };

    c.bench_function("grouped_view_10k", |b| {
        b.iter(|| {
            let view =
                calculate_table_view(black_box(&items), &headers, &options, Some("category"))
                    .unwrap();
            assert!(matches!(view.rows, TableRows::Grouped(_)));
            black_box(view)
        })
    });
}

fn bench_filtered_view(c: &mut Criterion) {
    let items = synthetic_records(10_000);
    let headers = HeaderSet::new(vec![Header::new("score")
        .with_filter(|v| matches!(v, engine::FieldValue::Number(n) if *n >= 500.0))]);
    let options = ViewOptions {
        search: Some("record-1".to_string()),
        ..ViewOptions::default()
    };

    c.bench_function("filtered_view_10k", |b| {
        b.iter(|| {
            let view = calculate_table_view(black_box(&items), &headers, &options, None).unwrap();
            black_box(view)
        })
    });
}

criterion_group!(
    benches,
    bench_sorted_view,
    bench_grouped_view,
    bench_filtered_view
);
criterion_main!(benches);
