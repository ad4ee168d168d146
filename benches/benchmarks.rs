//! Query and tokenization benchmarks
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use velocity::index::TrigramIndex;
use velocity::utils::{generate_trigrams, unique_trigrams};

/// Build an index over generated notes
fn create_benchmark_index(docs: usize) -> TrigramIndex {
    let mut index = TrigramIndex::new();
    for i in 0..docs {
        let content = format!(
            r#"Note {i}
Meeting with team {team} about the quarterly budget.
Action items: review parser_{i}, update deploy scripts, order tomatoes.
Tags: project{project} weekly{week}
"#,
            i = i,
            team = i % 13,
            project = i % 97,
            week = i % 52,
        );
        index.add(&content);
    }
    index
}

fn bench_search(c: &mut Criterion) {
    let index = create_benchmark_index(20_000);
    let queries = vec![
        "meeting",
        "quarterly budget",
        "parser_1234",
        "project42 weekly7",
        "nonexistent",
        "ab",
    ];

    let mut group = c.benchmark_group("search");
    for query in queries {
        group.bench_with_input(BenchmarkId::from_parameter(query), &query, |b, &q| {
            b.iter(|| index.search(black_box(q)))
        });
    }
    group.finish();
}

fn bench_trigram_generation(c: &mut Criterion) {
    let ascii = "The quick brown fox jumps over the lazy dog. ".repeat(200);
    let unicode = "Größere Straßen führen nach München und Zürich. ".repeat(200);

    let mut group = c.benchmark_group("trigrams");
    group.bench_function("generate_ascii", |b| {
        b.iter(|| generate_trigrams(black_box(&ascii)))
    });
    group.bench_function("generate_unicode", |b| {
        b.iter(|| generate_trigrams(black_box(&unicode)))
    });
    group.bench_function("unique_ascii", |b| {
        b.iter(|| unique_trigrams(black_box(&ascii)))
    });
    group.finish();
}

criterion_group!(benches, bench_search, bench_trigram_generation);
criterion_main!(benches);
