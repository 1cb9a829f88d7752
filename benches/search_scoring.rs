//! Benchmarks for the currency search scorer.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use kconvert::builtin_catalog;
use kconvert::services::search::search;

fn bench_search(c: &mut Criterion) {
    let catalog = builtin_catalog();

    c.bench_function("search_abbreviation", |b| {
        b.iter(|| search(black_box(&catalog), black_box("us")));
    });

    c.bench_function("search_multi_word", |b| {
        b.iter(|| search(black_box(&catalog), black_box("new zealand dollar")));
    });

    c.bench_function("search_phonetic", |b| {
        b.iter(|| search(black_box(&catalog), black_box("dollar")));
    });

    c.bench_function("search_empty_query", |b| {
        b.iter(|| search(black_box(&catalog), black_box("")));
    });
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
