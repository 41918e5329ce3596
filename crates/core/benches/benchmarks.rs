//! Benchmarks for datefinder-core.
//!
//! Run with: `cargo bench -p datefinder-core`
//!
//! Results are saved to `target/criterion/` with HTML reports.

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use datefinder_core::{normalize, parse, DateFinder};

/// Benchmark inputs representing typical OCR output.
struct BenchmarkInputs {
    /// A short receipt line
    receipt: &'static str,
    /// Glued, misread text
    glued: &'static str,
    /// Several dates in several families
    mixed: &'static str,
    /// No date at all
    text: &'static str,
}

const INPUTS: BenchmarkInputs = BenchmarkInputs {
    receipt: "Invoice: 01/01/2020. Due: 15/06/2021.",
    glued: "P@yment rec'd 25thofJanuary1971 ** thx",
    mixed: "Born 25 January 1971, renewed 2020-03-05, expires 12/25/2024 (Mon, Jan 25, 1971)",
    text: "Thank you for shopping with us. Total 42.50 EUR, card ending 1234.",
};

fn reference() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

/// Benchmark the full pipeline for various input types.
fn bench_extract_most_relevant(c: &mut Criterion) {
    let finder = DateFinder::new();
    let today = reference();

    let mut group = c.benchmark_group("extract_most_relevant");

    let inputs = [
        ("receipt", INPUTS.receipt),
        ("glued", INPUTS.glued),
        ("mixed", INPUTS.mixed),
        ("text", INPUTS.text),
    ];

    for (name, input) in inputs {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("input", name), &input, |b, input| {
            b.iter(|| finder.extract_most_relevant(black_box(input), today));
        });
    }

    group.finish();
}

/// Benchmark the normalizer on its own.
fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize/glued", |b| {
        b.iter(|| normalize(black_box(INPUTS.glued)));
    });
}

/// Benchmark strict parsing of single candidates.
fn bench_parse(c: &mut Criterion) {
    let today = reference();

    let mut group = c.benchmark_group("parse");

    let candidates = [
        ("textual", "25th of January 1971"),
        ("numeric", "12/25/2024"),
        ("weekday", "Mon, Jan 25, 71"),
        ("invalid", "31/02/2024"),
    ];

    for (name, candidate) in candidates {
        group.bench_with_input(BenchmarkId::new("candidate", name), &candidate, |b, candidate| {
            b.iter(|| parse(black_box(candidate), today));
        });
    }

    group.finish();
}

/// Benchmark throughput with growing documents.
fn bench_throughput(c: &mut Criterion) {
    let finder = DateFinder::new();
    let today = reference();

    let mut group = c.benchmark_group("throughput");

    for lines in [1, 10, 100] {
        let input = INPUTS.mixed.repeat(lines);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::new("mixed_lines", lines), &input, |b, input| {
            b.iter(|| finder.extract_all(black_box(input), today));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_extract_most_relevant,
    bench_normalize,
    bench_parse,
    bench_throughput,
);

criterion_main!(benches);
