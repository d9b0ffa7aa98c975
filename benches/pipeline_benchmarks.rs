//! Benchmarks for grammar construction and end-to-end normalization.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use libtextnorm::prelude::*;

const SENTENCES: &[&str] = &[
    "hola",
    "uno de enero",
    "cinco dólares con cincuenta centavos",
    "tengo veinte manzanas y tres coma cinco litros de agua",
    "la reunión es a las tres y media del quince de agosto de dos mil veinte",
];

/// Benchmark: building every Spanish grammar
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    group.sample_size(10);

    for deterministic in [true, false] {
        let config = NormalizerConfig::builder()
            .deterministic(deterministic)
            .build()
            .expect("valid config");
        group.bench_with_input(
            BenchmarkId::new("spanish", if deterministic { "deterministic" } else { "candidates" }),
            &config,
            |b, config| {
                b.iter(|| black_box(Normalizer::new(config.clone()).unwrap()));
            },
        );
    }
    group.finish();
}

/// Benchmark: tagging, verbalizing and both
fn bench_normalize(c: &mut Criterion) {
    let normalizer = Normalizer::new(NormalizerConfig::default()).expect("grammars build");
    let mut group = c.benchmark_group("normalize");

    for sentence in SENTENCES {
        let words = sentence.split_whitespace().count();
        group.throughput(Throughput::Elements(words as u64));
        let tagged = normalizer
            .classify_and_tag(sentence, true)
            .expect("sentence tags")
            .best()
            .to_string();

        group.bench_with_input(BenchmarkId::new("classify", words), sentence, |b, s| {
            b.iter(|| black_box(normalizer.classify_and_tag(black_box(s), true).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("verbalize", words), &tagged, |b, t| {
            b.iter(|| black_box(normalizer.verbalize(black_box(t)).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("end_to_end", words), sentence, |b, s| {
            b.iter(|| black_box(normalizer.normalize(black_box(s)).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_normalize);
criterion_main!(benches);
