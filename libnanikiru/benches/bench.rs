use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use nanikiru::Analyzer;
use nanikiru::algo::shanten::{calc_exhaustive, calc_suitwise};
use nanikiru::hand::hand;
use std::hint::black_box;

fn shanten(c: &mut Criterion) {
    let counts = hand("3456789m1123445p").unwrap();
    c.bench_function("shanten_suitwise", |b| {
        b.iter(|| calc_suitwise(black_box(&counts), 0));
    });
    c.bench_function("shanten_exhaustive", |b| {
        b.iter(|| calc_exhaustive(black_box(&counts), 0));
    });
}

fn analysis(c: &mut Criterion) {
    c.bench_function("analyze_discards_cold", |b| {
        b.iter_batched(
            Analyzer::default,
            |analyzer| analyzer.analyze_discards(black_box("112233456m568p12s")).unwrap(),
            BatchSize::SmallInput,
        );
    });
    let analyzer = Analyzer::default();
    c.bench_function("analyze_discards_warm", |b| {
        b.iter(|| analyzer.analyze_discards(black_box("112233456m568p12s")).unwrap());
    });
}

criterion_group!(benches, shanten, analysis);
criterion_main!(benches);
