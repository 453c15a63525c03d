//! Encoder throughput

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use feature_engine::{age_bucket, FeatureEncoder, RawInput};

fn bench_encode(c: &mut Criterion) {
    let encoder = FeatureEncoder::default();
    let raw = RawInput::default();

    c.bench_function("encode_default_input", |b| {
        b.iter(|| encoder.encode(black_box(&raw)))
    });

    c.bench_function("age_bucket_sweep", |b| {
        b.iter(|| (18..=110).map(|age| age_bucket(black_box(age)) as u32).sum::<u32>())
    });
}

criterion_group!(benches, bench_encode);
criterion_main!(benches);
