//! crates/sha2-simd/benches/throughput.rs
//!
//! Throughput of every backend over a 16 MiB buffer of seeded random bytes,
//! plus batched hashing of many small buffers.
//!
//! Run with: `cargo bench -p sha2-simd`
//! Backend selection is logged with `RUST_LOG`-style directives when
//! `SHA2_BENCH_LOG` is set, e.g. `SHA2_BENCH_LOG=sha2=debug`.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use sha2_simd::{
    Backend, BackendKind, active_backends, hash224, hash224_with, hash256, hash256_batch,
    hash256_with, hash384, hash384_with, hash512, hash512_batch, hash512_with,
};

const BUFFER_LEN: usize = 16 * 1024 * 1024;
const SEED: u64 = 1;

fn init_logging() {
    if let Ok(directives) = std::env::var("SHA2_BENCH_LOG") {
        let _ = logging::try_init(&directives);
    }
}

fn available(kind: BackendKind) -> Vec<Backend> {
    Backend::ALL
        .into_iter()
        .filter(|b| b.kind() == kind && b.is_available())
        .collect()
}

/// Each width on the portable backend, as the general variants.
fn bench_general(c: &mut Criterion) {
    let data = test_support::seeded_bytes(BUFFER_LEN, SEED);
    let mut group = c.benchmark_group("general");
    group.throughput(Throughput::Bytes(BUFFER_LEN as u64));
    group.sample_size(10);

    group.bench_function("sha224", |b| {
        b.iter(|| hash224_with(Backend::Portable, black_box(&data)))
    });
    group.bench_function("sha256", |b| {
        b.iter(|| hash256_with(Backend::Portable, black_box(&data)))
    });
    group.bench_function("sha384", |b| {
        b.iter(|| hash384_with(Backend::Portable, black_box(&data)))
    });
    group.bench_function("sha512", |b| {
        b.iter(|| hash512_with(Backend::Portable, black_box(&data)))
    });

    group.finish();
}

/// SIMD and hardware backends on one message; SIMD runs it in a single lane.
fn bench_accelerated(c: &mut Criterion) {
    let data = test_support::seeded_bytes(BUFFER_LEN, SEED);
    let mut group = c.benchmark_group("accelerated");
    group.throughput(Throughput::Bytes(BUFFER_LEN as u64));
    group.sample_size(10);

    for backend in available(BackendKind::Hardware)
        .into_iter()
        .chain(available(BackendKind::Simd))
    {
        group.bench_with_input(BenchmarkId::new("sha224", backend), &data, |b, data| {
            b.iter(|| hash224_with(backend, black_box(data)))
        });
        group.bench_with_input(BenchmarkId::new("sha256", backend), &data, |b, data| {
            b.iter(|| hash256_with(backend, black_box(data)))
        });
    }

    group.finish();
}

/// The auto-selecting entry points.
fn bench_auto(c: &mut Criterion) {
    init_logging();
    let data = test_support::seeded_bytes(BUFFER_LEN, SEED);
    let active = active_backends();
    let mut group = c.benchmark_group("auto");
    group.throughput(Throughput::Bytes(BUFFER_LEN as u64));
    group.sample_size(10);

    group.bench_function(BenchmarkId::new("sha224", active.sha256), |b| {
        b.iter(|| hash224(black_box(&data)))
    });
    group.bench_function(BenchmarkId::new("sha256", active.sha256), |b| {
        b.iter(|| hash256(black_box(&data)))
    });
    group.bench_function(BenchmarkId::new("sha384", active.sha512), |b| {
        b.iter(|| hash384(black_box(&data)))
    });
    group.bench_function(BenchmarkId::new("sha512", active.sha512), |b| {
        b.iter(|| hash512(black_box(&data)))
    });

    group.finish();
}

/// Many small buffers through the batched API, where SIMD lanes pay off.
fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    let active = active_backends();

    for size in [64usize, 256, 1024, 4096] {
        let count = 256;
        let inputs: Vec<Vec<u8>> = (0..count)
            .map(|i| test_support::seeded_bytes(size, SEED + i as u64))
            .collect();
        group.throughput(Throughput::Bytes((size * count) as u64));

        group.bench_with_input(
            BenchmarkId::new(format!("sha256/{}", active.sha256_batch), size),
            &inputs,
            |b, inputs| b.iter(|| hash256_batch(black_box(inputs))),
        );
        group.bench_with_input(
            BenchmarkId::new(format!("sha512/{}", active.sha512_batch), size),
            &inputs,
            |b, inputs| b.iter(|| hash512_batch(black_box(inputs))),
        );
        group.bench_with_input(BenchmarkId::new("sha256/sequential", size), &inputs, |b, inputs| {
            b.iter(|| {
                black_box(inputs)
                    .iter()
                    .map(|input| hash256(input))
                    .collect::<Vec<_>>()
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_general,
    bench_accelerated,
    bench_auto,
    bench_batch
);
criterion_main!(benches);
