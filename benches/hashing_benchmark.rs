//! benches/hashing_benchmark.rs
//!
//! Benchmarks for piecewise hashing and digest comparison.
//!
//! Run with: `cargo bench`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::Rng;

use spamsum::{StreamHasher, compare, hash_bytes};

/// Generate random data of the specified size.
fn generate_random_data(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let mut data = vec![0u8; size];
    rng.fill(&mut data[..]);
    data
}

/// Benchmark whole-input hashing, including the block-size search passes.
fn bench_hash_bytes(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_bytes");

    for size in [1024, 8192, 65536, 1 << 20] {
        let data = generate_random_data(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("adaptive", size), &data, |b, data| {
            b.iter(|| black_box(hash_bytes(black_box(data))));
        });
    }

    group.finish();
}

/// Benchmark the streaming hasher at a fixed block size (single pass).
fn bench_stream_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream_write");

    for size in [8192, 65536, 1 << 20] {
        let data = generate_random_data(size);
        let block_size = ((size / 64).next_power_of_two() as u32 / 2).max(1) * 3;

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("fixed", size), &data, |b, data| {
            b.iter(|| {
                let mut hasher = StreamHasher::new(block_size);
                hasher.write(black_box(data));
                black_box(hasher.digest())
            });
        });
    }

    group.finish();
}

/// Benchmark comparing two related digests.
fn bench_compare(c: &mut Criterion) {
    let data = generate_random_data(65536);
    let mut edited = data.clone();
    for i in (0..edited.len()).step_by(512) {
        edited[i] = edited[i].wrapping_add(1);
    }

    let x = hash_bytes(&data);
    let y = hash_bytes(&edited);

    c.bench_function("compare_related_digests", |b| {
        b.iter(|| black_box(compare(black_box(&x), black_box(&y))));
    });
}

criterion_group!(
    benches,
    bench_hash_bytes,
    bench_stream_write,
    bench_compare
);
criterion_main!(benches);
