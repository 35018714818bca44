//! SIMON Cipher Throughput Benchmark
//!
//! Statistically rigorous performance measurements for key expansion,
//! encryption, and the lazy partial-round evaluation the search driver
//! leans on.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rand::prelude::*;
use simon_cpa::{encrypt_block, eval_to_round, expand_key, IntermediateKind, ALL_PRESETS};
use std::hint::black_box;

// =============================================================================
// BENCHMARK 1: KEY SCHEDULE EXPANSION
// =============================================================================

/// Full-schedule key expansion across every canonical preset.
fn bench_key_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("1-Key-Expansion");
    let mut rng = rand::rng();

    for params in ALL_PRESETS {
        let key: Vec<u64> = (0..params.m).map(|_| rng.random::<u64>() & simon_cpa::mask_n(params.n)).collect();
        group.bench_with_input(
            criterion::BenchmarkId::from_parameter(format!("{}/{}", params.n, params.key_bits())),
            &key,
            |b, key| b.iter(|| expand_key(params, black_box(key)).unwrap()),
        );
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 2: BLOCK ENCRYPTION
// =============================================================================

/// Single-block encryption throughput across every canonical preset.
fn bench_encrypt_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("2-Block-Encryption");
    let mut rng = rand::rng();

    for params in ALL_PRESETS {
        let key: Vec<u64> = (0..params.m).map(|_| rng.random::<u64>() & simon_cpa::mask_n(params.n)).collect();
        let pt = (
            rng.random::<u64>() & simon_cpa::mask_n(params.n),
            rng.random::<u64>() & simon_cpa::mask_n(params.n),
        );
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            criterion::BenchmarkId::from_parameter(format!("{}/{}", params.n, params.key_bits())),
            &(pt, key),
            |b, (pt, key)| b.iter(|| encrypt_block(params, black_box(*pt), black_box(key)).unwrap()),
        );
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 3: PARTIAL EVALUATION (HYPOTHESIS SCORING HOT PATH)
// =============================================================================

/// `eval_to_round` over a batch of plaintexts and key hypotheses — the
/// inner loop of every attack step.
fn bench_eval_to_round(c: &mut Criterion) {
    let mut group = c.benchmark_group("3-Partial-Evaluation");
    group.sample_size(30);
    let params = simon_cpa::SIMON_64_128;
    let mut rng = rand::rng();

    let trace_counts = [256usize, 4096, 65536];
    for n_traces in trace_counts {
        let plaintexts: Vec<(u64, u64)> = (0..n_traces)
            .map(|_| (rng.random::<u32>().into(), rng.random::<u32>().into()))
            .collect();
        let keys: Vec<Vec<u64>> = (0..256).map(|byte| vec![0, 0, 0, byte]).collect();

        group.throughput(Throughput::Elements((n_traces * keys.len()) as u64));
        group.bench_with_input(
            criterion::BenchmarkId::from_parameter(format!("{n_traces}-traces-x-256-keys")),
            &(plaintexts, keys),
            |b, (pts, keys)| {
                b.iter(|| {
                    eval_to_round(params, black_box(pts), black_box(keys), 0, IntermediateKind::AddRoundKey).unwrap()
                })
            },
        );
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 4: THREAD SCALING
// =============================================================================

/// Multi-core scaling for the hypothesis-scoring hot path.
#[cfg(feature = "multithread")]
fn bench_thread_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("4-Thread-Scaling");
    group.sample_size(20);
    let params = simon_cpa::SIMON_64_128;
    let mut rng = rand::rng();

    let plaintexts: Vec<(u64, u64)> = (0..16384)
        .map(|_| (rng.random::<u32>().into(), rng.random::<u32>().into()))
        .collect();
    let keys: Vec<Vec<u64>> = (0..256).map(|byte| vec![0, 0, 0, byte]).collect();

    let max_threads = num_cpus::get();
    let thread_counts: Vec<usize> = [1, 2, 4, 8, 16, 32]
        .iter()
        .copied()
        .filter(|&t| t <= max_threads)
        .collect();

    for threads in thread_counts {
        group.bench_with_input(
            criterion::BenchmarkId::from_parameter(format!("{threads}threads")),
            &threads,
            |b, &t| {
                let pool = rayon::ThreadPoolBuilder::new().num_threads(t).build().unwrap();
                pool.install(|| {
                    b.iter(|| {
                        eval_to_round(
                            params,
                            black_box(&plaintexts),
                            black_box(&keys),
                            0,
                            IntermediateKind::AddRoundKey,
                        )
                        .unwrap()
                    })
                });
            },
        );
    }
    group.finish();
}

// =============================================================================
// MAIN
// =============================================================================

criterion_group!(benches, bench_key_expansion, bench_encrypt_block, bench_eval_to_round);

#[cfg(feature = "multithread")]
criterion_group!(benches_multithread, bench_thread_scaling);

#[cfg(feature = "multithread")]
criterion_main!(benches, benches_multithread);

#[cfg(not(feature = "multithread"))]
criterion_main!(benches);
