//! Correlation Engine Throughput Benchmark
//!
//! Batch vs streaming Pearson correlation over representative trace-set
//! shapes, and a comparison against feeding the same data to the streaming
//! accumulator in one large update vs many small ones.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rand::prelude::*;
use simon_cpa::{correlate, Matrix, StreamingCorrelator};
use std::hint::black_box;

fn random_matrix(rows: usize, cols: usize, rng: &mut impl Rng) -> Matrix<f64> {
    let data: Vec<f64> = (0..rows * cols).map(|_| rng.random::<f64>()).collect();
    Matrix::from_vec(rows, cols, data)
}

// =============================================================================
// BENCHMARK 1: BATCH CORRELATION
// =============================================================================

fn bench_batch_correlate(c: &mut Criterion) {
    let mut group = c.benchmark_group("1-Batch-Correlate");
    group.sample_size(30);
    let mut rng = rand::rng();

    let shapes = [(1000usize, 256usize, 500usize), (10_000, 256, 1000)];
    for (n, k, s) in shapes {
        let x = random_matrix(n, k, &mut rng);
        let y = random_matrix(n, s, &mut rng);
        group.throughput(Throughput::Elements((n * k * s) as u64));
        group.bench_with_input(
            criterion::BenchmarkId::from_parameter(format!("N{n}-K{k}-S{s}")),
            &(x, y),
            |b, (x, y)| b.iter(|| correlate(black_box(x), black_box(y)).unwrap()),
        );
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 2: STREAMING CORRELATION
// =============================================================================

fn bench_streaming_correlate(c: &mut Criterion) {
    let mut group = c.benchmark_group("2-Streaming-Correlate");
    group.sample_size(30);
    let mut rng = rand::rng();

    let (n, k, s) = (10_000usize, 256usize, 1000usize);
    let x = random_matrix(n, k, &mut rng);
    let y = random_matrix(n, s, &mut rng);

    for chunk_size in [100usize, 1000, 10_000] {
        group.bench_with_input(
            criterion::BenchmarkId::from_parameter(format!("chunks-of-{chunk_size}")),
            &chunk_size,
            |b, &chunk_size| {
                b.iter(|| {
                    let mut acc = StreamingCorrelator::new(k, s);
                    let mut row = 0;
                    while row < n {
                        let end = (row + chunk_size).min(n);
                        let xb = sub_matrix(&x, row, end);
                        let yb = sub_matrix(&y, row, end);
                        acc.update(black_box(&xb), black_box(&yb)).unwrap();
                        row = end;
                    }
                    acc.result()
                })
            },
        );
    }
    group.finish();
}

fn sub_matrix(m: &Matrix<f64>, start: usize, end: usize) -> Matrix<f64> {
    let cols = m.cols();
    let mut data = Vec::with_capacity((end - start) * cols);
    for row in start..end {
        data.extend_from_slice(m.row(row));
    }
    Matrix::from_vec(end - start, cols, data)
}

// =============================================================================
// MAIN
// =============================================================================

criterion_group!(benches, bench_batch_correlate, bench_streaming_correlate);
criterion_main!(benches);
