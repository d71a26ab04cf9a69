//! Benchmark for the sequential and parallel kernels.
//!
//! Compares:
//! - Sequential dot product vs parallel with 2, 4 and 8 workers
//! - Sequential matrix product vs parallel with 2, 4 and 8 workers
//!
//! Inputs come from a fixed seed so runs are comparable.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use par_kernels::{dot_parallel, dot_sequential, matmul_parallel, matmul_sequential, Generator};

const WORKERS: [usize; 3] = [2, 4, 8];

/// Benchmark the dot product
fn bench_dot(c: &mut Criterion) {
    let mut group = c.benchmark_group("Dot");

    for size in [1 << 16, 1 << 20, 1 << 22].iter() {
        let n = *size;
        let mut gen = Generator::new(42);
        let v1 = gen.vector(n, -100, 100).unwrap();
        let v2 = gen.vector(n, -100, 100).unwrap();

        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("seq", n), &n, |bench, _| {
            bench.iter(|| black_box(dot_sequential(&v1, &v2)));
        });

        for workers in WORKERS {
            let id = BenchmarkId::new(format!("par{workers}"), n);
            group.bench_with_input(id, &n, |bench, _| {
                bench.iter(|| black_box(dot_parallel(&v1, &v2, workers).unwrap()));
            });
        }
    }

    group.finish();
}

/// Benchmark the matrix product
fn bench_matmul(c: &mut Criterion) {
    let mut group = c.benchmark_group("Matmul");
    group.sample_size(20);

    for size in [64, 256, 512].iter() {
        let n = *size;
        let mut gen = Generator::new(42);
        let a = gen.matrix(n, n, -10, 10).unwrap();
        let b = gen.matrix(n, n, -10, 10).unwrap();

        group.throughput(Throughput::Elements((n * n * n) as u64));

        group.bench_with_input(BenchmarkId::new("seq", n), &n, |bench, _| {
            bench.iter(|| black_box(matmul_sequential(&a, &b).unwrap()));
        });

        for workers in WORKERS {
            let id = BenchmarkId::new(format!("par{workers}"), n);
            group.bench_with_input(id, &n, |bench, _| {
                bench.iter(|| black_box(matmul_parallel(&a, &b, workers).unwrap()));
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_dot, bench_matmul);
criterion_main!(benches);
