//! Performance benchmarks for fixmat-kernels
//!
//! Run with: cargo bench -p fixmat-kernels
//!
//! Benchmarks cover:
//! - Merge sort over vectors of several lengths
//! - Top-2 selection with and without pre-sorted pairs
//! - Systolic array multiplication against `Mat::mul`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fixmat_core::{Mat, Vector};
use fixmat_kernels::{argmax_4_2, merge_sort, systolic_mul};

fn bench_merge_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_sort");

    fn run<const N: usize>(group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>) {
        let input = Vector::<f64, N>::random_uniform(-1.0, 1.0);
        group.throughput(Throughput::Elements(N as u64));
        group.bench_with_input(BenchmarkId::from_parameter(N), &input, |bencher, input| {
            bencher.iter(|| {
                let mut v = *input;
                merge_sort(&mut v);
                black_box(v)
            });
        });
    }

    run::<8>(&mut group);
    run::<64>(&mut group);
    run::<256>(&mut group);

    group.finish();
}

fn bench_argmax(c: &mut Criterion) {
    let mut group = c.benchmark_group("argmax_4_2");

    let values = [0.3, 0.1, 0.9, 0.4];
    let indices = [0u8, 1, 2, 3];

    group.bench_function("unsorted", |bencher| {
        bencher.iter(|| black_box(argmax_4_2(black_box(values), indices, false)));
    });
    group.bench_function("sorted", |bencher| {
        bencher.iter(|| black_box(argmax_4_2(black_box(values), indices, true)));
    });

    group.finish();
}

fn bench_systolic(c: &mut Criterion) {
    let mut group = c.benchmark_group("systolic_mul");

    let a = Mat::<f64, 8, 8>::random_uniform(-1.0, 1.0);
    let b = Mat::<f64, 8, 8>::random_uniform(-1.0, 1.0);

    group.bench_function("systolic_8", |bencher| {
        bencher.iter(|| black_box(systolic_mul(black_box(&a), black_box(&b))));
    });
    group.bench_function("gemm_8", |bencher| {
        let mut out = Mat::<f64, 8, 8>::zeros();
        bencher.iter(|| {
            out.mul(black_box(&a), black_box(&b));
            black_box(&out);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_merge_sort, bench_argmax, bench_systolic);
criterion_main!(benches);
