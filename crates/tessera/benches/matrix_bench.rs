//! Benchmarks for copy-on-write matrices.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use tessera::integers::Rational;
use tessera::linalg::Matrix;

fn hilbert(n: usize) -> Matrix<Rational> {
    let rows = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| Rational::from_i64(1, (i + j + 1) as i64).unwrap_or_default())
                .collect()
        })
        .collect();
    Matrix::from_rows(rows).unwrap_or_default()
}

fn bench_share_vs_copy(c: &mut Criterion) {
    let mut group = c.benchmark_group("share_then_write");

    for n in [8, 32, 64] {
        let m = hilbert(n);

        group.bench_with_input(BenchmarkId::new("share_only", n), &n, |bench, _| {
            bench.iter(|| black_box(m.share()));
        });
        group.bench_with_input(BenchmarkId::new("share_and_write", n), &n, |bench, _| {
            bench.iter(|| {
                let mut alias = m.share();
                alias[(0, 0)] = Rational::from(0);
                black_box(alias)
            });
        });
    }

    group.finish();
}

fn bench_mm(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_mul");

    for n in [4, 8, 16] {
        let a = hilbert(n);
        let b = a.transpose();

        group.bench_with_input(BenchmarkId::new("Matrix<Rational>", n), &n, |bench, _| {
            bench.iter(|| black_box(a.mm(&b)));
        });
    }

    group.finish();
}

fn bench_resize(c: &mut Criterion) {
    let m = hilbert(32);
    c.bench_function("resize_shared_32_to_16", |bench| {
        bench.iter(|| {
            let mut alias = m.share();
            alias.resize(16, 16);
            black_box(alias)
        });
    });
}

criterion_group!(benches, bench_share_vs_copy, bench_mm, bench_resize);
criterion_main!(benches);
