//! Criterion benchmarks for the apply engines.
//!
//! Measures element-wise apply with and without simplification, margin
//! application over matrices and grouped application, across input sizes.

use apply_core::types::{BoxError, Container, Factor, Params, Value};
use apply_engine::{array_apply, grouped_apply, map_apply, row_means};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::{Array, Array2, Axis};

fn square(args: &[Value], _: &Params) -> Result<Value, BoxError> {
    let x = args[0].as_f64().ok_or("numeric")?;
    Ok(Value::from(x * x))
}

fn mean(args: &[Value], _: &Params) -> Result<Value, BoxError> {
    let v = args[0].to_f64_vec().ok_or("numeric")?;
    Ok(Value::from(v.iter().sum::<f64>() / v.len().max(1) as f64))
}

/// Generate a container of `n` doubles.
fn generate_values(n: usize) -> Container<Value> {
    (0..n).map(|i| Value::from(i as f64 * 0.5)).collect()
}

/// Benchmark element-wise apply.
fn bench_map_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_apply");

    for size in [100, 1000, 10000] {
        let data = vec![generate_values(size)];

        group.bench_with_input(BenchmarkId::new("list", size), &data, |b, data| {
            b.iter(|| map_apply(black_box(data), square, &Params::new(), false).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("simplified", size), &data, |b, data| {
            b.iter(|| map_apply(black_box(data), square, &Params::new(), true).unwrap());
        });
    }

    group.finish();
}

/// Benchmark margin application against the direct row reduction.
fn bench_margins(c: &mut Criterion) {
    let mut group = c.benchmark_group("margins");

    for size in [10, 50, 100] {
        let m: Array2<f64> = Array::from_shape_fn((size, size), |(i, j)| (i * size + j) as f64);
        let dyn_m = m.clone().into_dyn();

        group.bench_with_input(BenchmarkId::new("array_apply_rows", size), &dyn_m, |b, m| {
            b.iter(|| array_apply(black_box(m), &[Axis(0)], mean, &Params::new()).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("row_means", size), &m, |b, m| {
            b.iter(|| row_means(black_box(m)));
        });
    }

    group.finish();
}

/// Benchmark grouped application with a growing number of buckets.
fn bench_grouped_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("grouped_apply");
    let size = 10000;
    let data = Container::new((0..size).map(|i| i as f64).collect::<Vec<_>>());

    for n_levels in [2, 20, 200] {
        let key = Factor::generate(n_levels, size / n_levels, size);
        group.bench_with_input(BenchmarkId::new("means", n_levels), &key, |b, key| {
            b.iter(|| {
                grouped_apply(
                    black_box(&data),
                    std::slice::from_ref(key),
                    mean,
                    &Params::new(),
                    true,
                    true,
                    ".",
                )
                .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_map_apply, bench_margins, bench_grouped_apply);
criterion_main!(benches);
