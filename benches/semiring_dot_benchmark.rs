use std::collections::HashMap;
use std::time::Duration;

use criterion::measurement::Measurement;
use criterion::{criterion_group, criterion_main, BenchmarkGroup, BenchmarkId, Criterion};
use rand::distr::{Distribution, Uniform};
use rand::{rngs::StdRng, SeedableRng};
use sparse_semiring::matrix::{dot, power};
use sparse_semiring::semiring::{Boolean, Standard, Tropical};
use sparse_semiring::sparse::{MatrixNonZero, MatrixSum, SparseMatrix};

#[derive(Clone)]
pub struct SemiringBenchConfig {
    seed: u64,
    matrix_sizes: Vec<usize>,
    densities: Vec<f64>,
    exponents: Vec<i64>,
    measurement_time: u64,
    sample_size: usize,
}

impl Default for SemiringBenchConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            matrix_sizes: vec![100, 500, 2000],
            densities: vec![0.001, 0.01],
            exponents: vec![2, 8, 32],
            measurement_time: 10,
            sample_size: 10,
        }
    }
}

fn create_weighted_matrix(size: usize, density: f64, seed: u64) -> SparseMatrix<usize, f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let total_elements = (size * size) as f64 * density;
    let value_dist = Uniform::try_from(0.5..10.0).unwrap();
    let index_dist = Uniform::try_from(0..size).unwrap();

    let mut matrix: SparseMatrix<usize, f64> = HashMap::new();
    for _ in 0..total_elements as usize {
        let row = index_dist.sample(&mut rng);
        let col = index_dist.sample(&mut rng);
        let value = value_dist.sample(&mut rng);
        matrix.entry(row).or_default().insert(col, value);
    }
    matrix
}

fn to_adjacency(matrix: &SparseMatrix<usize, f64>) -> SparseMatrix<usize, bool> {
    matrix
        .iter()
        .map(|(&r, row)| (r, row.keys().map(|&c| (c, true)).collect()))
        .collect()
}

fn configure_group<'a, M: Measurement>(
    c: &'a mut Criterion<M>,
    name: &str,
    config: &SemiringBenchConfig,
) -> BenchmarkGroup<'a, M> {
    let mut group = c.benchmark_group(name);
    group.measurement_time(Duration::from_secs(config.measurement_time));
    group.sample_size(config.sample_size);
    group
}

pub fn bench_dot_by_semiring(c: &mut Criterion) {
    let config = SemiringBenchConfig::default();
    let mut group = configure_group(c, "Semiring_Dot", &config);

    for &size in config.matrix_sizes.iter() {
        for &density in config.densities.iter() {
            let seed = config.seed + (size * size) as u64;
            let matrix = create_weighted_matrix(size, density, seed);
            let adjacency = to_adjacency(&matrix);
            let label = format!("{}x{}_d{}", size, size, density);

            group.bench_with_input(BenchmarkId::new("standard", &label), &matrix, |b, m| {
                b.iter(|| dot(m, m, &Standard));
            });

            group.bench_with_input(BenchmarkId::new("tropical", &label), &matrix, |b, m| {
                b.iter(|| dot(m, m, &Tropical));
            });

            group.bench_with_input(BenchmarkId::new("boolean", &label), &adjacency, |b, m| {
                b.iter(|| dot(m, m, &Boolean));
            });
        }
    }
    group.finish();
}

pub fn bench_power(c: &mut Criterion) {
    let config = SemiringBenchConfig::default();
    let mut group = configure_group(c, "Semiring_Power", &config);

    // Shortest paths blow up quickly; the smallest size keeps runs bounded.
    let size = config.matrix_sizes[0];
    for &density in config.densities.iter() {
        let matrix = create_weighted_matrix(size, density, config.seed);
        for &n in config.exponents.iter() {
            group.bench_with_input(
                BenchmarkId::new("tropical", format!("{}x{}_d{}_n{}", size, size, density, n)),
                &n,
                |b, &n| {
                    b.iter(|| power(&matrix, n, &Tropical).unwrap());
                },
            );
        }
    }
    group.finish();
}

pub fn bench_row_sums(c: &mut Criterion) {
    let config = SemiringBenchConfig::default();
    let mut group = configure_group(c, "Nested_Sum_Operations", &config);

    for &size in config.matrix_sizes.iter() {
        for &density in config.densities.iter() {
            let seed = config.seed + (size * size) as u64;
            let matrix = create_weighted_matrix(size, density, seed);
            let label = format!("{}x{}_d{}", size, size, density);

            group.bench_with_input(BenchmarkId::new("row_sum", &label), &matrix, |b, m| {
                b.iter(|| m.sum_row());
            });

            group.bench_with_input(BenchmarkId::new("col_sum", &label), &matrix, |b, m| {
                b.iter(|| m.sum_col());
            });
        }
    }
    group.finish();
}

pub fn bench_nonzero_counts(c: &mut Criterion) {
    let config = SemiringBenchConfig::default();
    let mut group = configure_group(c, "Nested_Nonzero_Counts", &config);

    for &size in config.matrix_sizes.iter() {
        for &density in config.densities.iter() {
            let seed = config.seed + (size * size) as u64;
            let matrix = create_weighted_matrix(size, density, seed);
            let label = format!("{}x{}_d{}", size, size, density);

            group.bench_with_input(BenchmarkId::new("row_count", &label), &matrix, |b, m| {
                b.iter(|| m.nonzero_row());
            });

            group.bench_with_input(BenchmarkId::new("col_count", &label), &matrix, |b, m| {
                b.iter(|| m.nonzero_col());
            });
        }
    }
    group.finish();
}

criterion_group!(
    semiring_benches,
    bench_dot_by_semiring,
    bench_power,
    bench_row_sums,
    bench_nonzero_counts
);
criterion_main!(semiring_benches);
