//! Classical dense-style algorithms on sparse maps.
//!
//! These work over ordinary `f64` arithmetic. They copy the matrix into a
//! dense `n × n` buffer indexed by the sorted key universe, so they are meant
//! for small matrices and teaching. Each of them, except
//! [`eigen_centrality`], raises a [`PerformanceWarning`](crate::advisory::PerformanceWarning)
//! once per call.

use std::collections::HashMap;

use nalgebra::DMatrix;

use crate::advisory;
use crate::error::AlgebraError;
use crate::semiring::Standard;
use crate::sparse::{key_universe, SparseKey, SparseMatrix, SparseVector};
use crate::utils::IterationConfig;

use super::{mat_vec, transpose};

/// Sorted keys and their dense positions.
struct DenseIndex<K> {
    keys: Vec<K>,
    positions: HashMap<K, usize>,
}

impl<K: SparseKey + Ord> DenseIndex<K> {
    fn new(matrix: &SparseMatrix<K, f64>) -> Self {
        let mut keys: Vec<K> = key_universe(matrix).into_iter().collect();
        keys.sort();
        let positions = keys
            .iter()
            .enumerate()
            .map(|(i, k)| (k.clone(), i))
            .collect();
        Self { keys, positions }
    }

    fn len(&self) -> usize {
        self.keys.len()
    }

    fn densify(&self, matrix: &SparseMatrix<K, f64>) -> DMatrix<f64> {
        let n = self.len();
        let mut dense = DMatrix::zeros(n, n);
        for (r, row) in matrix.iter() {
            let i = self.positions[r];
            for (c, &value) in row.iter() {
                dense[(i, self.positions[c])] = value;
            }
        }
        dense
    }
}

/// Determinant by Gaussian elimination with row swaps on zero pivots.
///
/// The matrix is read over its key universe, so a key that only appears as
/// a column still contributes an (all-zero) row.
pub fn determinant<K: SparseKey + Ord>(matrix: &SparseMatrix<K, f64>) -> f64 {
    advisory::emit("determinant", "O(N^3)");
    let index = DenseIndex::new(matrix);
    eliminate(index.densify(matrix))
}

/// Cofactor matrix `C[i][j] = (-1)^(i+j) det(minor(i, j))`. Zero cofactors are
/// not stored.
pub fn cofactor<K: SparseKey + Ord>(matrix: &SparseMatrix<K, f64>) -> SparseMatrix<K, f64> {
    advisory::emit("cofactor", "O(N^5)");
    let index = DenseIndex::new(matrix);
    match index.len() {
        0 => return HashMap::new(),
        1 => {
            let k = index.keys[0].clone();
            return HashMap::from([(k.clone(), HashMap::from([(k, 1.0)]))]);
        }
        _ => {}
    }

    let dense = index.densify(matrix);
    let mut result: SparseMatrix<K, f64> = HashMap::new();
    for (i, r_key) in index.keys.iter().enumerate() {
        for (j, c_key) in index.keys.iter().enumerate() {
            let det = eliminate(dense.clone().remove_row(i).remove_column(j));
            if det != 0.0 {
                let sign = if (i + j) % 2 == 0 { 1.0 } else { -1.0 };
                result
                    .entry(r_key.clone())
                    .or_default()
                    .insert(c_key.clone(), sign * det);
            }
        }
    }
    result
}

/// Adjugate: the transpose of the cofactor matrix.
pub fn adjoint<K: SparseKey + Ord>(matrix: &SparseMatrix<K, f64>) -> SparseMatrix<K, f64> {
    advisory::emit("adjoint", "O(N^5)");
    advisory::quietly(|| transpose(&cofactor(matrix)))
}

/// `adj(A) / det(A)`; fails with [`AlgebraError::SingularMatrix`] when the
/// determinant is zero.
pub fn inverse<K: SparseKey + Ord>(
    matrix: &SparseMatrix<K, f64>,
) -> anyhow::Result<SparseMatrix<K, f64>> {
    advisory::emit("inverse", "O(N^5)");
    advisory::quietly(|| {
        let det = determinant(matrix);
        if det == 0.0 {
            return Err(AlgebraError::SingularMatrix.into());
        }
        let adj = adjoint(matrix);
        Ok(adj
            .into_iter()
            .map(|(r, row)| (r, row.into_iter().map(|(c, v)| (c, v / det)).collect()))
            .collect())
    })
}

/// Principal eigenvector by power iteration.
///
/// Starts from the uniform vector over the key universe, repeatedly applies
/// `v <- M·v / ‖M·v‖₂` and stops once the L1 change drops below
/// `config.tolerance` or after `config.max_iterations` rounds. If an iterate
/// collapses to zero the previous vector is returned.
pub fn eigen_centrality<K: SparseKey>(
    matrix: &SparseMatrix<K, f64>,
    config: IterationConfig,
) -> SparseVector<K, f64> {
    let nodes = key_universe(matrix);
    if nodes.is_empty() {
        return HashMap::new();
    }
    let uniform = 1.0 / nodes.len() as f64;
    let mut vector: SparseVector<K, f64> = nodes.iter().map(|k| (k.clone(), uniform)).collect();

    for iteration in 0..config.max_iterations {
        let next = mat_vec(matrix, &vector, &Standard);
        let norm = next.values().map(|x| x * x).sum::<f64>().sqrt();
        if norm == 0.0 {
            log::debug!("eigen_centrality: zero iterate after {} rounds", iteration);
            return vector;
        }
        let next: SparseVector<K, f64> = next.into_iter().map(|(k, v)| (k, v / norm)).collect();
        let delta: f64 = nodes
            .iter()
            .map(|k| {
                let new = next.get(k).copied().unwrap_or(0.0);
                let old = vector.get(k).copied().unwrap_or(0.0);
                (new - old).abs()
            })
            .sum();
        vector = next;
        if delta < config.tolerance {
            log::debug!(
                "eigen_centrality: converged after {} rounds (delta {:e})",
                iteration + 1,
                delta
            );
            break;
        }
    }
    vector
}

/// Determinant of a dense square matrix, consuming it.
///
/// Rows are swapped only when a pivot is exactly zero.
fn eliminate(mut m: DMatrix<f64>) -> f64 {
    let n = m.nrows();
    let mut sign = 1.0;
    for i in 0..n {
        if m[(i, i)] == 0.0 {
            match (i + 1..n).find(|&j| m[(j, i)] != 0.0) {
                Some(j) => {
                    m.swap_rows(i, j);
                    sign = -sign;
                }
                None => return 0.0,
            }
        }

        let pivot = m[(i, i)];
        let pivot_tail = m.view((i, i), (1, n - i)).into_owned();
        for r in i + 1..n {
            let factor = m[(r, i)];
            if factor != 0.0 {
                let mut tail = m.view_mut((r, i), (1, n - i));
                tail -= &pivot_tail * (factor / pivot);
            }
        }
    }
    sign * m.diagonal().product()
}
