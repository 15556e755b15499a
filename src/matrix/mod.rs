//! # Sparse linear algebra over semirings
//!
//! Every kernel here is generic over a [`Semiring`]: the same `dot` computes
//! ordinary matrix products with [`Standard`](crate::semiring::Standard),
//! shortest paths with [`Tropical`](crate::semiring::Tropical) or reachability
//! with [`Boolean`](crate::semiring::Boolean). Results never store the
//! semiring's zero, and work is proportional to the non-zero products rather
//! than to the dense dimensions.

use std::collections::HashMap;

use num_traits::{One, Zero};

use crate::error::AlgebraError;
use crate::semiring::Semiring;
use crate::sparse::{key_universe, MatrixNonZero, SparseKey, SparseMatrix, SparseVector};

pub mod academic;
pub mod structure;

pub use academic::{adjoint, cofactor, determinant, eigen_centrality, inverse};
pub use structure::{block, block_diag, hstack, slice_matrix, vstack, Stride};

/// Element-wise sum of two matrices, dropping cells that add up to zero.
pub fn add<K, S>(
    m1: &SparseMatrix<K, S::Value>,
    m2: &SparseMatrix<K, S::Value>,
    semiring: &S,
) -> SparseMatrix<K, S::Value>
where
    K: SparseKey,
    S: Semiring,
{
    let mut result: SparseMatrix<K, S::Value> = HashMap::with_capacity(m1.len().max(m2.len()));
    for (r, row) in m1.iter().chain(m2.iter()) {
        let target = result.entry(r.clone()).or_default();
        for (c, value) in row.iter() {
            match target.get_mut(c) {
                Some(existing) => *existing = semiring.add(existing, value),
                None => {
                    target.insert(c.clone(), value.clone());
                }
            }
        }
    }
    for row in result.values_mut() {
        row.retain(|_, value| !semiring.is_zero(value));
    }
    result.retain(|_, row| !row.is_empty());
    result
}

pub fn transpose<K: SparseKey, V: Clone>(matrix: &SparseMatrix<K, V>) -> SparseMatrix<K, V> {
    let mut result: SparseMatrix<K, V> = HashMap::new();
    for (r, row) in matrix.iter() {
        for (c, value) in row.iter() {
            result
                .entry(c.clone())
                .or_default()
                .insert(r.clone(), value.clone());
        }
    }
    result
}

/// Semiring sum of the diagonal cells that are present.
pub fn trace<K, S>(matrix: &SparseMatrix<K, S::Value>, semiring: &S) -> S::Value
where
    K: SparseKey,
    S: Semiring,
{
    matrix
        .iter()
        .filter_map(|(r, row)| row.get(r))
        .fold(semiring.zero(), |acc, value| semiring.add(&acc, value))
}

/// δ_ij: one when the indices coincide, zero otherwise.
pub fn kronecker_delta<K: PartialEq, T: Zero + One>(i: &K, j: &K) -> T {
    if i == j {
        T::one()
    } else {
        T::zero()
    }
}

/// Inner product `Σ v1[k] ⊗ v2[k]` over the shared keys.
pub fn inner<K, S>(
    v1: &SparseVector<K, S::Value>,
    v2: &SparseVector<K, S::Value>,
    semiring: &S,
) -> S::Value
where
    K: SparseKey,
    S: Semiring,
{
    let (small, large, swapped) = if v1.len() <= v2.len() {
        (v1, v2, false)
    } else {
        (v2, v1, true)
    };

    let mut result = semiring.zero();
    for (k, a) in small.iter() {
        if let Some(b) = large.get(k) {
            // keep operand order, mul need not commute
            let term = if swapped {
                semiring.mul(b, a)
            } else {
                semiring.mul(a, b)
            };
            result = semiring.add(&result, &term);
        }
    }
    result
}

/// Matrix times column vector, `M · v`.
pub fn mat_vec<K, S>(
    matrix: &SparseMatrix<K, S::Value>,
    vector: &SparseVector<K, S::Value>,
    semiring: &S,
) -> SparseVector<K, S::Value>
where
    K: SparseKey,
    S: Semiring,
{
    let mut result = HashMap::new();
    for (r, row) in matrix.iter() {
        let mut acc: Option<S::Value> = None;
        for (k, m_val) in row.iter() {
            if let Some(v_val) = vector.get(k) {
                let term = semiring.mul(m_val, v_val);
                acc = Some(match acc {
                    Some(current) => semiring.add(&current, &term),
                    None => term,
                });
            }
        }
        if let Some(value) = acc {
            if !semiring.is_zero(&value) {
                result.insert(r.clone(), value);
            }
        }
    }
    result
}

/// Row vector times matrix, `v · M`.
pub fn vec_mat<K, S>(
    vector: &SparseVector<K, S::Value>,
    matrix: &SparseMatrix<K, S::Value>,
    semiring: &S,
) -> SparseVector<K, S::Value>
where
    K: SparseKey,
    S: Semiring,
{
    let mut result: SparseVector<K, S::Value> = HashMap::new();
    for (k, v_val) in vector.iter() {
        if let Some(row) = matrix.get(k) {
            for (c, m_val) in row.iter() {
                accumulate(&mut result, c, semiring.mul(v_val, m_val), semiring);
            }
        }
    }
    result.retain(|_, value| !semiring.is_zero(value));
    result
}

/// Generalized matrix product: `C[r][c] = ⊕_k A[r][k] ⊗ B[k][c]`.
pub fn dot<K, S>(
    m1: &SparseMatrix<K, S::Value>,
    m2: &SparseMatrix<K, S::Value>,
    semiring: &S,
) -> SparseMatrix<K, S::Value>
where
    K: SparseKey,
    S: Semiring,
{
    let mut result = HashMap::with_capacity(m1.len());
    for (r, row1) in m1.iter() {
        let mut new_row: SparseVector<K, S::Value> = HashMap::new();
        for (k, val1) in row1.iter() {
            if let Some(row2) = m2.get(k) {
                for (c, val2) in row2.iter() {
                    accumulate(&mut new_row, c, semiring.mul(val1, val2), semiring);
                }
            }
        }
        new_row.retain(|_, value| !semiring.is_zero(value));
        if !new_row.is_empty() {
            result.insert(r.clone(), new_row);
        }
    }
    result
}

/// Identity matrix over `keys`: `one` on the diagonal, nothing elsewhere.
pub fn identity<K, S, I>(keys: I, semiring: &S) -> SparseMatrix<K, S::Value>
where
    K: SparseKey,
    S: Semiring,
    I: IntoIterator<Item = K>,
{
    keys.into_iter()
        .map(|k| (k.clone(), HashMap::from([(k, semiring.one())])))
        .collect()
}

/// `matrix^n` by binary exponentiation.
///
/// `matrix^0` is the identity over the matrix's observed keys. Negative
/// exponents are rejected.
pub fn power<K, S>(
    matrix: &SparseMatrix<K, S::Value>,
    n: i64,
    semiring: &S,
) -> anyhow::Result<SparseMatrix<K, S::Value>>
where
    K: SparseKey,
    S: Semiring,
{
    if n < 0 {
        return Err(AlgebraError::NegativeExponent(n).into());
    }

    let mut result = identity(key_universe(matrix), semiring);
    let mut base = matrix.clone();
    let mut remaining = n;
    while remaining > 0 {
        if remaining % 2 == 1 {
            result = dot(&result, &base, semiring);
        }
        remaining /= 2;
        if remaining > 0 {
            base = dot(&base, &base, semiring);
        }
        log::trace!("power: {} squarings left, base nnz {}", remaining, nnz(&base));
    }
    Ok(result)
}

/// Number of stored cells.
pub fn nnz<K: SparseKey, V>(matrix: &SparseMatrix<K, V>) -> usize {
    matrix.nonzero_row().values().sum()
}

fn accumulate<K, S>(row: &mut SparseVector<K, S::Value>, key: &K, term: S::Value, semiring: &S)
where
    K: SparseKey,
    S: Semiring,
{
    match row.get_mut(key) {
        Some(current) => *current = semiring.add(current, &term),
        None => {
            row.insert(key.clone(), term);
        }
    }
}
