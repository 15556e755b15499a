use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use num_traits::Zero;

pub mod csr;
pub mod metrics;
mod nested;

pub use metrics::{density, is_sparse, sparsity, ElementCount};

/// Key -> value association. Absent keys denote the ambient zero.
pub type SparseVector<K, V> = HashMap<K, V>;

/// Row -> column -> value association. An absent or empty row is all-zero.
pub type SparseMatrix<K, V> = HashMap<K, HashMap<K, V>>;

/// Anything usable as a sparse index: symbolic keys are as welcome as integers.
pub trait SparseKey: Clone + Eq + Hash {}

impl<T: Clone + Eq + Hash> SparseKey for T {}

pub trait MatrixNonZero {
    type Key;

    /// Number of stored entries in each row.
    fn nonzero_row(&self) -> SparseVector<Self::Key, usize>;

    /// Number of stored entries in each column.
    fn nonzero_col(&self) -> SparseVector<Self::Key, usize>;
}

pub trait MatrixSum {
    type Key;
    type Item: Zero + Copy;

    /// Total of each row. Rows summing to zero are omitted.
    fn sum_row(&self) -> SparseVector<Self::Key, Self::Item>;

    /// Total of each column. Columns summing to zero are omitted.
    fn sum_col(&self) -> SparseVector<Self::Key, Self::Item>;
}

/// Every key appearing as a row or a column of `matrix`.
pub fn key_universe<K: SparseKey, V>(matrix: &SparseMatrix<K, V>) -> HashSet<K> {
    let mut keys: HashSet<K> = matrix.keys().cloned().collect();
    for row in matrix.values() {
        keys.extend(row.keys().cloned());
    }
    keys
}
