//! Conversions between index-keyed sparse maps and dense storage: `nalgebra`
//! vectors and matrices, and `ndarray` arrays for tensors of any rank.

use std::collections::HashMap;

use nalgebra::{DMatrix, DVector, Scalar};
use ndarray::{ArrayD, Dimension, IxDyn};
use num_traits::Zero;

use crate::error::AlgebraError;
use crate::sparse::{SparseMatrix, SparseVector};

/// Sparse tensor keyed by coordinate tuples.
pub type SparseTensor<T> = HashMap<Vec<usize>, T>;

/// Non-zero entries of a dense vector.
pub fn dense_to_sparse_vector<T: Scalar + Zero + Copy>(
    vector: &DVector<T>,
) -> SparseVector<usize, T> {
    vector
        .iter()
        .enumerate()
        .filter(|(_, value)| !value.is_zero())
        .map(|(i, &value)| (i, value))
        .collect()
}

/// Dense vector of length `len`, defaulting to one past the largest index.
pub fn sparse_to_dense_vector<T: Scalar + Zero + Copy>(
    vector: &SparseVector<usize, T>,
    len: Option<usize>,
) -> anyhow::Result<DVector<T>> {
    let inferred = vector.keys().max().map_or(0, |&max| max + 1);
    let len = len.unwrap_or(inferred);
    if inferred > len {
        return Err(AlgebraError::InvalidArgument(format!(
            "index {} does not fit in a vector of length {}",
            inferred - 1,
            len
        ))
        .into());
    }

    let mut dense = DVector::zeros(len);
    for (&i, &value) in vector.iter() {
        dense[i] = value;
    }
    Ok(dense)
}

/// Non-zero entries of a dense matrix, keyed `row -> column`.
pub fn dense_to_sparse_matrix<T: Scalar + Zero + Copy>(
    matrix: &DMatrix<T>,
) -> SparseMatrix<usize, T> {
    let mut result: SparseMatrix<usize, T> = HashMap::new();
    for (r, row) in matrix.row_iter().enumerate() {
        let entries: HashMap<usize, T> = row
            .iter()
            .enumerate()
            .filter(|(_, value)| !value.is_zero())
            .map(|(c, &value)| (c, value))
            .collect();
        if !entries.is_empty() {
            result.insert(r, entries);
        }
    }
    result
}

/// Dense `nrows × ncols` matrix; the shape defaults to the largest indices + 1.
pub fn sparse_to_dense_matrix<T: Scalar + Zero + Copy>(
    matrix: &SparseMatrix<usize, T>,
    shape: Option<(usize, usize)>,
) -> anyhow::Result<DMatrix<T>> {
    let inferred_rows = matrix
        .iter()
        .filter(|(_, row)| !row.is_empty())
        .map(|(&r, _)| r + 1)
        .max()
        .unwrap_or(0);
    let inferred_cols = matrix
        .values()
        .flat_map(|row| row.keys())
        .map(|&c| c + 1)
        .max()
        .unwrap_or(0);
    let (nrows, ncols) = shape.unwrap_or((inferred_rows, inferred_cols));
    if inferred_rows > nrows || inferred_cols > ncols {
        return Err(AlgebraError::InvalidArgument(format!(
            "entries up to ({}, {}) do not fit in a {}x{} matrix",
            inferred_rows, inferred_cols, nrows, ncols
        ))
        .into());
    }

    let mut dense = DMatrix::zeros(nrows, ncols);
    for (&r, row) in matrix.iter() {
        for (&c, &value) in row.iter() {
            dense[(r, c)] = value;
        }
    }
    Ok(dense)
}

/// Non-zero cells of a dense array of any rank, keyed by their coordinates.
pub fn dense_to_sparse_tensor<T: Clone + Zero>(tensor: &ArrayD<T>) -> SparseTensor<T> {
    tensor
        .indexed_iter()
        .filter(|(_, value)| !value.is_zero())
        .map(|(index, value)| (index.slice().to_vec(), value.clone()))
        .collect()
}

/// Dense array holding `tensor`. The shape defaults to the largest
/// coordinate + 1 along each axis; an empty tensor without a shape becomes an
/// empty one-dimensional array.
///
/// Every key must have one coordinate per axis and lie inside the shape.
pub fn sparse_to_dense_tensor<T: Clone + Zero>(
    tensor: &SparseTensor<T>,
    shape: Option<&[usize]>,
) -> anyhow::Result<ArrayD<T>> {
    let shape: Vec<usize> = match shape {
        Some(shape) => shape.to_vec(),
        None => match tensor.keys().next() {
            None => vec![0],
            Some(first) => {
                let rank = first.len();
                let mut extent = vec![0; rank];
                for key in tensor.keys().filter(|key| key.len() == rank) {
                    for (axis, &i) in key.iter().enumerate() {
                        extent[axis] = extent[axis].max(i + 1);
                    }
                }
                extent
            }
        },
    };

    let mut dense = ArrayD::zeros(IxDyn(&shape));
    for (key, value) in tensor.iter() {
        if key.len() != shape.len() {
            return Err(AlgebraError::InvalidArgument(format!(
                "coordinate {:?} does not have rank {}",
                key,
                shape.len()
            ))
            .into());
        }
        let cell = dense.get_mut(key.as_slice()).ok_or_else(|| {
            AlgebraError::InvalidArgument(format!(
                "coordinate {:?} lies outside shape {:?}",
                key, shape
            ))
        })?;
        *cell = value.clone();
    }
    Ok(dense)
}
