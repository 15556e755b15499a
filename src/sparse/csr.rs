//! Conversions between index-keyed sparse maps and `nalgebra_sparse` CSR matrices.

use std::collections::HashMap;
use std::ops::AddAssign;

use nalgebra::Scalar;
use nalgebra_sparse::{CooMatrix, CsrMatrix};
use num_traits::Zero;

use super::SparseMatrix;
use crate::error::AlgebraError;

/// Builds a CSR matrix from an index-keyed sparse matrix.
///
/// The shape defaults to `(max row + 1, max column + 1)`. Entries outside an
/// explicit shape are an error.
pub fn to_csr<T>(
    matrix: &SparseMatrix<usize, T>,
    shape: Option<(usize, usize)>,
) -> anyhow::Result<CsrMatrix<T>>
where
    T: Scalar + Zero + Copy + AddAssign,
{
    let (nrows, ncols) = match shape {
        Some(shape) => shape,
        None => inferred_shape(matrix),
    };

    let mut coo = CooMatrix::new(nrows, ncols);
    for (&r, row) in matrix.iter() {
        for (&c, &value) in row.iter() {
            if r >= nrows || c >= ncols {
                return Err(AlgebraError::InvalidArgument(format!(
                    "entry ({}, {}) lies outside a {}x{} matrix",
                    r, c, nrows, ncols
                ))
                .into());
            }
            coo.push(r, c, value);
        }
    }

    Ok(CsrMatrix::from(&coo))
}

/// Reads a CSR matrix back into a sparse map, skipping explicit zeros.
pub fn from_csr<T>(matrix: &CsrMatrix<T>) -> SparseMatrix<usize, T>
where
    T: Scalar + Zero + Copy,
{
    let mut result: SparseMatrix<usize, T> = HashMap::new();
    for (r, c, &value) in matrix.triplet_iter() {
        if !value.is_zero() {
            result.entry(r).or_default().insert(c, value);
        }
    }
    result
}

fn inferred_shape<T>(matrix: &SparseMatrix<usize, T>) -> (usize, usize) {
    let nrows = matrix
        .iter()
        .filter(|(_, row)| !row.is_empty())
        .map(|(&r, _)| r + 1)
        .max()
        .unwrap_or(0);
    let ncols = matrix
        .values()
        .flat_map(|row| row.keys())
        .map(|&c| c + 1)
        .max()
        .unwrap_or(0);
    (nrows, ncols)
}
