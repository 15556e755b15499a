use std::collections::HashMap;
use std::ops::AddAssign;

use num_traits::Zero;

use super::{MatrixNonZero, MatrixSum, SparseKey, SparseMatrix, SparseVector};

impl<K: SparseKey, V> MatrixNonZero for SparseMatrix<K, V> {
    type Key = K;

    fn nonzero_row(&self) -> SparseVector<K, usize> {
        self.iter()
            .filter(|(_, row)| !row.is_empty())
            .map(|(r, row)| (r.clone(), row.len()))
            .collect()
    }

    fn nonzero_col(&self) -> SparseVector<K, usize> {
        let mut result = HashMap::new();
        for row in self.values() {
            for c in row.keys() {
                *result.entry(c.clone()).or_insert(0) += 1;
            }
        }
        result
    }
}

impl<K, V> MatrixSum for SparseMatrix<K, V>
where
    K: SparseKey,
    V: Zero + Copy + AddAssign,
{
    type Key = K;
    type Item = V;

    fn sum_row(&self) -> SparseVector<K, V> {
        let mut result = HashMap::with_capacity(self.len());
        for (r, row) in self.iter() {
            let mut total = V::zero();
            for &value in row.values() {
                total += value;
            }
            if !total.is_zero() {
                result.insert(r.clone(), total);
            }
        }
        result
    }

    fn sum_col(&self) -> SparseVector<K, V> {
        let mut result: SparseVector<K, V> = HashMap::new();
        for row in self.values() {
            for (c, &value) in row.iter() {
                *result.entry(c.clone()).or_insert_with(V::zero) += value;
            }
        }
        result.retain(|_, total| !total.is_zero());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn create_test_matrix() -> SparseMatrix<usize, f64> {
        // [1 0 2]
        // [0 0 0]
        // [3 4 0]
        // [0 5 6]
        HashMap::from([
            (0, HashMap::from([(0, 1.0), (2, 2.0)])),
            (2, HashMap::from([(0, 3.0), (1, 4.0)])),
            (3, HashMap::from([(1, 5.0), (2, 6.0)])),
        ])
    }

    #[test]
    fn test_nonzero_row() {
        let matrix = create_test_matrix();
        let result = matrix.nonzero_row();
        assert_eq!(result, HashMap::from([(0, 2), (2, 2), (3, 2)]));
    }

    #[test]
    fn test_nonzero_col() {
        let matrix = create_test_matrix();
        let result = matrix.nonzero_col();
        assert_eq!(result, HashMap::from([(0, 2), (1, 2), (2, 2)]));
    }

    #[test]
    fn test_sum_row_and_col() {
        let matrix = create_test_matrix();
        let rows = matrix.sum_row();
        assert_relative_eq!(rows[&0], 3.0);
        assert_relative_eq!(rows[&2], 7.0);
        assert_relative_eq!(rows[&3], 11.0);
        assert!(!rows.contains_key(&1));

        let cols = matrix.sum_col();
        assert_relative_eq!(cols[&0], 4.0);
        assert_relative_eq!(cols[&1], 9.0);
        assert_relative_eq!(cols[&2], 8.0);
    }

    #[test]
    fn test_cancelling_sums_are_dropped() {
        let matrix: SparseMatrix<&str, i64> =
            HashMap::from([("x", HashMap::from([("a", 2), ("b", -2)]))]);
        assert!(matrix.sum_row().is_empty());
        assert_eq!(matrix.sum_col(), HashMap::from([("a", 2), ("b", -2)]));
    }

    #[test]
    fn test_empty_and_zero_matrices() {
        let empty: SparseMatrix<usize, f64> = HashMap::new();
        assert!(empty.nonzero_row().is_empty());
        assert!(empty.nonzero_col().is_empty());
        assert!(empty.sum_row().is_empty());

        let hollow: SparseMatrix<usize, f64> = HashMap::from([(0, HashMap::new())]);
        assert!(hollow.nonzero_row().is_empty());
        assert!(hollow.sum_col().is_empty());
    }
}
