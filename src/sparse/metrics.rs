//! Storage metrics for sparse structures.

use std::collections::{BTreeSet, HashMap};

use num_complex::Complex64;

/// Number of stored leaf values, recursing through nested maps.
pub trait ElementCount {
    fn count_elements(&self) -> usize;
}

impl<K, V: ElementCount> ElementCount for HashMap<K, V> {
    fn count_elements(&self) -> usize {
        self.values().map(ElementCount::count_elements).sum()
    }
}

macro_rules! impl_leaf_count {
    ($($t:ty),*) => {
        $(
            impl ElementCount for $t {
                fn count_elements(&self) -> usize {
                    1
                }
            }
        )*
    };
}

impl_leaf_count!(f32, f64, i32, i64, u32, u64, usize, bool, String, Complex64);

// A language is one algebraic value, not a container of entries.
impl ElementCount for BTreeSet<String> {
    fn count_elements(&self) -> usize {
        1
    }
}

/// Stored elements divided by `capacity`.
///
/// Without a (non-zero) capacity the density is relative to the object
/// itself: 1.0 when anything is stored, 0.0 otherwise.
pub fn density<T: ElementCount>(obj: &T, capacity: Option<usize>) -> f64 {
    let count = obj.count_elements();
    match capacity {
        Some(capacity) if capacity > 0 => count as f64 / capacity as f64,
        _ => {
            if count > 0 {
                1.0
            } else {
                0.0
            }
        }
    }
}

pub fn sparsity<T: ElementCount>(obj: &T, capacity: Option<usize>) -> f64 {
    1.0 - density(obj, capacity)
}

/// True when the sparsity strictly exceeds `threshold` (commonly 0.5).
pub fn is_sparse<T: ElementCount>(obj: &T, capacity: Option<usize>, threshold: f64) -> bool {
    sparsity(obj, capacity) > threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sparse::SparseMatrix;
    use approx::assert_relative_eq;

    #[test]
    fn test_count_nested() {
        let m: SparseMatrix<u32, f64> = HashMap::from([
            (0, HashMap::from([(0, 1.0), (1, 2.0)])),
            (1, HashMap::from([(1, 3.0)])),
            (2, HashMap::new()),
        ]);
        assert_eq!(m.count_elements(), 3);
    }

    #[test]
    fn test_density_and_sparsity() {
        let v = HashMap::from([(0usize, 1.0), (7, 2.0)]);
        assert_relative_eq!(density(&v, Some(10)), 0.2);
        assert_relative_eq!(sparsity(&v, Some(10)), 0.8);
        assert!(is_sparse(&v, Some(10), 0.5));
        assert!(!is_sparse(&v, Some(3), 0.5));
    }

    #[test]
    fn test_density_without_capacity() {
        let v = HashMap::from([(0usize, 1.0)]);
        let empty: HashMap<usize, f64> = HashMap::new();
        assert_eq!(density(&v, None), 1.0);
        assert_eq!(density(&v, Some(0)), 1.0);
        assert_eq!(density(&empty, None), 0.0);
    }
}
