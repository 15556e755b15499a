//! Block extraction and assembly for integer-indexed sparse matrices.

use std::collections::{HashMap, HashSet};
use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

use crate::error::AlgebraError;
use crate::sparse::{SparseKey, SparseMatrix};

/// Index selection with `start`, optional exclusive `stop` and `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stride {
    pub start: usize,
    pub stop: Option<usize>,
    pub step: usize,
}

impl Default for Stride {
    fn default() -> Self {
        Self {
            start: 0,
            stop: None,
            step: 1,
        }
    }
}

impl Stride {
    pub fn new(start: usize, stop: Option<usize>) -> Self {
        Self {
            start,
            stop,
            step: 1,
        }
    }

    pub fn step_by(mut self, step: usize) -> Self {
        self.step = step;
        self
    }

    /// Position of `index` in the selection, if selected.
    fn locate(&self, index: usize) -> Option<usize> {
        if index < self.start || self.stop.is_some_and(|stop| index >= stop) {
            return None;
        }
        let offset = index - self.start;
        (offset % self.step == 0).then_some(offset / self.step)
    }
}

impl From<Range<usize>> for Stride {
    fn from(range: Range<usize>) -> Self {
        Stride::new(range.start, Some(range.end))
    }
}

impl From<RangeFrom<usize>> for Stride {
    fn from(range: RangeFrom<usize>) -> Self {
        Stride::new(range.start, None)
    }
}

impl From<RangeTo<usize>> for Stride {
    fn from(range: RangeTo<usize>) -> Self {
        Stride::new(0, Some(range.end))
    }
}

impl From<RangeFull> for Stride {
    fn from(_: RangeFull) -> Self {
        Stride::default()
    }
}

/// Extracts the sub-matrix selected by `rows` × `cols`, re-basing indices to 0.
///
/// ```
/// use std::collections::HashMap;
/// use sparse_semiring::matrix::{block, Stride};
///
/// let m = HashMap::from([
///     (0, HashMap::from([(0, 1.0), (2, 2.0)])),
///     (2, HashMap::from([(2, 3.0)])),
/// ]);
/// let even = block(&m, Stride::default().step_by(2), Stride::default().step_by(2)).unwrap();
/// assert_eq!(even[&1][&1], 3.0);
/// ```
pub fn block<V: Clone>(
    matrix: &SparseMatrix<usize, V>,
    rows: impl Into<Stride>,
    cols: impl Into<Stride>,
) -> anyhow::Result<SparseMatrix<usize, V>> {
    let rows = rows.into();
    let cols = cols.into();
    if rows.step == 0 || cols.step == 0 {
        let reason = "block step must be positive".to_string();
        return Err(AlgebraError::InvalidArgument(reason).into());
    }

    let mut result = HashMap::new();
    for (&r, row) in matrix.iter() {
        let Some(new_r) = rows.locate(r) else {
            continue;
        };
        let new_row: HashMap<usize, V> = row
            .iter()
            .filter_map(|(&c, value)| cols.locate(c).map(|new_c| (new_c, value.clone())))
            .collect();
        if !new_row.is_empty() {
            result.insert(new_r, new_row);
        }
    }
    Ok(result)
}

/// Restricts `matrix` to the given row and column keys, keeping the keys.
pub fn slice_matrix<K, V, R, C>(matrix: &SparseMatrix<K, V>, rows: R, cols: C) -> SparseMatrix<K, V>
where
    K: SparseKey,
    V: Clone,
    R: IntoIterator<Item = K>,
    C: IntoIterator<Item = K>,
{
    let col_set: HashSet<K> = cols.into_iter().collect();
    let mut result = HashMap::new();
    for r in rows.into_iter().collect::<HashSet<K>>() {
        if let Some(row) = matrix.get(&r) {
            let new_row: HashMap<K, V> = row
                .iter()
                .filter(|(c, _)| col_set.contains(c))
                .map(|(c, value)| (c.clone(), value.clone()))
                .collect();
            if !new_row.is_empty() {
                result.insert(r, new_row);
            }
        }
    }
    result
}

/// Places the matrices side by side; each operand's columns start one past
/// the largest column of the operands before it.
pub fn hstack<V: Clone>(matrices: &[SparseMatrix<usize, V>]) -> SparseMatrix<usize, V> {
    let mut result: SparseMatrix<usize, V> = HashMap::new();
    let mut c_offset = 0;
    for m in matrices.iter().filter(|m| !m.is_empty()) {
        for (&r, row) in m.iter() {
            if row.is_empty() {
                continue;
            }
            let target = result.entry(r).or_default();
            for (&c, value) in row.iter() {
                target.insert(c + c_offset, value.clone());
            }
        }
        c_offset += max_col(m) + 1;
    }
    result
}

/// Stacks the matrices top to bottom, offsetting rows by the running max + 1.
pub fn vstack<V: Clone>(matrices: &[SparseMatrix<usize, V>]) -> SparseMatrix<usize, V> {
    let mut result = HashMap::new();
    let mut r_offset = 0;
    for m in matrices.iter().filter(|m| !m.is_empty()) {
        for (&r, row) in m.iter().filter(|(_, row)| !row.is_empty()) {
            result.insert(r + r_offset, row.clone());
        }
        r_offset += max_row(m) + 1;
    }
    result
}

/// Builds a block-diagonal matrix, each operand shifted below and right of
/// the previous one.
pub fn block_diag<V: Clone>(matrices: &[SparseMatrix<usize, V>]) -> SparseMatrix<usize, V> {
    let mut result = HashMap::new();
    let (mut r_offset, mut c_offset) = (0, 0);
    for m in matrices.iter().filter(|m| !m.is_empty()) {
        for (&r, row) in m.iter().filter(|(_, row)| !row.is_empty()) {
            let shifted: HashMap<usize, V> = row
                .iter()
                .map(|(&c, value)| (c + c_offset, value.clone()))
                .collect();
            result.insert(r + r_offset, shifted);
        }
        r_offset += max_row(m) + 1;
        c_offset += max_col(m) + 1;
    }
    result
}

// Empty rows still count: they record the operand's height.
fn max_row<V>(matrix: &SparseMatrix<usize, V>) -> usize {
    matrix.keys().copied().max().unwrap_or(0)
}

fn max_col<V>(matrix: &SparseMatrix<usize, V>) -> usize {
    matrix
        .values()
        .flat_map(|row| row.keys().copied())
        .max()
        .unwrap_or(0)
}
