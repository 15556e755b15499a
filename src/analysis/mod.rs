//! Discrete exterior calculus on graphs.
//!
//! Node signals (0-forms) are sparse vectors and edge signals (1-forms) are
//! sparse matrices, so `gradient` maps vectors to matrices and `divergence`
//! maps them back.

use std::collections::HashMap;

use num_traits::Num;

use crate::error::AlgebraError;
use crate::sparse::{SparseKey, SparseMatrix, SparseVector};

/// `grad(f)[u][v] = f(v) - f(u)` along every edge of `graph` whose endpoints
/// both carry a value.
pub fn gradient<K, V, N>(field: &SparseVector<K, V>, graph: &HashMap<K, N>) -> SparseMatrix<K, V>
where
    K: SparseKey,
    V: Num + Copy,
    for<'a> &'a N: IntoIterator<Item = &'a K>,
{
    let mut result = HashMap::new();
    for (u, neighbors) in graph.iter() {
        let Some(&f_u) = field.get(u) else {
            continue;
        };
        let row: SparseVector<K, V> = neighbors
            .into_iter()
            .filter_map(|v| field.get(v).map(|&f_v| (v.clone(), f_v - f_u)))
            .filter(|(_, delta)| !delta.is_zero())
            .collect();
        if !row.is_empty() {
            result.insert(u.clone(), row);
        }
    }
    result
}

/// Net outflow at each node: `div(F)[i] = Σ_j F[i][j] - Σ_j F[j][i]`.
pub fn divergence<K, V>(flow: &SparseMatrix<K, V>) -> SparseVector<K, V>
where
    K: SparseKey,
    V: Num + Copy,
{
    let mut result: SparseVector<K, V> = HashMap::new();
    for (u, row) in flow.iter() {
        for (v, &value) in row.iter() {
            let out = result.entry(u.clone()).or_insert_with(V::zero);
            *out = *out + value;
            let into = result.entry(v.clone()).or_insert_with(V::zero);
            *into = *into - value;
        }
    }
    result.retain(|_, value| !value.is_zero());
    result
}

/// Weighted graph Laplacian `(L f)[i] = Σ_j w_ij (f(i) - f(j))`.
pub fn laplacian<K, V>(field: &SparseVector<K, V>, graph: &SparseMatrix<K, V>) -> SparseVector<K, V>
where
    K: SparseKey,
    V: Num + Copy,
{
    let mut result = HashMap::new();
    for (u, neighbors) in graph.iter() {
        let Some(&f_u) = field.get(u) else {
            continue;
        };
        let total = neighbors
            .iter()
            .filter_map(|(v, &weight)| field.get(v).map(|&f_v| weight * (f_u - f_v)))
            .fold(V::zero(), |acc, term| acc + term);
        if !total.is_zero() {
            result.insert(u.clone(), total);
        }
    }
    result
}

/// Turns distances into similarities `exp(-d² / 2σ²)`, keeping only values
/// above `threshold`.
pub fn gaussian_kernel<K: SparseKey>(
    distances: &SparseMatrix<K, f64>,
    sigma: f64,
    threshold: f64,
) -> anyhow::Result<SparseMatrix<K, f64>> {
    if !(sigma > 0.0) {
        let reason = format!("sigma must be positive, got {sigma}");
        return Err(AlgebraError::InvalidArgument(reason).into());
    }
    let denom = 2.0 * sigma * sigma;
    let mut result = HashMap::new();
    for (u, row) in distances.iter() {
        let similar: SparseVector<K, f64> = row
            .iter()
            .map(|(v, d)| (v.clone(), (-(d * d) / denom).exp()))
            .filter(|&(_, similarity)| similarity > threshold)
            .collect();
        if !similar.is_empty() {
            result.insert(u.clone(), similar);
        }
    }
    Ok(result)
}

/// Combinatorial Forman-Ricci curvature `4 - deg(u) - deg(v)` of each
/// undirected edge, keyed `(u, v)` with `u < v`.
///
/// Degrees count neighbours and ignore weights. Negative curvature marks
/// tree-like regions and positive curvature clique-like ones. Flat edges
/// (curvature 0) are not stored.
pub fn forman_ricci_curvature<K, V>(graph: &SparseMatrix<K, V>) -> SparseVector<(K, K), i64>
where
    K: SparseKey + Ord,
{
    let degree = |node: &K| graph.get(node).map_or(0, |neighbours| neighbours.len() as i64);
    let mut result = HashMap::new();
    for (u, neighbours) in graph.iter() {
        for v in neighbours.keys().filter(|&v| u < v) {
            let curvature = 4 - degree(u) - degree(v);
            if curvature != 0 {
                result.insert((u.clone(), v.clone()), curvature);
            }
        }
    }
    result
}
