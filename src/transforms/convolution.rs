use std::collections::HashMap;
use std::ops::{Add, Mul};

use num_traits::Zero;

use crate::error::AlgebraError;
use crate::sparse::{SparseKey, SparseVector};

/// Discrete convolution `h[z] = Σ_{x + y = z} f[x] g[y]`.
pub fn convolve<K, V>(f: &SparseVector<K, V>, g: &SparseVector<K, V>) -> SparseVector<K, V>
where
    K: SparseKey + Add<Output = K>,
    V: Clone + Zero + Mul<Output = V>,
{
    convolve_with(f, g, |x, y| x.clone() + y.clone())
}

/// Convolution over an arbitrary key operation, e.g. a group law on
/// permutations or bitwise xor on masks.
pub fn convolve_with<K, V, F>(
    f: &SparseVector<K, V>,
    g: &SparseVector<K, V>,
    key_op: F,
) -> SparseVector<K, V>
where
    K: SparseKey,
    V: Clone + Zero + Mul<Output = V>,
    F: Fn(&K, &K) -> K,
{
    let mut result: SparseVector<K, V> = HashMap::new();
    for (x, fx) in f.iter() {
        for (y, gy) in g.iter() {
            let term = fx.clone() * gy.clone();
            let slot = result.entry(key_op(x, y)).or_insert_with(V::zero);
            *slot = slot.clone() + term;
        }
    }
    result.retain(|_, value| !value.is_zero());
    result
}

/// Reorders the axes of a coordinate-keyed tensor: output coordinate `i`
/// is input coordinate `permutation[i]`.
pub fn permute_tensor<K, V>(
    tensor: &HashMap<Vec<K>, V>,
    permutation: &[usize],
) -> anyhow::Result<HashMap<Vec<K>, V>>
where
    K: SparseKey,
    V: Clone,
{
    let mut result = HashMap::with_capacity(tensor.len());
    for (coords, value) in tensor.iter() {
        let permuted = permutation
            .iter()
            .map(|&axis| {
                coords.get(axis).cloned().ok_or_else(|| {
                    AlgebraError::InvalidArgument(format!(
                        "axis {} out of range for a rank-{} coordinate",
                        axis,
                        coords.len()
                    ))
                })
            })
            .collect::<Result<Vec<K>, _>>()?;
        result.insert(permuted, value.clone());
    }
    Ok(result)
}
