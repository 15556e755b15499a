//! Permutations represented as mappings.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;

use crate::error::AlgebraError;
use crate::sparse::SparseKey;

/// `m2 ∘ m1`: `result[k] = m2[m1[k]]`, skipping keys whose image `m2` does not map.
pub fn compose<K, V, W>(m1: &HashMap<K, V>, m2: &HashMap<V, W>) -> HashMap<K, W>
where
    K: SparseKey,
    V: SparseKey,
    W: Clone,
{
    m1.iter()
        .filter_map(|(k, v)| m2.get(v).map(|w| (k.clone(), w.clone())))
        .collect()
}

/// Swaps keys and values. For a non-injective mapping only one preimage of
/// each value survives.
pub fn invert<K, V>(mapping: &HashMap<K, V>) -> HashMap<V, K>
where
    K: Clone,
    V: SparseKey,
{
    mapping.iter().map(|(k, v)| (v.clone(), k.clone())).collect()
}

/// Sign of a permutation: `1` when even, `-1` when odd.
///
/// Every element that appears as a key or a value must lie on a closed cycle;
/// otherwise the result is [`AlgebraError::BrokenCycle`].
pub fn signature<K: SparseKey + Debug>(permutation: &HashMap<K, K>) -> anyhow::Result<i8> {
    let elements: HashSet<&K> = permutation.keys().chain(permutation.values()).collect();
    let mut visited: HashSet<&K> = HashSet::with_capacity(elements.len());
    let mut cycles = 0usize;

    for &start in elements.iter() {
        if visited.contains(start) {
            continue;
        }
        cycles += 1;
        let mut current = start;
        while visited.insert(current) {
            current = permutation
                .get(current)
                .ok_or_else(|| AlgebraError::BrokenCycle(format!("{current:?}")))?;
        }
    }

    Ok(if (elements.len() - cycles) % 2 == 1 { -1 } else { 1 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose() {
        let shift = HashMap::from([(0, 1), (1, 2), (2, 0)]);
        let twice = compose(&shift, &shift);
        assert_eq!(twice, HashMap::from([(0, 2), (1, 0), (2, 1)]));
        assert_eq!(compose(&shift, &twice), HashMap::from([(0, 0), (1, 1), (2, 2)]));
    }

    #[test]
    fn test_compose_skips_unmapped() {
        let names = HashMap::from([("a", 1), ("b", 2)]);
        let labels = HashMap::from([(1, "one")]);
        assert_eq!(compose(&names, &labels), HashMap::from([("a", "one")]));
    }

    #[test]
    fn test_invert() {
        let shift = HashMap::from([(0, 1), (1, 2), (2, 0)]);
        let inverse = invert(&shift);
        assert_eq!(inverse, HashMap::from([(1, 0), (2, 1), (0, 2)]));
        let identity: HashMap<i32, i32> = (0..3).map(|k| (k, k)).collect();
        assert_eq!(compose(&shift, &inverse), identity);
    }

    #[test]
    fn test_signature() {
        let identity: HashMap<u8, u8> = (0..4).map(|k| (k, k)).collect();
        assert_eq!(signature(&identity).unwrap(), 1);

        let swap = HashMap::from([('a', 'b'), ('b', 'a')]);
        assert_eq!(signature(&swap).unwrap(), -1);

        let three_cycle = HashMap::from([(0, 1), (1, 2), (2, 0)]);
        assert_eq!(signature(&three_cycle).unwrap(), 1);

        let two_swaps = HashMap::from([(0, 1), (1, 0), (2, 3), (3, 2)]);
        assert_eq!(signature(&two_swaps).unwrap(), 1);

        let empty: HashMap<u8, u8> = HashMap::new();
        assert_eq!(signature(&empty).unwrap(), 1);
    }

    #[test]
    fn test_signature_broken_cycle() {
        let chain = HashMap::from([(0, 1), (1, 2)]);
        let err = signature(&chain).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AlgebraError>(),
            Some(AlgebraError::BrokenCycle(_))
        ));
    }
}
