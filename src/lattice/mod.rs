//! Element-wise combinators over sparse vectors.
//!
//! A missing key reads as zero and results equal to zero are never stored, so
//! every combinator returns a well-formed sparse vector.

use std::collections::HashMap;
use std::ops::{Mul, Sub};

use num_traits::{Float, Signed, Zero};

use crate::sparse::{SparseKey, SparseVector};

/// Which keys a [`combine`] visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Domain {
    /// Keys of either operand.
    #[default]
    Union,
    /// Keys of both operands.
    Intersection,
    /// Keys of the first operand only.
    Difference,
    /// Keys of exactly one operand.
    SymmetricDifference,
}

/// Applies `op` key-wise over `domain`, reading absent values as zero.
///
/// `op` always receives `(m1 value, m2 value)` in that order.
pub fn combine<K, V, F>(
    m1: &SparseVector<K, V>,
    m2: &SparseVector<K, V>,
    op: F,
    domain: Domain,
) -> SparseVector<K, V>
where
    K: SparseKey,
    V: Clone + Zero,
    F: Fn(&V, &V) -> V,
{
    let zero = V::zero();
    let mut result = HashMap::new();
    let mut emit = |k: &K, value: V| {
        if !value.is_zero() {
            result.insert(k.clone(), value);
        }
    };

    match domain {
        Domain::Union => {
            for (k, a) in m1.iter() {
                emit(k, op(a, m2.get(k).unwrap_or(&zero)));
            }
            for (k, b) in m2.iter().filter(|(k, _)| !m1.contains_key(k)) {
                emit(k, op(&zero, b));
            }
        }
        Domain::Intersection => {
            // walk the smaller side
            if m1.len() <= m2.len() {
                for (k, a) in m1.iter() {
                    if let Some(b) = m2.get(k) {
                        emit(k, op(a, b));
                    }
                }
            } else {
                for (k, b) in m2.iter() {
                    if let Some(a) = m1.get(k) {
                        emit(k, op(a, b));
                    }
                }
            }
        }
        Domain::Difference => {
            for (k, a) in m1.iter().filter(|(k, _)| !m2.contains_key(k)) {
                emit(k, op(a, &zero));
            }
        }
        Domain::SymmetricDifference => {
            for (k, a) in m1.iter().filter(|(k, _)| !m2.contains_key(k)) {
                emit(k, op(a, &zero));
            }
            for (k, b) in m2.iter().filter(|(k, _)| !m1.contains_key(k)) {
                emit(k, op(&zero, b));
            }
        }
    }
    result
}

/// Hadamard product.
pub fn product<K, V>(m1: &SparseVector<K, V>, m2: &SparseVector<K, V>) -> SparseVector<K, V>
where
    K: SparseKey,
    V: Clone + Zero + Mul<Output = V>,
{
    combine(m1, m2, |a, b| a.clone() * b.clone(), Domain::Intersection)
}

/// `m1 - m2` key-wise.
pub fn difference<K, V>(m1: &SparseVector<K, V>, m2: &SparseVector<K, V>) -> SparseVector<K, V>
where
    K: SparseKey,
    V: Clone + Zero + Sub<Output = V>,
{
    combine(m1, m2, |a, b| a.clone() - b.clone(), Domain::Union)
}

/// Key-wise maximum over the union (fuzzy union).
pub fn join<K, V>(m1: &SparseVector<K, V>, m2: &SparseVector<K, V>) -> SparseVector<K, V>
where
    K: SparseKey,
    V: Clone + Zero + PartialOrd,
{
    combine(
        m1,
        m2,
        |a, b| if b > a { b.clone() } else { a.clone() },
        Domain::Union,
    )
}

/// Key-wise minimum over the intersection (fuzzy intersection).
pub fn meet<K, V>(m1: &SparseVector<K, V>, m2: &SparseVector<K, V>) -> SparseVector<K, V>
where
    K: SparseKey,
    V: Clone + Zero + PartialOrd,
{
    combine(
        m1,
        m2,
        |a, b| if b < a { b.clone() } else { a.clone() },
        Domain::Intersection,
    )
}

/// `m1` restricted to the keys of `m2`.
pub fn mask<K, V>(m1: &SparseVector<K, V>, m2: &SparseVector<K, V>) -> SparseVector<K, V>
where
    K: SparseKey,
    V: Clone + Zero,
{
    combine(m1, m2, |a, _| a.clone(), Domain::Intersection)
}

/// `m1` without the keys of `m2`.
pub fn exclude<K, V>(m1: &SparseVector<K, V>, m2: &SparseVector<K, V>) -> SparseVector<K, V>
where
    K: SparseKey,
    V: Clone + Zero,
{
    combine(m1, m2, |a, _| a.clone(), Domain::Difference)
}

/// Key-wise `|m1 - m2|` over the union.
pub fn symmetric_difference<K, V>(
    m1: &SparseVector<K, V>,
    m2: &SparseVector<K, V>,
) -> SparseVector<K, V>
where
    K: SparseKey,
    V: Clone + Signed,
{
    combine(m1, m2, |a, b| (a.clone() - b.clone()).abs(), Domain::Union)
}

/// Entries whose key is in exactly one operand, with that operand's value.
pub fn exclusive<K, V>(m1: &SparseVector<K, V>, m2: &SparseVector<K, V>) -> SparseVector<K, V>
where
    K: SparseKey,
    V: Clone + Zero,
{
    combine(
        m1,
        m2,
        |a, b| if b.is_zero() { a.clone() } else { b.clone() },
        Domain::SymmetricDifference,
    )
}

/// Key-wise arithmetic mean over the union.
pub fn average<K: SparseKey, V: Float>(
    m1: &SparseVector<K, V>,
    m2: &SparseVector<K, V>,
) -> SparseVector<K, V> {
    let two = V::one() + V::one();
    combine(m1, m2, |&a, &b| (a + b) / two, Domain::Union)
}

/// Key-wise `sqrt(a * b)`. Keys present on one side only vanish; operands of
/// opposite sign give NaN.
pub fn geometric_mean<K: SparseKey, V: Float>(
    m1: &SparseVector<K, V>,
    m2: &SparseVector<K, V>,
) -> SparseVector<K, V> {
    combine(m1, m2, |&a, &b| (a * b).sqrt(), Domain::Union)
}

/// Key-wise `2ab / (a + b)`, zero when either side is zero.
pub fn harmonic_mean<K: SparseKey, V: Float>(
    m1: &SparseVector<K, V>,
    m2: &SparseVector<K, V>,
) -> SparseVector<K, V> {
    let two = V::one() + V::one();
    combine(
        m1,
        m2,
        |&a, &b| {
            if a.is_zero() || b.is_zero() {
                V::zero()
            } else {
                two * a * b / (a + b)
            }
        },
        Domain::Union,
    )
}

/// Key-wise `m1 / m2`; a zero denominator yields zero, so only keys of `m1`
/// that `m2` also holds survive.
pub fn ratio<K: SparseKey, V: Float>(
    m1: &SparseVector<K, V>,
    m2: &SparseVector<K, V>,
) -> SparseVector<K, V> {
    combine(
        m1,
        m2,
        |&a, &b| if b.is_zero() { V::zero() } else { a / b },
        Domain::Intersection,
    )
}
