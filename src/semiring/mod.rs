//! # Semirings
//!
//! A semiring `(V, add, mul, zero, one)` generalizes real arithmetic so that the
//! same sparse kernels compute different things depending on the algebra:
//!
//! | Semiring | add | mul | zero | one | Used for |
//! |----------|-----|-----|------|-----|----------|
//! | [`Standard`] | + | × | 0 | 1 | linear algebra |
//! | [`Tropical`] | min | + | +∞ | 0 | shortest paths |
//! | [`Boolean`] | ∨ | ∧ | false | true | reachability |
//! | [`Viterbi`] | max | × | 0 | 1 | most probable path |
//! | [`Bottleneck`] | max | min | −∞ | +∞ | widest path |
//! | [`Log`] | logaddexp | + | −∞ | 0 | log-probabilities |
//! | [`StringLanguage`] | ∪ | concat | ∅ | {""} | path label languages |
//!
//! Semirings are stateless values passed explicitly to every operation.

use std::collections::BTreeSet;
use std::fmt::Debug;

pub trait Semiring {
    type Value: Clone + PartialEq + Debug;

    /// Additive identity.
    fn zero(&self) -> Self::Value;

    /// Multiplicative identity.
    fn one(&self) -> Self::Value;

    /// Associative, commutative addition with identity `zero`.
    fn add(&self, a: &Self::Value, b: &Self::Value) -> Self::Value;

    /// Associative multiplication with identity `one`, distributing over `add`.
    fn mul(&self, a: &Self::Value, b: &Self::Value) -> Self::Value;

    fn is_zero(&self, value: &Self::Value) -> bool {
        *value == self.zero()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Standard;

impl Semiring for Standard {
    type Value = f64;

    fn zero(&self) -> f64 {
        0.0
    }

    fn one(&self) -> f64 {
        1.0
    }

    fn add(&self, a: &f64, b: &f64) -> f64 {
        a + b
    }

    fn mul(&self, a: &f64, b: &f64) -> f64 {
        a * b
    }
}

/// Min-plus algebra.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tropical;

impl Semiring for Tropical {
    type Value = f64;

    fn zero(&self) -> f64 {
        f64::INFINITY
    }

    fn one(&self) -> f64 {
        0.0
    }

    fn add(&self, a: &f64, b: &f64) -> f64 {
        a.min(*b)
    }

    fn mul(&self, a: &f64, b: &f64) -> f64 {
        a + b
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Boolean;

impl Semiring for Boolean {
    type Value = bool;

    fn zero(&self) -> bool {
        false
    }

    fn one(&self) -> bool {
        true
    }

    fn add(&self, a: &bool, b: &bool) -> bool {
        *a || *b
    }

    fn mul(&self, a: &bool, b: &bool) -> bool {
        *a && *b
    }
}

/// Max-product algebra over probabilities in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viterbi;

/// Reliability analysis uses the same max-product algebra.
pub type Reliability = Viterbi;

impl Semiring for Viterbi {
    type Value = f64;

    fn zero(&self) -> f64 {
        0.0
    }

    fn one(&self) -> f64 {
        1.0
    }

    fn add(&self, a: &f64, b: &f64) -> f64 {
        a.max(*b)
    }

    fn mul(&self, a: &f64, b: &f64) -> f64 {
        a * b
    }
}

/// Max-min algebra for maximum capacity paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bottleneck;

impl Semiring for Bottleneck {
    type Value = f64;

    fn zero(&self) -> f64 {
        f64::NEG_INFINITY
    }

    fn one(&self) -> f64 {
        f64::INFINITY
    }

    fn add(&self, a: &f64, b: &f64) -> f64 {
        a.max(*b)
    }

    fn mul(&self, a: &f64, b: &f64) -> f64 {
        a.min(*b)
    }
}

/// Log-sum-exp algebra. Values are log-probabilities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Log;

impl Semiring for Log {
    type Value = f64;

    fn zero(&self) -> f64 {
        f64::NEG_INFINITY
    }

    fn one(&self) -> f64 {
        0.0
    }

    fn add(&self, a: &f64, b: &f64) -> f64 {
        if *a == f64::NEG_INFINITY {
            return *b;
        }
        if *b == f64::NEG_INFINITY {
            return *a;
        }
        let max = a.max(*b);
        max + ((a - max).exp() + (b - max).exp()).ln()
    }

    fn mul(&self, a: &f64, b: &f64) -> f64 {
        a + b
    }
}

/// Formal languages: sets of strings under union and concatenation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringLanguage;

impl StringLanguage {
    /// Convenience constructor for a language from string literals.
    pub fn language<I, T>(words: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        words.into_iter().map(Into::into).collect()
    }
}

impl Semiring for StringLanguage {
    type Value = BTreeSet<String>;

    fn zero(&self) -> BTreeSet<String> {
        BTreeSet::new()
    }

    fn one(&self) -> BTreeSet<String> {
        BTreeSet::from([String::new()])
    }

    fn add(&self, a: &BTreeSet<String>, b: &BTreeSet<String>) -> BTreeSet<String> {
        a.union(b).cloned().collect()
    }

    fn mul(&self, a: &BTreeSet<String>, b: &BTreeSet<String>) -> BTreeSet<String> {
        if a.is_empty() || b.is_empty() {
            return BTreeSet::new();
        }
        a.iter()
            .flat_map(|x| b.iter().map(move |y| format!("{x}{y}")))
            .collect()
    }

    fn is_zero(&self, value: &BTreeSet<String>) -> bool {
        value.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_standard_identities() {
        let s = Standard;
        assert_eq!(s.add(&s.zero(), &3.5), 3.5);
        assert_eq!(s.mul(&s.one(), &3.5), 3.5);
        assert_eq!(s.mul(&2.0, &s.add(&3.0, &4.0)), 14.0);
    }

    #[test]
    fn test_tropical_min_plus() {
        let t = Tropical;
        assert_eq!(t.zero(), f64::INFINITY);
        assert_eq!(t.add(&3.0, &1.0), 1.0);
        assert_eq!(t.mul(&3.0, &1.0), 4.0);
        assert_eq!(t.add(&t.zero(), &7.0), 7.0);
        // zero annihilates
        assert_eq!(t.mul(&t.zero(), &7.0), f64::INFINITY);
    }

    #[test]
    fn test_boolean() {
        let b = Boolean;
        assert!(b.add(&true, &false));
        assert!(!b.mul(&true, &false));
        assert!(b.is_zero(&false));
    }

    #[test]
    fn test_viterbi_and_reliability_alias() {
        let v: Reliability = Viterbi;
        assert_eq!(v.add(&0.2, &0.7), 0.7);
        assert_relative_eq!(v.mul(&0.5, &0.4), 0.2);
    }

    #[test]
    fn test_bottleneck() {
        let b = Bottleneck;
        assert_eq!(b.add(&3.0, &5.0), 5.0);
        assert_eq!(b.mul(&3.0, &5.0), 3.0);
        assert_eq!(b.mul(&b.one(), &5.0), 5.0);
        assert_eq!(b.add(&b.zero(), &5.0), 5.0);
    }

    #[test]
    fn test_log_add_is_symmetric_in_zero() {
        let l = Log;
        assert_eq!(l.add(&f64::NEG_INFINITY, &-1.5), -1.5);
        assert_eq!(l.add(&-1.5, &f64::NEG_INFINITY), -1.5);
        let p = 0.25_f64.ln();
        let q = 0.5_f64.ln();
        assert_relative_eq!(l.add(&p, &q).exp(), 0.75, epsilon = 1e-12);
        assert_relative_eq!(l.mul(&p, &q).exp(), 0.125, epsilon = 1e-12);
    }

    #[test]
    fn test_string_language() {
        let s = StringLanguage;
        let a = StringLanguage::language(["a", "b"]);
        let c = StringLanguage::language(["c"]);
        assert_eq!(s.mul(&a, &c), StringLanguage::language(["ac", "bc"]));
        assert_eq!(s.add(&a, &c), StringLanguage::language(["a", "b", "c"]));
        assert_eq!(s.mul(&a, &s.one()), a);
        assert!(s.mul(&a, &s.zero()).is_empty());
        assert!(s.mul(&s.zero(), &a).is_empty());
    }
}
