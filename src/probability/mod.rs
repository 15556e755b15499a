//! # Discrete probability on sparse distributions
//!
//! Distributions are [`SparseVector`]s of probabilities; joint distributions
//! are [`SparseMatrix`]es with rows as `X` and columns as `Y`. Logarithm bases
//! are explicit, see [`BITS`] and [`NATS`].

use std::cmp::Ordering;
use std::collections::HashMap;
use std::ops::AddAssign;

use num_traits::Zero;

use crate::error::AlgebraError;
use crate::lattice;
use crate::matrix::vec_mat;
use crate::semiring::Standard;
use crate::sparse::{key_universe, MatrixSum, SparseKey, SparseMatrix, SparseVector};
use crate::utils::{Direction, IterationConfig};

pub mod moments;

pub use moments::{expected_value, kurtosis, skewness, variance, NumericKey};

/// Base for information measured in bits.
pub const BITS: f64 = 2.0;
/// Base for information measured in nats.
pub const NATS: f64 = std::f64::consts::E;

/// Rescales `mapping` so its values sum to one.
pub fn normalize<K: SparseKey>(
    mapping: &SparseVector<K, f64>,
) -> anyhow::Result<SparseVector<K, f64>> {
    let total: f64 = mapping.values().sum();
    if total == 0.0 {
        return Err(AlgebraError::ZeroSum.into());
    }
    Ok(mapping.iter().map(|(k, v)| (k.clone(), v / total)).collect())
}

/// Posterior `P(H|D) ∝ P(D|H) P(H)`.
///
/// Without `evidence` the product is normalized, which fails with
/// [`AlgebraError::ZeroSum`] when prior and likelihood share no mass.
/// Otherwise each term is divided by `evidence` as given.
pub fn bayes_update<K: SparseKey>(
    prior: &SparseVector<K, f64>,
    likelihood: &SparseVector<K, f64>,
    evidence: Option<f64>,
) -> anyhow::Result<SparseVector<K, f64>> {
    let posterior = lattice::product(prior, likelihood);
    match evidence {
        None => normalize(&posterior),
        Some(evidence) if evidence == 0.0 => Err(AlgebraError::InvalidArgument(
            "evidence must be non-zero".into(),
        )
        .into()),
        Some(evidence) => Ok(posterior
            .into_iter()
            .map(|(k, v)| (k, v / evidence))
            .collect()),
    }
}

/// Shannon entropy `H(X) = -Σ p log p`.
pub fn entropy<K>(distribution: &SparseVector<K, f64>, base: f64) -> f64 {
    distribution
        .values()
        .filter(|&&p| p > 0.0)
        .map(|&p| -p * p.log(base))
        .sum()
}

/// Cross-entropy `H(P, Q) = -Σ p log q`; infinite when `q` misses an event `p` supports.
pub fn cross_entropy<K: SparseKey>(
    p: &SparseVector<K, f64>,
    q: &SparseVector<K, f64>,
    base: f64,
) -> f64 {
    let mut result = 0.0;
    for (k, &prob_p) in p.iter().filter(|(_, &prob)| prob > 0.0) {
        match q.get(k) {
            Some(&prob_q) if prob_q > 0.0 => result -= prob_p * prob_q.log(base),
            _ => return f64::INFINITY,
        }
    }
    result
}

/// Kullback-Leibler divergence `D(P || Q) = Σ p log(p / q)`.
pub fn kl_divergence<K: SparseKey>(
    p: &SparseVector<K, f64>,
    q: &SparseVector<K, f64>,
    base: f64,
) -> f64 {
    let mut result = 0.0;
    for (k, &prob_p) in p.iter().filter(|(_, &prob)| prob > 0.0) {
        match q.get(k) {
            Some(&prob_q) if prob_q > 0.0 => result += prob_p * (prob_p / prob_q).log(base),
            _ => return f64::INFINITY,
        }
    }
    result
}

/// Sums a joint distribution down to the marginal along `direction`.
///
/// `Direction::Row` gives `P(X)` (row totals), `Direction::Column` gives
/// `P(Y)`. Use `Direction::try_from(axis)` for numpy-style axis numbers.
pub fn marginalize<K, V>(joint: &SparseMatrix<K, V>, direction: Direction) -> SparseVector<K, V>
where
    K: SparseKey,
    V: Zero + Copy + AddAssign,
{
    match direction {
        Direction::Row => joint.sum_row(),
        Direction::Column => joint.sum_col(),
    }
}

/// `I(X; Y) = Σ p(x,y) log(p(x,y) / (p(x) p(y)))`.
pub fn mutual_information<K: SparseKey>(joint: &SparseMatrix<K, f64>, base: f64) -> f64 {
    let p_x = marginalize(joint, Direction::Row);
    let p_y = marginalize(joint, Direction::Column);

    let mut result = 0.0;
    for (x, row) in joint.iter() {
        for (y, &p_xy) in row.iter().filter(|(_, &p)| p > 0.0) {
            let px = p_x.get(x).copied().unwrap_or(0.0);
            let py = p_y.get(y).copied().unwrap_or(0.0);
            result += p_xy * (p_xy / (px * py)).log(base);
        }
    }
    result
}

/// Advances a row-vector distribution `steps` times: `state · P^steps`.
pub fn markov_step<K: SparseKey>(
    state: &SparseVector<K, f64>,
    transition: &SparseMatrix<K, f64>,
    steps: usize,
) -> SparseVector<K, f64> {
    let mut current = state.clone();
    for _ in 0..steps {
        current = vec_mat(&current, transition, &Standard);
    }
    current
}

/// Stationary distribution `π = π·P` by power iteration from the uniform
/// distribution over the chain's states.
pub fn markov_steady_state<K: SparseKey>(
    transition: &SparseMatrix<K, f64>,
    config: IterationConfig,
) -> SparseVector<K, f64> {
    let nodes = key_universe(transition);
    if nodes.is_empty() {
        return HashMap::new();
    }
    let uniform = 1.0 / nodes.len() as f64;
    let mut state: SparseVector<K, f64> = nodes.iter().map(|k| (k.clone(), uniform)).collect();

    for iteration in 0..config.max_iterations {
        let next = vec_mat(&state, transition, &Standard);
        let delta: f64 = nodes
            .iter()
            .map(|k| {
                let new = next.get(k).copied().unwrap_or(0.0);
                let old = state.get(k).copied().unwrap_or(0.0);
                (new - old).abs()
            })
            .sum();
        state = next;
        if delta < config.tolerance {
            log::debug!(
                "markov_steady_state: converged after {} steps (delta {:e})",
                iteration + 1,
                delta
            );
            break;
        }
    }
    state
}

/// Most probable outcome. Ties go to the smallest key.
pub fn mode<K: SparseKey + Ord>(distribution: &SparseVector<K, f64>) -> anyhow::Result<K> {
    distribution
        .iter()
        .max_by(|(ka, a), (kb, b)| {
            a.partial_cmp(b)
                .unwrap_or(Ordering::Equal)
                .then_with(|| kb.cmp(ka))
        })
        .map(|(k, _)| k.clone())
        .ok_or_else(|| {
            let reason = "cannot take the mode of an empty distribution".to_string();
            AlgebraError::InvalidArgument(reason).into()
        })
}
