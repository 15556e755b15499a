//! Moments of numeric-keyed distributions.

use num_traits::ToPrimitive;

use crate::error::AlgebraError;
use crate::sparse::SparseVector;

/// Outcome keys that may or may not be read as a number.
pub trait NumericKey {
    fn to_number(&self) -> Option<f64>;
}

macro_rules! impl_numeric_key {
    ($($t:ty),*) => {
        $(
            impl NumericKey for $t {
                fn to_number(&self) -> Option<f64> {
                    self.to_f64()
                }
            }
        )*
    };
}

impl_numeric_key!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

macro_rules! impl_symbolic_key {
    ($($t:ty),*) => {
        $(
            impl NumericKey for $t {
                fn to_number(&self) -> Option<f64> {
                    None
                }
            }
        )*
    };
}

impl_symbolic_key!(String, &str, char, bool);

/// `(outcome, probability)` pairs with every outcome read as a number.
fn outcomes<K: NumericKey>(distribution: &SparseVector<K, f64>) -> anyhow::Result<Vec<(f64, f64)>> {
    distribution
        .iter()
        .map(|(k, &p)| {
            k.to_number()
                .map(|x| (x, p))
                .ok_or_else(|| AlgebraError::NonNumericKey.into())
        })
        .collect()
}

fn central_moment(outcomes: &[(f64, f64)], mu: f64, order: i32) -> f64 {
    outcomes.iter().map(|(x, p)| (x - mu).powi(order) * p).sum()
}

fn mean_of(outcomes: &[(f64, f64)]) -> f64 {
    outcomes.iter().map(|(x, p)| x * p).sum()
}

/// `E[X] = Σ x p(x)`.
pub fn expected_value<K: NumericKey>(distribution: &SparseVector<K, f64>) -> anyhow::Result<f64> {
    Ok(mean_of(&outcomes(distribution)?))
}

/// `Var(X) = E[(X - μ)²]`, with `μ` computed unless given.
pub fn variance<K: NumericKey>(
    distribution: &SparseVector<K, f64>,
    mu: Option<f64>,
) -> anyhow::Result<f64> {
    let outcomes = outcomes(distribution)?;
    let mu = mu.unwrap_or_else(|| mean_of(&outcomes));
    Ok(central_moment(&outcomes, mu, 2))
}

/// Third standardized moment. Zero when `σ` is zero.
pub fn skewness<K: NumericKey>(
    distribution: &SparseVector<K, f64>,
    mu: Option<f64>,
    sigma: Option<f64>,
) -> anyhow::Result<f64> {
    standardized_moment(distribution, mu, sigma, 3)
}

/// Fourth standardized moment (not excess kurtosis). Zero when `σ` is zero.
pub fn kurtosis<K: NumericKey>(
    distribution: &SparseVector<K, f64>,
    mu: Option<f64>,
    sigma: Option<f64>,
) -> anyhow::Result<f64> {
    standardized_moment(distribution, mu, sigma, 4)
}

fn standardized_moment<K: NumericKey>(
    distribution: &SparseVector<K, f64>,
    mu: Option<f64>,
    sigma: Option<f64>,
    order: i32,
) -> anyhow::Result<f64> {
    let outcomes = outcomes(distribution)?;
    let mu = mu.unwrap_or_else(|| mean_of(&outcomes));
    let sigma = sigma.unwrap_or_else(|| central_moment(&outcomes, mu, 2).sqrt());
    if sigma == 0.0 {
        return Ok(0.0);
    }
    Ok(central_moment(&outcomes, mu, order) / sigma.powi(order))
}
