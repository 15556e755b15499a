//! # Transforms of sparse signals
//!
//! Signals are [`SparseVector`]s keyed by integer time (or space) indices.
//! The discrete Fourier family is computed directly, so each transform costs
//! `O(N · nnz)` rather than needing a dense buffer. Outputs whose magnitude
//! falls below [`NOISE_THRESHOLD`] are treated as zero and not stored.

use std::collections::HashMap;
use std::f64::consts::PI;

use num_complex::Complex64;
use num_traits::Zero;

use crate::error::AlgebraError;
use crate::sparse::SparseVector;

pub mod convolution;
pub mod geometry;

pub use convolution::{convolve, convolve_with, permute_tensor};
pub use geometry::{box_counting_dimension, lorentz_boost};

/// Magnitude under which a transform output counts as zero.
pub const NOISE_THRESHOLD: f64 = 1e-9;

/// Transform size: explicit, or one past the largest index.
fn transform_size<V>(signal: &SparseVector<i64, V>, n: Option<usize>) -> usize {
    n.unwrap_or_else(|| {
        signal
            .keys()
            .max()
            .map_or(0, |&max| usize::try_from(max.saturating_add(1)).unwrap_or(0))
    })
}

/// `exp(sign · 2πi · k · m / n)`, with the phase reduced modulo `n` first.
fn twiddle(k: i64, m: i64, n: usize, sign: f64) -> Complex64 {
    let n = n as i128;
    let phase = (i128::from(k).rem_euclid(n) * i128::from(m).rem_euclid(n)) % n;
    Complex64::from_polar(1.0, sign * 2.0 * PI * phase as f64 / n as f64)
}

fn fourier<V>(
    input: &SparseVector<i64, V>,
    n: usize,
    sign: f64,
    scale: f64,
) -> SparseVector<i64, Complex64>
where
    V: Copy + Into<Complex64>,
{
    let mut result = HashMap::new();
    for k in 0..n as i64 {
        let value: Complex64 = input
            .iter()
            .map(|(&m, &x)| x.into() * twiddle(k, m, n, sign))
            .sum::<Complex64>()
            * scale;
        if value.norm() >= NOISE_THRESHOLD {
            result.insert(k, value);
        }
    }
    result
}

/// Discrete Fourier transform `X[k] = Σ x[m] e^{-2πikm/N}` for `k` in `0..N`.
///
/// `n` defaults to the largest index plus one.
pub fn dft<V>(signal: &SparseVector<i64, V>, n: Option<usize>) -> SparseVector<i64, Complex64>
where
    V: Copy + Into<Complex64>,
{
    let n = transform_size(signal, n);
    if signal.is_empty() || n == 0 {
        return HashMap::new();
    }
    fourier(signal, n, -1.0, 1.0)
}

/// Inverse transform `x[m] = (1/N) Σ X[k] e^{2πikm/N}`.
pub fn idft(
    spectrum: &SparseVector<i64, Complex64>,
    n: Option<usize>,
) -> SparseVector<i64, Complex64> {
    let n = transform_size(spectrum, n);
    if spectrum.is_empty() || n == 0 {
        return HashMap::new();
    }
    fourier(spectrum, n, 1.0, 1.0 / n as f64)
}

/// Analytic signal `x + i·H(x)`.
///
/// The spectrum keeps DC and (for even `N`) the Nyquist bin as they are,
/// doubles bins `1..=(N-1)/2` and drops the negative frequencies before
/// transforming back. The imaginary part of the result is the Hilbert
/// transform of `signal`.
pub fn hilbert(signal: &SparseVector<i64, f64>, n: Option<usize>) -> SparseVector<i64, Complex64> {
    let n = transform_size(signal, n);
    if signal.is_empty() || n == 0 {
        return HashMap::new();
    }

    let last_doubled = ((n - 1) / 2) as i64;
    let nyquist = (n % 2 == 0).then_some((n / 2) as i64);
    let analytic_spectrum: SparseVector<i64, Complex64> = dft(signal, Some(n))
        .into_iter()
        .filter_map(|(k, value)| {
            if k == 0 || Some(k) == nyquist {
                Some((k, value))
            } else if (1..=last_doubled).contains(&k) {
                Some((k, value * 2.0))
            } else {
                None
            }
        })
        .collect();
    idft(&analytic_spectrum, Some(n))
}

/// Unilateral z-transform `X(z) = Σ_{n ≥ 0} x[n] z^{-n}`. Negative indices
/// are ignored.
///
/// `z = 0` is only accepted when the signal has no positive index, since
/// `z^{-n}` is undefined there.
pub fn z_transform<V>(signal: &SparseVector<i64, V>, z: Complex64) -> anyhow::Result<Complex64>
where
    V: Copy + Into<Complex64>,
{
    if z.is_zero() && signal.keys().any(|&n| n > 0) {
        let reason = "z-transform is undefined at z = 0".to_string();
        return Err(AlgebraError::InvalidArgument(reason).into());
    }
    if z.is_zero() {
        return Ok(signal.get(&0).map_or(Complex64::zero(), |&x| x.into()));
    }

    let inv = z.inv();
    Ok(signal
        .iter()
        .filter(|(&n, _)| n >= 0)
        .map(|(&n, &x)| {
            let weight = match u32::try_from(n) {
                Ok(exponent) => inv.powu(exponent),
                Err(_) => inv.powf(n as f64),
            };
            x.into() * weight
        })
        .sum())
}
