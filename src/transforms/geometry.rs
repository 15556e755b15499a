use std::collections::HashSet;

use crate::error::AlgebraError;
use crate::sparse::SparseVector;

use super::NOISE_THRESHOLD;

/// Boosts a space-time vector (index 0 is time) along spatial `axis` with
/// velocity `beta = v / c`.
///
/// Other components pass through. A boosted component that lands within
/// [`NOISE_THRESHOLD`] of zero is removed.
pub fn lorentz_boost(
    vector: &SparseVector<usize, f64>,
    beta: f64,
    axis: usize,
) -> anyhow::Result<SparseVector<usize, f64>> {
    if !(beta.abs() < 1.0) {
        return Err(AlgebraError::SuperluminalBoost(beta).into());
    }
    if axis == 0 {
        let reason = "boost axis must be spatial".to_string();
        return Err(AlgebraError::InvalidArgument(reason).into());
    }

    let gamma = 1.0 / (1.0 - beta * beta).sqrt();
    let t = vector.get(&0).copied().unwrap_or(0.0);
    let x = vector.get(&axis).copied().unwrap_or(0.0);

    let mut result = vector.clone();
    for (index, value) in [(0, gamma * (t - beta * x)), (axis, gamma * (x - beta * t))] {
        if value.abs() < NOISE_THRESHOLD {
            result.remove(&index);
        } else {
            result.insert(index, value);
        }
    }
    Ok(result)
}

/// Box-counting (Minkowski-Bouligand) dimension of a set of lattice points.
///
/// Box sizes double from `min_box_size` up to `max_box_size`, which defaults
/// to half the largest coordinate extent (at least 1). The estimate is the
/// least-squares slope of `log N(s)` against `log 1/s`; it is 0 when fewer
/// than two box sizes are available.
pub fn box_counting_dimension<P>(
    points: impl IntoIterator<Item = P>,
    min_box_size: usize,
    max_box_size: Option<usize>,
) -> anyhow::Result<f64>
where
    P: AsRef<[i64]>,
{
    if min_box_size == 0 {
        let reason = "box size must be positive".to_string();
        return Err(AlgebraError::InvalidArgument(reason).into());
    }

    let coords: Vec<Vec<i64>> = points.into_iter().map(|p| p.as_ref().to_vec()).collect();
    let Some(first) = coords.first() else {
        return Ok(0.0);
    };
    let dim = first.len();
    if coords.iter().any(|c| c.len() != dim) {
        let reason = "points differ in dimension".to_string();
        return Err(AlgebraError::InvalidArgument(reason).into());
    }

    // Offsets are taken in i128 so extreme coordinates cannot overflow.
    let offsets: Vec<Vec<i128>> = {
        let mins: Vec<i64> = (0..dim)
            .map(|d| coords.iter().map(|c| c[d]).min().unwrap_or(0))
            .collect();
        coords
            .iter()
            .map(|c| {
                c.iter()
                    .zip(&mins)
                    .map(|(&x, &lo)| i128::from(x) - i128::from(lo))
                    .collect()
            })
            .collect()
    };
    let extent = offsets.iter().flatten().copied().max().unwrap_or(0);
    let max_box_size = max_box_size
        .unwrap_or_else(|| usize::try_from(extent / 2).unwrap_or(usize::MAX).max(1));

    let mut samples = Vec::new();
    let mut size = min_box_size;
    while size <= max_box_size {
        let side = size as i128;
        let boxes: HashSet<Vec<i128>> = offsets
            .iter()
            .map(|offset| offset.iter().map(|x| x / side).collect())
            .collect();
        samples.push(((1.0 / size as f64).ln(), (boxes.len() as f64).ln()));
        size = match size.checked_mul(2) {
            Some(next) => next,
            None => break,
        };
    }
    log::debug!("box_counting_dimension: {} box sizes", samples.len());

    if samples.len() < 2 {
        return Ok(0.0);
    }
    let count = samples.len() as f64;
    let mean_x = samples.iter().map(|(x, _)| x).sum::<f64>() / count;
    let mean_y = samples.iter().map(|(_, y)| y).sum::<f64>() / count;
    let cov: f64 = samples.iter().map(|(x, y)| (x - mean_x) * (y - mean_y)).sum();
    let var: f64 = samples.iter().map(|(x, _)| (x - mean_x).powi(2)).sum();
    if var.abs() < 1e-9 {
        return Ok(0.0);
    }
    Ok(cov / var)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    #[test]
    fn test_lorentz_boost() {
        let event = HashMap::from([(0, 1.0), (1, 0.5), (2, 3.0)]);
        let boosted = lorentz_boost(&event, 0.6, 1).unwrap();
        // gamma = 1.25
        assert_relative_eq!(boosted[&0], 1.25 * (1.0 - 0.3), epsilon = 1e-12);
        assert_relative_eq!(boosted[&1], 1.25 * (0.5 - 0.6), epsilon = 1e-12);
        assert_eq!(boosted[&2], 3.0);
    }

    #[test]
    fn test_lorentz_boost_preserves_interval() {
        let event = HashMap::from([(0, 2.0), (3, 1.0)]);
        let boosted = lorentz_boost(&event, -0.8, 3).unwrap();
        let interval = |v: &SparseVector<usize, f64>| {
            let t = v.get(&0).copied().unwrap_or(0.0);
            let z = v.get(&3).copied().unwrap_or(0.0);
            t * t - z * z
        };
        assert_relative_eq!(interval(&boosted), interval(&event), epsilon = 1e-12);
    }

    #[test]
    fn test_lorentz_boost_drops_vanishing_components() {
        // moving at x = βt, so at rest in the boosted frame
        let event = HashMap::from([(0, 1.0), (1, 0.5)]);
        let boosted = lorentz_boost(&event, 0.5, 1).unwrap();
        assert!(!boosted.contains_key(&1));
        assert!(boosted.contains_key(&0));
    }

    #[test]
    fn test_lorentz_boost_rejects_invalid_beta() {
        let event = HashMap::from([(0, 1.0)]);
        for beta in [1.0, -1.0, 2.5, f64::NAN] {
            let err = lorentz_boost(&event, beta, 1).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<AlgebraError>(),
                Some(AlgebraError::SuperluminalBoost(_))
            ));
        }
        assert!(lorentz_boost(&event, 0.5, 0).is_err());
    }

    #[test]
    fn test_box_counting_line() {
        let line: Vec<[i64; 2]> = (0..64).map(|x| [x, 0]).collect();
        let d = box_counting_dimension(&line, 1, None).unwrap();
        assert_relative_eq!(d, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_box_counting_square() {
        let square: Vec<Vec<i64>> = (0..32)
            .flat_map(|x| (0..32).map(move |y| vec![x, y]))
            .collect();
        let d = box_counting_dimension(square, 1, None).unwrap();
        assert_relative_eq!(d, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_box_counting_sparse_keys() {
        let cloud: HashMap<[i64; 2], f64> = (0..16).map(|x| ([x, x], 1.0)).collect();
        let d = box_counting_dimension(cloud.keys(), 1, Some(8)).unwrap();
        assert_relative_eq!(d, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_box_counting_full_coordinate_range() {
        let ends = vec![vec![i64::MIN], vec![i64::MAX]];
        // two points stay in two boxes at every size
        let d = box_counting_dimension(&ends, 1, Some(4)).unwrap();
        assert!(d.abs() < 1e-9);
        let d = box_counting_dimension(&ends, 1, None).unwrap();
        assert!(d.abs() < 1e-9);
    }

    #[test]
    fn test_box_counting_degenerate() {
        let single = vec![[5_i64, 5]];
        assert_eq!(box_counting_dimension(&single, 1, None).unwrap(), 0.0);

        let none: Vec<[i64; 2]> = Vec::new();
        assert_eq!(box_counting_dimension(&none, 1, None).unwrap(), 0.0);

        assert!(box_counting_dimension(&single, 0, None).is_err());
        assert!(box_counting_dimension([vec![0_i64], vec![1, 2]], 1, None).is_err());
    }
}
