use crate::error::AlgebraError;

/// Which axis of a sparse matrix a reduction keeps.
///
/// `Direction::Row` produces one value per row (summing across columns),
/// `Direction::Column` produces one value per column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Row,
    Column,
}

/// Numpy-style axis numbering: axis 0 collapses rows (column totals),
/// axis 1 collapses columns (row totals).
impl TryFrom<usize> for Direction {
    type Error = AlgebraError;

    fn try_from(axis: usize) -> Result<Self, Self::Error> {
        match axis {
            0 => Ok(Direction::Column),
            1 => Ok(Direction::Row),
            other => Err(AlgebraError::InvalidAxis(other)),
        }
    }
}

/// Stopping rule shared by the iterative algorithms (power iteration,
/// Markov steady state).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationConfig {
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for IterationConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}

impl IterationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_axis() {
        assert_eq!(Direction::try_from(0).unwrap(), Direction::Column);
        assert_eq!(Direction::try_from(1).unwrap(), Direction::Row);
        assert_eq!(Direction::try_from(2), Err(AlgebraError::InvalidAxis(2)));
    }

    #[test]
    fn test_iteration_config_builder() {
        let config = IterationConfig::new().max_iterations(10).tolerance(1e-3);
        assert_eq!(config.max_iterations, 10);
        assert_eq!(config.tolerance, 1e-3);
        assert_eq!(IterationConfig::default().max_iterations, 100);
    }
}
