use thiserror::Error;

/// Failure categories raised by the algebra routines.
///
/// Public operations return `anyhow::Result`; the concrete category can be
/// recovered with `err.downcast_ref::<AlgebraError>()`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlgebraError {
    #[error("Exponent must be non-negative, got {0}")]
    NegativeExponent(i64),

    #[error("Axis must be 0 or 1, got {0}")]
    InvalidAxis(usize),

    #[error("Cannot normalize a mapping with zero sum")]
    ZeroSum,

    #[error("Matrix is singular (determinant is 0)")]
    SingularMatrix,

    #[error("Mapping is not a complete permutation: broken cycle at {0}")]
    BrokenCycle(String),

    #[error("Beta must be less than 1 (speed of light), got {0}")]
    SuperluminalBoost(f64),

    #[error("Key cannot be interpreted as a number")]
    NonNumericKey,

    #[error("Path not found")]
    PathNotFound,

    #[error("{0}")]
    InvalidArgument(String),
}
