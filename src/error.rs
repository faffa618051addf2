use std::fmt;

/// Errors returned by `HyperLogLog` construction and merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimatorError {
    /// Precision outside of `MIN_PRECISION..=MAX_PRECISION`.
    InvalidPrecision { precision: u8 },
    /// Estimators with different precisions have incompatible register arrays.
    PrecisionMismatch { lhs: u8, rhs: u8 },
}

impl fmt::Display for EstimatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstimatorError::InvalidPrecision { precision } => write!(
                f,
                "invalid precision {} (expected {}..={})",
                precision,
                crate::MIN_PRECISION,
                crate::MAX_PRECISION
            ),
            EstimatorError::PrecisionMismatch { lhs, rhs } => write!(
                f,
                "cannot merge estimators with precision {} and {}",
                lhs, rhs
            ),
        }
    }
}

impl std::error::Error for EstimatorError {}

pub type Result<T> = std::result::Result<T, EstimatorError>;
