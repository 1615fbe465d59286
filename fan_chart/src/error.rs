//! Error types for the fan_chart crate

use fan_math::MathError;
use thiserror::Error;

/// Custom error types for the fan_chart crate
#[derive(Debug, Error)]
pub enum FanChartError {
    /// Caller-side request validation failed
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Predicted and actual series drifted apart inside the pipeline
    #[error("Internal invariant violated: {0}")]
    InternalInvariant(String),

    /// Numeric processing failed on malformed values
    #[error("Computation error: {0}")]
    ComputationError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from the math helpers
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from JSON (de)serialization
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, FanChartError>;

impl From<rand_distr::NormalError> for FanChartError {
    fn from(err: rand_distr::NormalError) -> Self {
        FanChartError::ComputationError(format!("Invalid noise model: {}", err))
    }
}
