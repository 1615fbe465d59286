//! # Fan Math
//!
//! Numeric building blocks for fan chart construction.
//! This crate provides empirical percentiles over sample data and the
//! usual point-forecast error measures.

use thiserror::Error;

pub mod accuracy;
pub mod percentile;

pub use accuracy::{forecast_accuracy, ForecastAccuracy};
pub use percentile::{empirical_percentile, empirical_percentile_sorted, sorted_copy};

/// Errors that can occur in fan chart calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for fan chart math operations
pub type Result<T> = std::result::Result<T, MathError>;
