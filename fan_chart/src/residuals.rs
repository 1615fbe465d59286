//! Forecast residuals

use crate::error::{FanChartError, Result};
use fan_math::forecast_accuracy;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Elementwise `predicted[i] - actual[i]`
///
/// Residuals are not clamped and may be negative.
pub fn residuals(predicted: &[f64], actual: &[f64]) -> Result<Vec<f64>> {
    if predicted.len() != actual.len() {
        return Err(FanChartError::InternalInvariant(format!(
            "Predicted length ({}) doesn't match actual length ({})",
            predicted.len(),
            actual.len()
        )));
    }

    Ok(predicted
        .iter()
        .zip(actual.iter())
        .map(|(p, a)| p - a)
        .collect())
}

/// Summary of the residual distribution reported with a fan chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidualSummary {
    /// Mean absolute residual
    pub mae: f64,
    /// Root mean squared residual
    pub rmse: f64,
    /// Mean residual; positive when the forecast overshoots
    pub bias: f64,
    /// Population standard deviation of the residuals
    pub std_dev: f64,
}

impl ResidualSummary {
    /// Summarize how far `predicted` strayed from `actual`
    pub fn from_series(predicted: &[f64], actual: &[f64]) -> Result<Self> {
        let residual = residuals(predicted, actual)?;
        let accuracy = forecast_accuracy(predicted, actual)?;

        Ok(Self {
            mae: accuracy.mae,
            rmse: accuracy.rmse,
            bias: accuracy.bias,
            std_dev: residual.iter().population_std_dev(),
        })
    }
}
