//! Caller-facing request records and their validation

use crate::data::{Coordinates, ForecastPoint};
use crate::error::{FanChartError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minimum number of forecast steps a fan chart needs
pub const MIN_PREDICTIONS: usize = 2;

/// One forecast step as sent by the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionData {
    /// Display label of the step, e.g. "06:00"
    pub time: String,
    pub predicted_pv: f64,
    pub confidence: f64,
    pub hour: u32,
}

/// Training metrics of the model that produced the forecast
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetrics {
    pub accuracy: Option<f64>,
    pub final_loss: Option<f64>,
    pub final_mae: Option<f64>,
    pub epochs: Option<u32>,
    pub samples: Option<u64>,
    /// Free-form model description
    pub parameters: Option<serde_json::Value>,
}

fn default_location() -> String {
    "Unknown Location".to_string()
}

/// A request for a fan chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FanChartRequest {
    pub predictions: Vec<PredictionData>,
    #[serde(default = "default_location")]
    pub location: String,
    pub coordinates: Coordinates,
    pub timestamp: String,
    #[serde(default)]
    pub model_metrics: Option<ModelMetrics>,
}

impl FanChartRequest {
    /// Parse a request from its JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reject requests the engine cannot chart
    pub fn validate(&self) -> Result<()> {
        if self.predictions.is_empty() {
            return Err(FanChartError::ValidationError(
                "No prediction data provided".to_string(),
            ));
        }
        if self.predictions.len() < MIN_PREDICTIONS {
            return Err(FanChartError::ValidationError(format!(
                "At least {} prediction points required",
                MIN_PREDICTIONS
            )));
        }
        Ok(())
    }

    /// Forecast steps in request order
    pub fn forecast_points(&self) -> Vec<ForecastPoint> {
        self.predictions
            .iter()
            .enumerate()
            .map(|(index, p)| ForecastPoint::new(index, p.predicted_pv, p.confidence))
            .collect()
    }

    /// Accuracy reported by the forecasting model, if any
    pub fn model_accuracy(&self) -> Option<f64> {
        self.model_metrics.as_ref().and_then(|m| m.accuracy)
    }

    /// File name a renderer should use for this request's chart
    pub fn chart_file_name(&self, at: DateTime<Utc>) -> String {
        chart_file_name(&self.location, at)
    }
}

/// `fan_chart_{location}_{YYYYmmdd_HHMMSS}.png`, with spaces in the
/// location replaced by underscores and commas dropped
pub fn chart_file_name(location: &str, at: DateTime<Utc>) -> String {
    let location_safe = location.replace(' ', "_").replace(',', "");
    format!(
        "fan_chart_{}_{}.png",
        location_safe,
        at.format("%Y%m%d_%H%M%S")
    )
}
