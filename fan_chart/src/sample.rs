//! Synthetic forecasts for demos and smoke tests

use crate::data::Coordinates;
use crate::error::Result;
use crate::request::{FanChartRequest, ModelMetrics, PredictionData};
use chrono::{DateTime, Utc};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

/// First hour of the sample forecast
pub const FIRST_HOUR: u32 = 6;
/// Output reported outside daylight hours
pub const NIGHT_OUTPUT: f64 = 0.1;

/// Hourly forecast starting at 06:00 following a daylight curve
///
/// Daylight hours (06..=18) follow `2.5 + 2 sin((hour - 6) pi / 12)` plus
/// noise; other hours report a small constant. Values never go below zero.
pub fn daylight_forecast<R: Rng + ?Sized>(
    steps: usize,
    rng: &mut R,
) -> Result<Vec<PredictionData>> {
    let output_noise = Normal::new(0.0, 0.3)?;
    let confidence_noise = Normal::new(0.0, 5.0)?;

    let mut predictions = Vec::with_capacity(steps);
    for step in 0..steps {
        let hour = FIRST_HOUR + step as u32;
        let output = if (6..=18).contains(&hour) {
            2.5 + 2.0 * ((hour - 6) as f64 * PI / 12.0).sin() + output_noise.sample(rng)
        } else {
            NIGHT_OUTPUT
        };

        predictions.push(PredictionData {
            time: format!("{:02}:00", hour),
            predicted_pv: output.max(0.0),
            confidence: 85.0 + confidence_noise.sample(rng),
            hour,
        });
    }

    Ok(predictions)
}

/// An 18-step request for the Depok test site
pub fn sample_request<R: Rng + ?Sized>(
    at: DateTime<Utc>,
    rng: &mut R,
) -> Result<FanChartRequest> {
    Ok(FanChartRequest {
        predictions: daylight_forecast(18, rng)?,
        location: "Test Location - Depok".to_string(),
        coordinates: Coordinates::new(-6.4025, 106.7942),
        timestamp: at.to_rfc3339(),
        model_metrics: Some(ModelMetrics {
            accuracy: Some(91.5),
            final_loss: Some(0.008),
            final_mae: Some(0.015),
            epochs: Some(50),
            samples: Some(4500),
            parameters: None,
        }),
    })
}
