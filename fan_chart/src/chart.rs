//! Fan chart assembly
//!
//! [`FanChartEngine`] runs the reconcile, residual and interval stages and
//! packs their output into a [`FanChartResult`]. A failure in any stage
//! comes back as a result with `success == false`; the engine never
//! returns an error to its caller.

use crate::config::FanChartConfig;
use crate::data::{AuxiliaryReading, ForecastPoint};
use crate::error::{FanChartError, Result};
use crate::intervals::{IntervalEstimator, PercentileBand};
use crate::reconcile::Reconciler;
use crate::residuals::{residuals, ResidualSummary};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{info, warn};

/// Data source label when at least one historical record was consumed
pub const SOURCE_HISTORICAL: &str = "Historical + Predictions";
/// Data source label when every actual value was synthesized
pub const SOURCE_PREDICTIONS_ONLY: &str = "Predictions only";

/// Everything a renderer needs to draw a fan chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FanChartResult {
    /// Bands ordered outermost (widest) first
    pub bands: Vec<PercentileBand>,
    pub predicted_line: Vec<f64>,
    pub actual_line: Vec<f64>,
    pub point_count: usize,
    pub historical_records_used: usize,
    pub success: bool,
    pub message: String,
    pub elapsed_ms: f64,
    pub intervals_calculated: usize,
    pub data_source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_accuracy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residual_summary: Option<ResidualSummary>,
}

impl FanChartResult {
    /// A failed run carrying `err` as its message
    pub fn failure(err: &FanChartError, elapsed_ms: f64) -> Self {
        Self {
            bands: Vec::new(),
            predicted_line: Vec::new(),
            actual_line: Vec::new(),
            point_count: 0,
            historical_records_used: 0,
            success: false,
            message: format!("Fan chart generation failed: {}", err),
            elapsed_ms,
            intervals_calculated: 0,
            data_source: SOURCE_PREDICTIONS_ONLY.to_string(),
            model_accuracy: None,
            residual_summary: None,
        }
    }

    /// Attach the accuracy reported by the forecasting model
    pub fn with_model_accuracy(mut self, accuracy: Option<f64>) -> Self {
        self.model_accuracy = accuracy;
        self
    }

    /// Band for `percentile`, if it was computed
    pub fn band(&self, percentile: u8) -> Option<&PercentileBand> {
        self.bands.iter().find(|b| b.percentile == percentile)
    }
}

/// Stage output before timing and messages are attached
struct Assembled {
    bands: Vec<PercentileBand>,
    predicted: Vec<f64>,
    actual: Vec<f64>,
    records_used: usize,
    summary: Option<ResidualSummary>,
}

/// Stateless fan chart generator
///
/// An engine holds only its configuration; it can be shared freely between
/// threads as long as each call gets its own random source.
#[derive(Debug, Clone)]
pub struct FanChartEngine {
    reconciler: Reconciler,
    estimator: IntervalEstimator,
}

impl FanChartEngine {
    /// Create an engine, validating `config`
    pub fn new(config: FanChartConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            reconciler: Reconciler::new(&config),
            estimator: IntervalEstimator::new(&config),
        })
    }

    /// Percentiles the engine will produce, widest first
    pub fn percentiles(&self) -> &[u8] {
        self.estimator.percentiles()
    }

    /// Generate a fan chart for a sequence of forecast points
    pub fn generate<R: Rng + ?Sized>(
        &self,
        points: &[ForecastPoint],
        historical: &[AuxiliaryReading],
        rng: &mut R,
    ) -> FanChartResult {
        let predicted: Vec<f64> = points.iter().map(|p| p.predicted_value).collect();
        self.generate_values(&predicted, historical, rng)
    }

    /// Generate a fan chart for bare forecast values
    pub fn generate_values<R: Rng + ?Sized>(
        &self,
        predicted: &[f64],
        historical: &[AuxiliaryReading],
        rng: &mut R,
    ) -> FanChartResult {
        self.generate_since(Instant::now(), predicted, historical, rng)
    }

    /// Run the pipeline, reporting time elapsed since `start`
    fn generate_since<R: Rng + ?Sized>(
        &self,
        start: Instant,
        predicted: &[f64],
        historical: &[AuxiliaryReading],
        rng: &mut R,
    ) -> FanChartResult {
        match self.assemble(predicted, historical, rng) {
            Ok(assembled) => {
                let elapsed = elapsed_ms(start);
                let (message, data_source) = if assembled.records_used > 0 {
                    (
                        "Fan chart generated successfully with historical data",
                        SOURCE_HISTORICAL,
                    )
                } else {
                    (
                        "Fan chart generated successfully with simulated data",
                        SOURCE_PREDICTIONS_ONLY,
                    )
                };
                info!(
                    points = assembled.predicted.len(),
                    records_used = assembled.records_used,
                    elapsed_ms = elapsed,
                    "Fan chart generated"
                );

                FanChartResult {
                    intervals_calculated: assembled.bands.len(),
                    point_count: assembled.predicted.len(),
                    bands: assembled.bands,
                    predicted_line: assembled.predicted,
                    actual_line: assembled.actual,
                    historical_records_used: assembled.records_used,
                    success: true,
                    message: message.to_string(),
                    elapsed_ms: elapsed,
                    data_source: data_source.to_string(),
                    model_accuracy: None,
                    residual_summary: assembled.summary,
                }
            }
            Err(err) => {
                let elapsed = elapsed_ms(start);
                warn!(error = %err, elapsed_ms = elapsed, "Fan chart generation failed");
                FanChartResult::failure(&err, elapsed)
            }
        }
    }

    fn assemble<R: Rng + ?Sized>(
        &self,
        predicted: &[f64],
        historical: &[AuxiliaryReading],
        rng: &mut R,
    ) -> Result<Assembled> {
        let reconciliation = self.reconciler.reconcile(predicted, historical, rng)?;
        let residual = residuals(predicted, &reconciliation.actual)?;
        let bands = self.estimator.estimate(predicted, &residual)?;

        let summary = if residual.is_empty() {
            None
        } else {
            Some(ResidualSummary::from_series(
                predicted,
                &reconciliation.actual,
            )?)
        };

        Ok(Assembled {
            bands,
            predicted: predicted.to_vec(),
            actual: reconciliation.actual,
            records_used: reconciliation.records_used,
            summary,
        })
    }
}

/// Generate a fan chart with optional percentiles and random source
///
/// Without `percentiles` the default set 10..=90 is used; without `rng` a
/// freshly seeded generator is drawn from the operating system.
pub fn generate_fan_chart(
    predicted: &[f64],
    historical: &[AuxiliaryReading],
    percentiles: Option<&[u8]>,
    rng: Option<&mut dyn RngCore>,
) -> FanChartResult {
    let start = Instant::now();

    let config = match percentiles {
        Some(percentiles) => FanChartConfig::new().with_percentiles(percentiles),
        None => Ok(FanChartConfig::new()),
    };
    let engine = match config.and_then(FanChartEngine::new) {
        Ok(engine) => engine,
        Err(err) => {
            warn!(error = %err, "Rejected fan chart configuration");
            return FanChartResult::failure(&err, elapsed_ms(start));
        }
    };

    match rng {
        Some(rng) => engine.generate_since(start, predicted, historical, rng),
        None => {
            let mut rng = StdRng::from_entropy();
            engine.generate_since(start, predicted, historical, &mut rng)
        }
    }
}

/// Generate a fan chart whose noise is fully determined by `seed`
pub fn generate_fan_chart_with_seed(
    predicted: &[f64],
    historical: &[AuxiliaryReading],
    percentiles: Option<&[u8]>,
    seed: u64,
) -> FanChartResult {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_fan_chart(predicted, historical, percentiles, Some(&mut rng))
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
