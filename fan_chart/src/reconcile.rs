//! Reconciliation of forecasts against incomplete ground truth
//!
//! The reconciler always returns an actual-value series with exactly one
//! entry per forecast step. Historical proxy readings fill the leading
//! steps; every remaining step is synthesized by adding noise proportional
//! to the forecast magnitude.

use crate::config::FanChartConfig;
use crate::data::AuxiliaryReading;
use crate::error::{FanChartError, Result};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::{debug, warn};

/// Output of a reconciliation run
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    /// Reconciled actual values, one per forecast step, all non-negative
    pub actual: Vec<f64>,
    /// Number of historical records that contributed a value
    pub records_used: usize,
    /// Number of values synthesized around the forecast
    pub synthesized: usize,
}

/// Builds a complete actual-value series for a forecast
#[derive(Debug, Clone)]
pub struct Reconciler {
    fallback_reading: f64,
    reading_scale: f64,
    reading_noise_std: f64,
    relative_noise: f64,
    default_value: f64,
}

impl Reconciler {
    /// Create a reconciler using the noise model from `config`
    pub fn new(config: &FanChartConfig) -> Self {
        Self {
            fallback_reading: config.fallback_reading,
            reading_scale: config.reading_scale,
            reading_noise_std: config.reading_noise_std,
            relative_noise: config.relative_noise,
            default_value: config.default_value,
        }
    }

    /// Reconcile `predicted` against `historical`, most relevant record first
    ///
    /// At most `predicted.len()` records are consumed, in the order given.
    pub fn reconcile<R: Rng + ?Sized>(
        &self,
        predicted: &[f64],
        historical: &[AuxiliaryReading],
        rng: &mut R,
    ) -> Result<Reconciliation> {
        check_forecast(predicted)?;

        let n = predicted.len();
        let mut actual = Vec::with_capacity(n);

        let reading_noise = Normal::new(0.0, self.reading_noise_std)?;
        for (i, record) in historical.iter().take(n).enumerate() {
            let avg = record.average().unwrap_or(self.fallback_reading);
            if !avg.is_finite() {
                return Err(FanChartError::ComputationError(format!(
                    "Historical record {} has a non-finite reading average",
                    i
                )));
            }
            let estimate = avg * self.reading_scale + reading_noise.sample(rng);
            actual.push(check_value(estimate.max(0.0), i)?);
        }
        let records_used = actual.len();

        for i in records_used..n {
            let p = predicted
                .get(i)
                .copied()
                .or_else(|| actual.last().copied())
                .unwrap_or(self.default_value);
            let noise = Normal::new(0.0, self.relative_noise * p)?;
            actual.push(check_value((p + noise.sample(rng)).max(0.0), i)?);
        }
        let synthesized = actual.len() - records_used;

        debug!(
            points = n,
            records_used, synthesized, "Reconciled actual values against forecast"
        );

        if actual.len() != n {
            warn!(
                produced = actual.len(),
                expected = n,
                "Correcting reconciled series length"
            );
            actual.truncate(n);
            let last = actual.last().copied().unwrap_or(self.default_value);
            actual.resize(n, last);
        }

        Ok(Reconciliation {
            actual,
            records_used,
            synthesized,
        })
    }
}

/// Forecast values must be finite and non-negative for the noise model
fn check_forecast(predicted: &[f64]) -> Result<()> {
    if let Some((i, value)) = predicted
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite() || **v < 0.0)
    {
        return Err(FanChartError::ComputationError(format!(
            "Forecast value at index {} must be a non-negative finite number, got {}",
            i, value
        )));
    }
    Ok(())
}

/// A reconciled value must stay finite, or the residual distribution is undefined
fn check_value(value: f64, index: usize) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FanChartError::ComputationError(format!(
            "Reconciled value at index {} is not finite",
            index
        )))
    }
}
