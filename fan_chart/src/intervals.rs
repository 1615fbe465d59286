//! Percentile bands from the empirical residual distribution
//!
//! Each band shifts the whole forecast line by two scalar offsets taken
//! from the residual distribution, so its width is constant over the
//! horizon.

use crate::config::FanChartConfig;
use crate::error::{FanChartError, Result};
use fan_math::{empirical_percentile_sorted, sorted_copy};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Lower and upper series of one confidence band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileBand {
    /// Band width in percent, strictly between 0 and 100
    pub percentile: u8,
    /// Lower edge, one value per forecast step
    pub lower: Vec<f64>,
    /// Upper edge, one value per forecast step
    pub upper: Vec<f64>,
}

impl PercentileBand {
    /// Shift `predicted` by `lower_offset` and `upper_offset`
    pub fn from_offsets(
        percentile: u8,
        predicted: &[f64],
        lower_offset: f64,
        upper_offset: f64,
    ) -> Self {
        Self {
            percentile,
            lower: predicted.iter().map(|p| p + lower_offset).collect(),
            upper: predicted.iter().map(|p| p + upper_offset).collect(),
        }
    }

    /// Number of forecast steps covered
    pub fn len(&self) -> usize {
        self.lower.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    /// Whether every edge value is finite
    pub fn is_finite(&self) -> bool {
        self.lower.iter().chain(self.upper.iter()).all(|v| v.is_finite())
    }

    /// Constant distance between the edges; zero for an empty band
    pub fn width(&self) -> f64 {
        match (self.lower.first(), self.upper.first()) {
            (Some(lower), Some(upper)) => upper - lower,
            _ => 0.0,
        }
    }
}

/// Derives nested percentile bands around a forecast
#[derive(Debug, Clone)]
pub struct IntervalEstimator {
    /// Widest first
    percentiles: Vec<u8>,
}

impl IntervalEstimator {
    /// Create an estimator for the percentiles in `config`
    pub fn new(config: &FanChartConfig) -> Self {
        Self {
            percentiles: config.percentiles_widest_first(),
        }
    }

    /// Percentiles this estimator produces, widest first
    pub fn percentiles(&self) -> &[u8] {
        &self.percentiles
    }

    /// Build one band per percentile, sorted descending by percentile
    ///
    /// An empty residual series has no distribution to draw from; every
    /// band then collapses onto the forecast line.
    pub fn estimate(&self, predicted: &[f64], residual: &[f64]) -> Result<Vec<PercentileBand>> {
        if residual.is_empty() {
            debug!("No residuals available, collapsing bands onto the forecast");
            return Ok(self
                .percentiles
                .iter()
                .map(|&p| PercentileBand::from_offsets(p, predicted, 0.0, 0.0))
                .collect());
        }

        let sorted = sorted_copy(residual)?;
        let mut bands = Vec::with_capacity(self.percentiles.len());
        for &p in &self.percentiles {
            let q = (100.0 - f64::from(p)) / 2.0;
            let lower_offset = empirical_percentile_sorted(&sorted, q)?;
            let upper_offset = empirical_percentile_sorted(&sorted, 100.0 - q)?;
            let band = PercentileBand::from_offsets(p, predicted, lower_offset, upper_offset);
            if !band.is_finite() {
                return Err(FanChartError::ComputationError(format!(
                    "Band edge for the {}% band is not finite",
                    p
                )));
            }
            bands.push(band);
        }

        debug!(
            bands = bands.len(),
            residuals = residual.len(),
            "Estimated percentile bands"
        );
        Ok(bands)
    }
}
