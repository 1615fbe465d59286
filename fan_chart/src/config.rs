//! Engine configuration
//!
//! Every constant used by the reconciler and the interval estimator lives
//! here, so a deployment can tune the noise model without touching code.

use crate::error::{FanChartError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Percentile widths drawn when the caller does not ask for others
pub const DEFAULT_PERCENTILES: [u8; 9] = [10, 20, 30, 40, 50, 60, 70, 80, 90];

/// Tunable parameters of the fan chart engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FanChartConfig {
    /// Band widths, each strictly between 0 and 100
    pub percentiles: Vec<u8>,
    /// Reading used when a historical record has no usable sub-reading
    pub fallback_reading: f64,
    /// Conversion factor from an averaged reading to an output estimate
    pub reading_scale: f64,
    /// Standard deviation of the noise added to reading-based estimates
    pub reading_noise_std: f64,
    /// Synthesized noise standard deviation as a fraction of the forecast
    pub relative_noise: f64,
    /// Value used when no forecast or synthesized value is available
    pub default_value: f64,
}

impl Default for FanChartConfig {
    fn default() -> Self {
        Self {
            percentiles: DEFAULT_PERCENTILES.to_vec(),
            fallback_reading: 5.0,
            reading_scale: 0.8,
            reading_noise_std: 0.2,
            relative_noise: 0.15,
            default_value: 1.0,
        }
    }
}

impl FanChartConfig {
    /// Create a configuration with the default noise model and percentiles
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the percentile set, validating every entry
    pub fn with_percentiles(mut self, percentiles: &[u8]) -> Result<Self> {
        self.percentiles = percentiles.to_vec();
        self.validate()?;
        Ok(self)
    }

    /// Disable both noise sources, making the reconciled series deterministic
    pub fn without_noise(mut self) -> Self {
        self.reading_noise_std = 0.0;
        self.relative_noise = 0.0;
        self
    }

    /// Load a configuration from a JSON document; absent fields keep defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check that every parameter is usable
    pub fn validate(&self) -> Result<()> {
        if self.percentiles.is_empty() {
            return Err(FanChartError::InvalidParameter(
                "At least one percentile is required".to_string(),
            ));
        }
        if let Some(p) = self.percentiles.iter().find(|&&p| p == 0 || p >= 100) {
            return Err(FanChartError::InvalidParameter(format!(
                "Percentile must be between 1 and 99, got {}",
                p
            )));
        }

        let non_negative = [
            ("fallback_reading", self.fallback_reading),
            ("reading_scale", self.reading_scale),
            ("reading_noise_std", self.reading_noise_std),
            ("relative_noise", self.relative_noise),
            ("default_value", self.default_value),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(FanChartError::InvalidParameter(format!(
                    "{} must be a non-negative finite number, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    /// Percentiles deduplicated and ordered widest first
    pub fn percentiles_widest_first(&self) -> Vec<u8> {
        let unique: BTreeSet<u8> = self.percentiles.iter().copied().collect();
        unique.into_iter().rev().collect()
    }
}
