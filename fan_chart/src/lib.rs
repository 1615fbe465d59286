//! # Fan Chart
//!
//! Residual-based fan charts for solar power forecasts.
//!
//! ## Features
//!
//! - Reconciliation of a forecast against sparse historical proxy readings
//! - Residual computation and summary statistics
//! - Nested percentile bands from the empirical residual distribution
//! - A result record ready for a renderer, with success flag and timing
//!
//! ## Pipeline
//!
//! 1. [`reconcile::Reconciler`] builds an actual-value series as long as the
//!    forecast, preferring historical readings and synthesizing the rest.
//! 2. [`residuals::residuals`] subtracts actual from forecast.
//! 3. [`intervals::IntervalEstimator`] turns the residual distribution into
//!    one band per percentile.
//! 4. [`chart::FanChartEngine`] bundles everything into a [`FanChartResult`].
//!
//! All randomness comes from a generator passed in by the caller, so a
//! seeded generator makes the whole run reproducible.
//!
//! ## Quick Start
//!
//! ```rust
//! use fan_chart::{AuxiliaryReading, FanChartConfig, FanChartEngine};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let engine = FanChartEngine::new(FanChartConfig::new()).unwrap();
//! let history = vec![AuxiliaryReading::from_readings(&[Some(4.0), None, Some(6.0)])];
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let result = engine.generate_values(&[1.0, 2.0, 3.0], &history, &mut rng);
//! assert!(result.success);
//! assert_eq!(result.bands[0].percentile, 90);
//! assert_eq!(result.historical_records_used, 1);
//! ```

pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod intervals;
pub mod reconcile;
pub mod request;
pub mod residuals;
pub mod sample;
pub mod service;
pub mod source;

// Re-export commonly used types
pub use crate::chart::{
    generate_fan_chart, generate_fan_chart_with_seed, FanChartEngine, FanChartResult,
};
pub use crate::config::{FanChartConfig, DEFAULT_PERCENTILES};
pub use crate::data::{AuxiliaryReading, Coordinates, ForecastPoint, HistoricalRecord};
pub use crate::error::{FanChartError, Result};
pub use crate::intervals::{IntervalEstimator, PercentileBand};
pub use crate::reconcile::{Reconciler, Reconciliation};
pub use crate::request::{chart_file_name, FanChartRequest, ModelMetrics, PredictionData};
pub use crate::residuals::{residuals, ResidualSummary};
pub use crate::service::FanChartService;
pub use crate::source::{HistoricalSource, InMemoryHistory, NoHistory};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
