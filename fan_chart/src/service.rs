//! Request boundary around the fan chart engine

use crate::chart::{FanChartEngine, FanChartResult};
use crate::error::{FanChartError, Result};
use crate::request::FanChartRequest;
use crate::source::HistoricalSource;
use rand::Rng;
use tracing::{info, warn};

/// Validates requests, gathers history and runs the engine
#[derive(Debug, Clone)]
pub struct FanChartService<S> {
    engine: FanChartEngine,
    source: S,
}

impl<S: HistoricalSource> FanChartService<S> {
    pub fn new(engine: FanChartEngine, source: S) -> Self {
        Self { engine, source }
    }

    pub fn engine(&self) -> &FanChartEngine {
        &self.engine
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Produce a fan chart for `request`
    ///
    /// Invalid requests fail with `ValidationError` before any history is
    /// read. An engine run with `success == false` becomes a
    /// `ComputationError` carrying the engine's message. A failing history
    /// lookup is logged and the chart is built from the forecast alone.
    pub fn handle<R: Rng + ?Sized>(
        &self,
        request: &FanChartRequest,
        rng: &mut R,
    ) -> Result<FanChartResult> {
        request.validate()?;

        let points = request.forecast_points();
        info!(
            location = %request.location,
            predictions = points.len(),
            "Received fan chart request"
        );

        let historical = match self
            .source
            .recent_readings(&request.coordinates, points.len())
        {
            Ok(readings) => readings,
            Err(err) => {
                warn!(error = %err, "Historical lookup failed, continuing without history");
                Vec::new()
            }
        };

        let result = self
            .engine
            .generate(&points, &historical, rng)
            .with_model_accuracy(request.model_accuracy());

        if result.success {
            Ok(result)
        } else {
            Err(FanChartError::ComputationError(result.message))
        }
    }
}
