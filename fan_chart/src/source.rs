//! Historical data sources
//!
//! The engine never fetches data itself. A [`HistoricalSource`] is asked
//! for readings before the engine runs and the result is handed over as a
//! plain list.

use crate::data::{AuxiliaryReading, Coordinates, HistoricalRecord};
use crate::error::Result;
use tracing::debug;

/// Maximum coordinate difference, in degrees, for a record to count as local
pub const LOCATION_TOLERANCE_DEG: f64 = 0.1;

/// Supplier of previously recorded proxy readings
pub trait HistoricalSource {
    /// Readings near `coordinates`, most recent first, at most `limit`
    fn recent_readings(
        &self,
        coordinates: &Coordinates,
        limit: usize,
    ) -> Result<Vec<AuxiliaryReading>>;
}

/// Historical records held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistory {
    records: Vec<HistoricalRecord>,
}

impl InMemoryHistory {
    pub fn new(records: Vec<HistoricalRecord>) -> Self {
        Self { records }
    }

    /// Add a record
    pub fn push(&mut self, record: HistoricalRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl HistoricalSource for InMemoryHistory {
    fn recent_readings(
        &self,
        coordinates: &Coordinates,
        limit: usize,
    ) -> Result<Vec<AuxiliaryReading>> {
        let mut nearby: Vec<&HistoricalRecord> = self
            .records
            .iter()
            .filter(|r| r.coordinates.is_near(coordinates, LOCATION_TOLERANCE_DEG))
            .collect();
        nearby.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));

        let readings: Vec<AuxiliaryReading> = nearby
            .into_iter()
            .take(limit)
            .map(|r| r.reading.clone())
            .collect();

        debug!(
            lat = coordinates.lat,
            lng = coordinates.lng,
            found = readings.len(),
            limit,
            "Looked up historical readings"
        );
        Ok(readings)
    }
}

/// A source with no history, as for a location never seen before
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHistory;

impl HistoricalSource for NoHistory {
    fn recent_readings(
        &self,
        _coordinates: &Coordinates,
        _limit: usize,
    ) -> Result<Vec<AuxiliaryReading>> {
        Ok(Vec::new())
    }
}
