//! Data model shared by the fan chart pipeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// A single forecast step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    /// Position of the step in the forecast horizon
    pub index: usize,
    /// Forecast output, expected to be non-negative
    pub predicted_value: f64,
    /// Model confidence reported alongside the forecast
    pub confidence: f64,
}

impl ForecastPoint {
    pub fn new(index: usize, predicted_value: f64, confidence: f64) -> Self {
        Self {
            index,
            predicted_value,
            confidence,
        }
    }

    /// Build an indexed sequence from bare forecast values
    pub fn sequence(values: &[f64]) -> Vec<Self> {
        values
            .iter()
            .enumerate()
            .map(|(index, &value)| Self::new(index, value, 0.0))
            .collect()
    }
}

/// Irradiance proxy measurements from independent sources for one record
///
/// Null entries are missing measurements. Zero entries are treated as
/// missing too, since sources report 0 when they have nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuxiliaryReading {
    /// Global horizontal irradiance from the GSA source
    pub gsa_ghi: Option<f64>,
    /// Global horizontal irradiance from the PVGIS source
    pub pvgis_ghi: Option<f64>,
    /// Global horizontal irradiance from the BMKG source
    pub bmkg_ghi: Option<f64>,
    /// Any further sub-readings beyond the named sources
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<Option<f64>>,
}

impl AuxiliaryReading {
    pub fn new(gsa_ghi: Option<f64>, pvgis_ghi: Option<f64>, bmkg_ghi: Option<f64>) -> Self {
        Self {
            gsa_ghi,
            pvgis_ghi,
            bmkg_ghi,
            extra: Vec::new(),
        }
    }

    /// Build a reading from a positional list of nullable sub-readings
    ///
    /// The first three positions map to the named sources, the rest go to
    /// `extra`.
    pub fn from_readings(readings: &[Option<f64>]) -> Self {
        let at = |i: usize| readings.get(i).copied().flatten();
        Self {
            gsa_ghi: at(0),
            pvgis_ghi: at(1),
            bmkg_ghi: at(2),
            extra: readings.iter().skip(3).copied().collect(),
        }
    }

    /// Every sub-reading in positional order, nulls included
    pub fn readings(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        [self.gsa_ghi, self.pvgis_ghi, self.bmkg_ghi]
            .into_iter()
            .chain(self.extra.iter().copied())
    }

    /// Non-null, non-zero sub-readings
    pub fn usable_values(&self) -> Vec<f64> {
        self.readings().flatten().filter(|&v| v != 0.0).collect()
    }

    /// Arithmetic mean of the usable sub-readings, if there are any
    pub fn average(&self) -> Option<f64> {
        let values = self.usable_values();
        if values.is_empty() {
            None
        } else {
            Some(values.iter().mean())
        }
    }
}

/// Geographic position of a plant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both axes differ by strictly less than `tolerance` degrees
    pub fn is_near(&self, other: &Coordinates, tolerance: f64) -> bool {
        (self.lat - other.lat).abs() < tolerance && (self.lng - other.lng).abs() < tolerance
    }
}

/// A stored historical observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRecord {
    /// Where the observation was taken
    pub coordinates: Coordinates,
    /// When the observation was collected
    pub recorded_at: DateTime<Utc>,
    /// The proxy measurements
    pub reading: AuxiliaryReading,
}

impl HistoricalRecord {
    pub fn new(
        coordinates: Coordinates,
        recorded_at: DateTime<Utc>,
        reading: AuxiliaryReading,
    ) -> Self {
        Self {
            coordinates,
            recorded_at,
            reading,
        }
    }
}
