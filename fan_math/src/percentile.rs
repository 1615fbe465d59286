//! Empirical percentiles
//!
//! Percentiles are computed with linear interpolation between order
//! statistics: the sample is sorted and the value at fractional rank
//! `q / 100 * (len - 1)` is interpolated from its two neighbours.

use crate::{MathError, Result};

/// Return a sorted copy of `values`.
///
/// Fails if any value is NaN, since NaN has no position in the order.
pub fn sorted_copy(values: &[f64]) -> Result<Vec<f64>> {
    if values.iter().any(|v| v.is_nan()) {
        return Err(MathError::InvalidInput(
            "Cannot order a sample containing NaN".to_string(),
        ));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(sorted)
}

/// Percentile `q` (0..=100) of an already sorted, non-empty sample.
pub fn empirical_percentile_sorted(sorted: &[f64], q: f64) -> Result<f64> {
    if sorted.is_empty() {
        return Err(MathError::InsufficientData(
            "Percentile of an empty sample is undefined".to_string(),
        ));
    }
    if !(0.0..=100.0).contains(&q) {
        return Err(MathError::InvalidInput(format!(
            "Percentile must be within [0, 100], got {}",
            q
        )));
    }

    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;

    if lower == upper {
        return Ok(sorted[lower]);
    }

    let fraction = rank - lower as f64;
    Ok(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Percentile `q` (0..=100) of an unsorted sample.
pub fn empirical_percentile(values: &[f64], q: f64) -> Result<f64> {
    let sorted = sorted_copy(values)?;
    empirical_percentile_sorted(&sorted, q)
}
