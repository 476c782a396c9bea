//! Value filters applied before categorization

use rastergeo_core::raster::Raster;
use rastergeo_core::{Algorithm, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parameters for low-value filtering
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterParams {
    /// Percentile in `[0, 100]` below which cells are zeroed
    pub percentile: f64,
}

/// Low-value filter algorithm
#[derive(Debug, Clone, Default)]
pub struct FilterLowValues;

impl Algorithm for FilterLowValues {
    type Input = Raster<f64>;
    type Output = Raster<f64>;
    type Params = FilterParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "FilterLowValues"
    }

    fn description(&self) -> &'static str {
        "Zero every cell below a percentile of the value distribution"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        filter_low_values(&input, params.percentile)
    }
}

/// Zero every cell strictly below the given percentile of all cell values.
///
/// The percentile is taken over every cell, zeros included, with linear
/// interpolation between the two nearest ranks.
///
/// # Errors
/// Percentile outside `[0, 100]` or NaN; NaN cells.
pub fn filter_low_values(raster: &Raster<f64>, percentile: f64) -> Result<Raster<f64>> {
    if !(0.0..=100.0).contains(&percentile) {
        return Err(Error::InvalidParameter {
            name: "percentile",
            value: percentile.to_string(),
            reason: "must be between 0 and 100".to_string(),
        });
    }
    if raster.has_nan() {
        return Err(Error::NotANumber("raster holds NaN cells; cannot rank values".to_string()));
    }

    let mut sorted: Vec<f64> = raster.data().iter().copied().collect();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let Some(threshold) = interpolated_percentile(&sorted, percentile) else {
        return Ok(raster.clone());
    };
    debug!(percentile, threshold, "filtering low values");

    Ok(raster.map(|v| if v < threshold { 0.0 } else { v }))
}

/// Clamp negative values to 0.0, leaving everything else unchanged
pub fn clip_negative(raster: &Raster<f64>) -> Raster<f64> {
    raster.map(|v| if v < 0.0 { 0.0 } else { v })
}

/// Linear-interpolated percentile of already sorted values
fn interpolated_percentile(sorted: &[f64], percentile: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let rank = percentile / 100.0 * last as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}
