//! Label sums
//!
//! Sums raw pixel values grouped by an integer label grid. Labels come from
//! nearest-location labeling or from a category grid.

use ndarray::Zip;
use rastergeo_core::raster::{Raster, RasterElement};
use rastergeo_core::{Error, Result};
use std::collections::BTreeMap;
use tracing::debug;

/// Sum the cells of `values` for each distinct label in `labels`.
///
/// The key set is exactly the set of labels observed in `labels`, including
/// labels whose cells sum to 0. NaN values propagate into their label's sum.
///
/// # Errors
/// `Error::SizeMismatch` if the grids differ in shape; nothing is summed.
pub fn sum_by_label<L>(values: &Raster<f64>, labels: &Raster<L>) -> Result<BTreeMap<L, f64>>
where
    L: RasterElement + Ord,
{
    values.check_same_shape(labels)?;

    let mut sums = BTreeMap::new();
    Zip::from(values.data())
        .and(labels.data())
        .for_each(|&value, &label| {
            *sums.entry(label).or_insert(0.0) += value;
        });

    debug!("summed {} cells into {} labels", values.len(), sums.len());
    Ok(sums)
}

/// Per-location totals as a dense vector indexed like the location set.
///
/// Locations that own no pixel get 0.0, which is what callers joining the
/// totals back onto their location tables need.
///
/// # Errors
/// Shape mismatch, or a label `>= location_count`.
pub fn totals_per_location(
    values: &Raster<f64>,
    labels: &Raster<usize>,
    location_count: usize,
) -> Result<Vec<f64>> {
    let sums = sum_by_label(values, labels)?;

    let mut totals = vec![0.0; location_count];
    for (label, sum) in sums {
        let slot = totals.get_mut(label).ok_or_else(|| Error::InvalidParameter {
            name: "labels",
            value: label.to_string(),
            reason: format!("label exceeds location count {}", location_count),
        })?;
        *slot = sum;
    }
    Ok(totals)
}
