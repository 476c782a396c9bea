//! Threshold digitization of continuous values into ordinal categories

use ndarray::Array2;
use rastergeo_core::raster::{Raster, RasterElement};
use rastergeo_core::{Algorithm, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::maybe_rayon::*;

/// Parameters for digitization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DigitizeParams {
    /// Monotonically non-decreasing bin edges
    pub bin_edges: Vec<f64>,
}

impl DigitizeParams {
    pub fn new(bin_edges: Vec<f64>) -> Self {
        Self { bin_edges }
    }

    fn validate(&self) -> Result<()> {
        let edges = &self.bin_edges;
        if edges.is_empty() {
            return Err(Error::InvalidParameter {
                name: "bin_edges",
                value: "[]".to_string(),
                reason: "at least one bin edge is required".to_string(),
            });
        }
        if edges.iter().any(|e| e.is_nan()) {
            return Err(Error::InvalidParameter {
                name: "bin_edges",
                value: format!("{:?}", edges),
                reason: "bin edges must not be NaN".to_string(),
            });
        }
        if edges.windows(2).any(|w| w[0] > w[1]) {
            return Err(Error::InvalidParameter {
                name: "bin_edges",
                value: format!("{:?}", edges),
                reason: "bin edges must be non-decreasing".to_string(),
            });
        }
        Ok(())
    }
}

/// Digitization algorithm
#[derive(Debug, Clone, Default)]
pub struct Digitize;

impl Algorithm for Digitize {
    type Input = Raster<f64>;
    type Output = Raster<u32>;
    type Params = DigitizeParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Digitize"
    }

    fn description(&self) -> &'static str {
        "Map continuous values to right-closed threshold bins"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        digitize(&input, &params)
    }
}

/// Map every value to the index of the right-closed bin it falls in.
///
/// Value `v` lands in bin `i` when `bin_edges[i-1] < v <= bin_edges[i]`;
/// values at or below the first edge are bin 0 and values above the last edge
/// are bin `bin_edges.len()`. `0.0` is the "no data" sentinel and always maps
/// to bin 0, whatever the edges.
///
/// # Example
/// ```ignore
/// // Rural / urban split on population density
/// let params = DigitizeParams::new(vec![0.0, 700.0, f64::INFINITY]);
/// let categories = digitize(&population, &params)?;
/// ```
///
/// # Errors
/// Empty, NaN or decreasing edges; NaN cells.
pub fn digitize<T: RasterElement>(raster: &Raster<T>, params: &DigitizeParams) -> Result<Raster<u32>> {
    params.validate()?;
    if raster.has_nan() {
        return Err(Error::NotANumber("raster holds NaN cells; cannot digitize".to_string()));
    }

    let (rows, cols) = raster.shape();
    let edges = &params.bin_edges;

    let data: Vec<u32> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            (0..cols)
                .map(|col| {
                    let value = unsafe { raster.get_unchecked(row, col) };
                    bin_index(value.to_f64().unwrap_or(0.0), edges)
                })
                .collect::<Vec<_>>()
        })
        .collect();

    debug!("digitized {}x{} raster into {} bins", rows, cols, edges.len() + 1);

    Ok(raster.with_data(Array2::from_shape_vec((rows, cols), data)?))
}

fn bin_index(value: f64, edges: &[f64]) -> u32 {
    if value == 0.0 {
        return 0;
    }
    // Number of edges strictly below the value
    edges.partition_point(|&e| e < value) as u32
}

/// Number of cells per category
pub fn category_counts(grid: &Raster<u32>) -> BTreeMap<u32, usize> {
    let mut counts = BTreeMap::new();
    for &category in grid.data().iter() {
        *counts.entry(category).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use rastergeo_core::GeoReference;

    fn scenario() -> Raster<f64> {
        let mut values = vec![1.0; 9];
        values[4] = 5.0;
        Raster::from_vec(values, 3, 3, GeoReference::new(0.0, 1.0, 10.0, -1.0)).unwrap()
    }

    #[test]
    fn test_digitize_scenario() {
        let categories = digitize(&scenario(), &DigitizeParams::new(vec![0.0, 2.0, 10.0])).unwrap();
        for row in 0..3 {
            for col in 0..3 {
                let expected = if (row, col) == (1, 1) { 2 } else { 1 };
                assert_eq!(categories.get(row, col).unwrap(), expected);
            }
        }
        assert_eq!(categories.georef(), scenario().georef());
    }

    #[test]
    fn test_bins_are_right_closed() {
        let edges = [0.0, 700.0, f64::INFINITY];
        assert_eq!(bin_index(-3.0, &edges), 0);
        assert_eq!(bin_index(0.5, &edges), 1);
        assert_eq!(bin_index(700.0, &edges), 1);
        assert_eq!(bin_index(700.1, &edges), 2);
        assert_eq!(bin_index(f64::INFINITY, &edges), 2);
        assert_eq!(bin_index(5.0, &[1.0, 2.0]), 2);
    }

    #[test]
    fn test_zero_is_always_bin_zero() {
        assert_eq!(bin_index(0.0, &[-10.0, -5.0, 10.0]), 0);
        assert_eq!(bin_index(-0.0, &[-10.0]), 0);
    }

    #[test]
    fn test_invalid_edges_rejected() {
        let raster = scenario();
        assert!(digitize(&raster, &DigitizeParams::default()).is_err());
        assert!(digitize(&raster, &DigitizeParams::new(vec![2.0, 1.0])).is_err());
        assert!(digitize(&raster, &DigitizeParams::new(vec![f64::NAN])).is_err());
    }

    #[test]
    fn test_repeated_edges_accepted() {
        let categories = digitize(&scenario(), &DigitizeParams::new(vec![0.0, 2.0, 2.0, 10.0])).unwrap();
        assert_eq!(categories.get(0, 0).unwrap(), 1);
        // Nothing lies in the empty bin (2, 2]
        assert_eq!(categories.get(1, 1).unwrap(), 3);

        match digitize(&scenario(), &DigitizeParams::new(vec![0.0, 2.0, 1.0])) {
            Err(Error::InvalidParameter { name, reason, .. }) => {
                assert_eq!(name, "bin_edges");
                assert!(reason.contains("non-decreasing"));
            }
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_nan_cells_rejected() {
        let raster = Raster::from_vec(vec![1.0, f64::NAN], 1, 2, GeoReference::default()).unwrap();
        assert!(matches!(
            digitize(&raster, &DigitizeParams::new(vec![0.0, 1.0])),
            Err(Error::NotANumber(_))
        ));
    }

    #[test]
    fn test_category_counts() {
        let categories = digitize(&scenario(), &DigitizeParams::new(vec![0.0, 2.0, 10.0])).unwrap();
        let counts = category_counts(&categories);
        assert_eq!(counts.get(&1), Some(&8));
        assert_eq!(counts.get(&2), Some(&1));
        assert_eq!(counts.get(&0), None);
    }
}
