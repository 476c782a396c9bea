//! Main Raster type

use crate::error::{Error, Result};
use crate::raster::{GeoReference, RasterElement, RegionBounds};
use ndarray::{Array2, ArrayView2};

/// A georeferenced 2D raster grid.
///
/// `Raster<T>` stores values of type `T` in a row-major grid together with
/// the [`GeoReference`] that places it on the globe. A raster is immutable:
/// operations produce new rasters rather than editing cells in place.
///
/// # Example
///
/// ```ignore
/// use rastergeo_core::{GeoReference, Raster};
///
/// let georef = GeoReference::new(0.0, 1.0, 10.0, -1.0);
/// let raster = Raster::from_vec(vec![1.0; 9], 3, 3, georef)?;
///
/// let value = raster.value_at(8.5, 1.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Raster<T: RasterElement> {
    /// Raster data stored in row-major order (row, col)
    data: Array2<T>,
    georef: GeoReference,
}

impl<T: RasterElement> Raster<T> {
    /// Wrap an existing array with its georeference
    pub fn new(data: Array2<T>, georef: GeoReference) -> Self {
        Self { data, georef }
    }

    /// Create a raster filled with zeros
    pub fn zeros(rows: usize, cols: usize, georef: GeoReference) -> Self {
        Self::new(Array2::zeros((rows, cols)), georef)
    }

    /// Create a raster filled with a specific value
    pub fn filled(rows: usize, cols: usize, value: T, georef: GeoReference) -> Self {
        Self::new(Array2::from_elem((rows, cols), value), georef)
    }

    /// Create a raster from row-major values
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize, georef: GeoReference) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::InvalidDimensions {
                rows,
                cols,
                len: data.len(),
            });
        }

        let array = Array2::from_shape_vec((rows, cols), data)?;
        Ok(Self::new(array, georef))
    }

    /// Create a raster with the same georeference but new data
    pub fn with_data<U: RasterElement>(&self, data: Array2<U>) -> Raster<U> {
        Raster::new(data, self.georef)
    }

    /// Apply `f` to every cell, keeping the georeference
    pub fn map<U: RasterElement, F>(&self, f: F) -> Raster<U>
    where
        F: Fn(T) -> U,
    {
        self.with_data(self.data.mapv(f))
    }

    // Dimensions

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the raster is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // Data access

    /// Get value at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.data
            .get((row, col))
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            })
    }

    /// Get value at (row, col) without bounds checking
    ///
    /// # Safety
    /// Caller must ensure row < self.rows() and col < self.cols()
    pub unsafe fn get_unchecked(&self, row: usize, col: usize) -> T {
        unsafe { *self.data.uget((row, col)) }
    }

    /// Value of the pixel covering `(lat, lon)`.
    ///
    /// `None` outside the footprint, and whenever the coordinate or the
    /// georeference gives no finite pixel position.
    pub fn value_at(&self, lat: f64, lon: f64) -> Option<T> {
        let (row, col) = self.georef.coord_to_fractional_index(lat, lon);
        if !row.is_finite() || !col.is_finite() {
            return None;
        }
        let (row, col) = (row.floor(), col.floor());
        if row < 0.0 || col < 0.0 {
            return None;
        }
        self.data.get((row as usize, col as usize)).copied()
    }

    /// Get a view of the underlying data
    pub fn view(&self) -> ArrayView2<'_, T> {
        self.data.view()
    }

    /// Get a reference to the underlying array
    pub fn data(&self) -> &Array2<T> {
        &self.data
    }

    /// Consume the raster and return the underlying array
    pub fn into_array(self) -> Array2<T> {
        self.data
    }

    // Georeference

    pub fn georef(&self) -> &GeoReference {
        &self.georef
    }

    pub fn coord_to_index(&self, lat: f64, lon: f64) -> (isize, isize) {
        self.georef.coord_to_index(lat, lon)
    }

    pub fn index_to_centroid(&self, row: isize, col: isize) -> (f64, f64) {
        self.georef.index_to_centroid(row, col)
    }

    pub fn index_to_edge(&self, row: isize, col: isize) -> (f64, f64) {
        self.georef.index_to_edge(row, col)
    }

    /// Southern edge of the raster
    pub fn lat_min(&self) -> f64 {
        self.georef.lat_min(self.rows())
    }

    /// Eastern edge of the raster
    pub fn lon_max(&self) -> f64 {
        self.georef.lon_max(self.cols())
    }

    /// Geographic footprint of the raster
    pub fn bounds(&self) -> RegionBounds {
        self.georef.bounds(self.rows(), self.cols())
    }

    /// Centroid latitudes and longitudes of every pixel, as two grids
    pub fn pixel_centroids(&self) -> (Array2<f64>, Array2<f64>) {
        let georef = self.georef;
        let lats = Array2::from_shape_fn(self.shape(), |(row, col)| {
            georef.index_to_centroid(row as isize, col as isize).0
        });
        let lons = Array2::from_shape_fn(self.shape(), |(row, col)| {
            georef.index_to_centroid(row as isize, col as isize).1
        });
        (lats, lons)
    }

    /// Whether any cell holds NaN
    pub fn has_nan(&self) -> bool {
        T::is_float() && self.data.iter().any(|v| v.is_nan_value())
    }

    /// Fail unless `other` has the same dimensions as `self`
    pub fn check_same_shape<U: RasterElement>(&self, other: &Raster<U>) -> Result<()> {
        let (er, ec) = self.shape();
        let (ar, ac) = other.shape();
        if er != ar || ec != ac {
            return Err(Error::SizeMismatch { er, ec, ar, ac });
        }
        Ok(())
    }

    // Statistics

    /// Calculate basic statistics (min, max, mean, sum) over non-NaN cells
    pub fn statistics(&self) -> RasterStatistics<T> {
        let mut min: Option<T> = None;
        let mut max: Option<T> = None;
        let mut sum: f64 = 0.0;
        let mut count: usize = 0;

        for &value in self.data.iter() {
            if value.is_nan_value() {
                continue;
            }

            if min.map_or(true, |m| value < m) {
                min = Some(value);
            }
            if max.map_or(true, |m| value > m) {
                max = Some(value);
            }

            if let Some(v) = value.to_f64() {
                sum += v;
                count += 1;
            }
        }

        let mean = if count > 0 {
            Some(sum / count as f64)
        } else {
            None
        };

        RasterStatistics {
            min,
            max,
            mean,
            sum,
            valid_count: count,
            nan_count: self.len() - count,
        }
    }
}

/// Basic statistics for a raster
#[derive(Debug, Clone)]
pub struct RasterStatistics<T> {
    pub min: Option<T>,
    pub max: Option<T>,
    pub mean: Option<f64>,
    pub sum: f64,
    pub valid_count: usize,
    pub nan_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scenario() -> Raster<f64> {
        let mut values = vec![1.0; 9];
        values[4] = 5.0;
        Raster::from_vec(values, 3, 3, GeoReference::new(0.0, 1.0, 10.0, -1.0)).unwrap()
    }

    #[test]
    fn test_raster_creation() {
        let raster: Raster<f32> = Raster::zeros(100, 200, GeoReference::default());
        assert_eq!(raster.rows(), 100);
        assert_eq!(raster.cols(), 200);
        assert_eq!(raster.shape(), (100, 200));
    }

    #[test]
    fn test_from_vec_wrong_length() {
        let result = Raster::from_vec(vec![1.0_f64; 5], 2, 3, GeoReference::default());
        assert!(matches!(
            result,
            Err(Error::InvalidDimensions { rows: 2, cols: 3, len: 5 })
        ));
    }

    #[test]
    fn test_get_out_of_bounds() {
        let raster = scenario();
        assert_eq!(raster.get(1, 1).unwrap(), 5.0);
        assert!(matches!(raster.get(3, 0), Err(Error::IndexOutOfBounds { .. })));
    }

    #[test]
    fn test_value_at() {
        let raster = scenario();
        assert_eq!(raster.value_at(8.5, 1.5), Some(5.0));
        assert_eq!(raster.value_at(9.9, 0.1), Some(1.0));
        assert_eq!(raster.value_at(11.0, 1.0), None);
        assert_eq!(raster.value_at(8.5, 3.5), None);
        assert_eq!(raster.value_at(f64::NAN, 1.0), None);
    }

    #[test]
    fn test_value_at_invalid_georef() {
        let raster = Raster::from_vec(vec![7, 1, 1, 1], 2, 2, GeoReference::new(f64::NAN, 1.0, 10.0, -1.0)).unwrap();
        assert_eq!(raster.value_at(9.5, 120.0), None);
        assert_eq!(raster.value_at(8.5, -170.0), None);

        // Zero pixel height: the origin row divides 0 by 0
        let flat = Raster::from_vec(vec![7, 1, 1, 1], 2, 2, GeoReference::new(0.0, 1.0, 10.0, 0.0)).unwrap();
        assert_eq!(flat.value_at(10.0, 0.5), None);
    }

    #[test]
    fn test_extent() {
        let raster = scenario();
        assert_relative_eq!(raster.lat_min(), 7.0, epsilon = 1e-12);
        assert_relative_eq!(raster.lon_max(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pixel_centroids() {
        let raster = scenario();
        let (lats, lons) = raster.pixel_centroids();
        assert_relative_eq!(lats[(0, 0)], 9.5, epsilon = 1e-12);
        assert_relative_eq!(lats[(2, 1)], 7.5, epsilon = 1e-12);
        assert_relative_eq!(lons[(2, 1)], 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_map_keeps_georef() {
        let raster = scenario();
        let doubled = raster.map(|v| v * 2.0);
        assert_eq!(doubled.georef(), raster.georef());
        assert_eq!(doubled.get(1, 1).unwrap(), 10.0);
    }

    #[test]
    fn test_check_same_shape() {
        let raster = scenario();
        let labels: Raster<usize> = Raster::zeros(2, 3, GeoReference::default());
        assert!(matches!(
            raster.check_same_shape(&labels),
            Err(Error::SizeMismatch { er: 3, ec: 3, ar: 2, ac: 3 })
        ));
    }

    #[test]
    fn test_raster_statistics() {
        let raster = scenario();
        let stats = raster.statistics();
        assert_eq!(stats.min, Some(1.0));
        assert_eq!(stats.max, Some(5.0));
        assert_relative_eq!(stats.sum, 13.0);
        assert_eq!(stats.valid_count, 9);
        assert_eq!(stats.nan_count, 0);
    }
}
