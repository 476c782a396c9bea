//! Latitude/longitude georeferencing for rasters

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Affine mapping between pixel indices and latitude/longitude.
///
/// The grid is north-up and unrotated:
/// ```text
/// lat = lat_max + row * lat_pixel_size
/// lon = lon_min + col * lon_pixel_size
/// ```
///
/// `lat_pixel_size` is negative (latitude decreases as the row index grows)
/// and `lon_pixel_size` is positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoReference {
    /// Longitude of the western edge of column 0
    pub lon_min: f64,
    /// Pixel width in degrees of longitude
    pub lon_pixel_size: f64,
    /// Latitude of the northern edge of row 0
    pub lat_max: f64,
    /// Pixel height in degrees of latitude (negative)
    pub lat_pixel_size: f64,
}

/// A geographic bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl RegionBounds {
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self { min_lat, max_lat, min_lon, max_lon }
    }

    /// Whether the coordinate lies inside the box (edges included)
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }

    pub fn has_nan(&self) -> bool {
        self.min_lat.is_nan() || self.max_lat.is_nan() || self.min_lon.is_nan() || self.max_lon.is_nan()
    }
}

impl GeoReference {
    pub fn new(lon_min: f64, lon_pixel_size: f64, lat_max: f64, lat_pixel_size: f64) -> Self {
        Self {
            lon_min,
            lon_pixel_size,
            lat_max,
            lat_pixel_size,
        }
    }

    /// Create from a GDAL-style geotransform
    /// `[lon_min, lon_pixel_size, row_rotation, lat_max, col_rotation, lat_pixel_size]`.
    ///
    /// Rotation terms are ignored; lat/lon grids from population products are north-up.
    pub fn from_gdal(coeffs: [f64; 6]) -> Self {
        Self {
            lon_min: coeffs[0],
            lon_pixel_size: coeffs[1],
            lat_max: coeffs[3],
            lat_pixel_size: coeffs[5],
        }
    }

    /// Convert to a GDAL-style geotransform with zero rotation
    pub fn to_gdal(&self) -> [f64; 6] {
        [
            self.lon_min,
            self.lon_pixel_size,
            0.0,
            self.lat_max,
            0.0,
            self.lat_pixel_size,
        ]
    }

    /// Whether any of the four scalars is NaN
    pub fn has_nan(&self) -> bool {
        self.lon_min.is_nan()
            || self.lon_pixel_size.is_nan()
            || self.lat_max.is_nan()
            || self.lat_pixel_size.is_nan()
    }

    /// Fail unless the georeference can place pixels on the globe.
    ///
    /// # Errors
    /// `Error::NotANumber` if any scalar is NaN, `Error::InvalidParameter` if a
    /// pixel size is zero or infinite, or an origin is infinite.
    pub fn validate(&self) -> Result<()> {
        if self.has_nan() {
            return Err(Error::NotANumber(format!("georeference {:?}", self)));
        }
        for (name, size) in [
            ("lon_pixel_size", self.lon_pixel_size),
            ("lat_pixel_size", self.lat_pixel_size),
        ] {
            if size == 0.0 || size.is_infinite() {
                return Err(Error::InvalidParameter {
                    name,
                    value: size.to_string(),
                    reason: "pixel size must be finite and non-zero".to_string(),
                });
            }
        }
        for (name, origin) in [("lon_min", self.lon_min), ("lat_max", self.lat_max)] {
            if origin.is_infinite() {
                return Err(Error::InvalidParameter {
                    name,
                    value: origin.to_string(),
                    reason: "origin must be finite".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Row and column of the pixel covering `(lat, lon)`.
    ///
    /// The mapping is total: coordinates outside the raster footprint give
    /// negative or past-the-end indices, and bounds are the caller's concern.
    pub fn coord_to_index(&self, lat: f64, lon: f64) -> (isize, isize) {
        let (row, col) = self.coord_to_fractional_index(lat, lon);
        (row.floor() as isize, col.floor() as isize)
    }

    /// Fractional (row, col) position of a coordinate; integer part is the pixel
    pub fn coord_to_fractional_index(&self, lat: f64, lon: f64) -> (f64, f64) {
        let row = (lat - self.lat_max) / self.lat_pixel_size;
        let col = (lon - self.lon_min) / self.lon_pixel_size;
        (row, col)
    }

    /// Latitude/longitude of the centroid of pixel `(row, col)`
    pub fn index_to_centroid(&self, row: isize, col: isize) -> (f64, f64) {
        let lat = self.lat_max + (row as f64 + 0.5) * self.lat_pixel_size;
        let lon = self.lon_min + (col as f64 + 0.5) * self.lon_pixel_size;
        (lat, lon)
    }

    /// Latitude/longitude of the upper-left edge of pixel `(row, col)`
    pub fn index_to_edge(&self, row: isize, col: isize) -> (f64, f64) {
        let lat = self.lat_max + row as f64 * self.lat_pixel_size;
        let lon = self.lon_min + col as f64 * self.lon_pixel_size;
        (lat, lon)
    }

    /// Centroid of the pixel containing `(lat, lon)`
    pub fn centroid_for_coord(&self, lat: f64, lon: f64) -> (f64, f64) {
        let (row, col) = self.coord_to_index(lat, lon);
        self.index_to_centroid(row, col)
    }

    /// Southern edge of a raster with `rows` rows
    pub fn lat_min(&self, rows: usize) -> f64 {
        self.lat_max + self.lat_pixel_size * rows as f64
    }

    /// Eastern edge of a raster with `cols` columns
    pub fn lon_max(&self, cols: usize) -> f64 {
        self.lon_min + self.lon_pixel_size * cols as f64
    }

    /// Bounding box of a raster with the given dimensions
    pub fn bounds(&self, rows: usize, cols: usize) -> RegionBounds {
        let lat_a = self.lat_max;
        let lat_b = self.lat_min(rows);
        let lon_a = self.lon_min;
        let lon_b = self.lon_max(cols);
        RegionBounds {
            min_lat: lat_a.min(lat_b),
            max_lat: lat_a.max(lat_b),
            min_lon: lon_a.min(lon_b),
            max_lon: lon_a.max(lon_b),
        }
    }

    /// Re-anchor this georeference so that pixel `(row, col)` becomes the new origin
    pub fn shifted(&self, row: isize, col: isize) -> Self {
        let (lat_max, lon_min) = self.index_to_edge(row, col);
        Self {
            lon_min,
            lon_pixel_size: self.lon_pixel_size,
            lat_max,
            lat_pixel_size: self.lat_pixel_size,
        }
    }
}

impl Default for GeoReference {
    fn default() -> Self {
        Self::new(0.0, 1.0, 0.0, -1.0)
    }
}
