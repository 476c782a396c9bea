//! Nearest-location labeling

use ndarray::Array2;
use rastergeo_core::raster::{Raster, RasterElement};
use rastergeo_core::{Algorithm, Error, LocationSet, Result};
use tracing::debug;

use super::haversine_km;
use crate::maybe_rayon::*;

/// Nearest-location labeling as an [`Algorithm`]; the locations are the parameters
#[derive(Debug, Clone, Default)]
pub struct NearestLocationLabels;

impl Algorithm for NearestLocationLabels {
    type Input = Raster<f64>;
    type Output = Raster<usize>;
    type Params = LocationSet;
    type Error = Error;

    fn name(&self) -> &'static str {
        "NearestLocationLabels"
    }

    fn description(&self) -> &'static str {
        "Label every pixel with the index of its nearest location (haversine)"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        nearest_location_labels(&input, &params)
    }
}

/// Label every pixel with the index of the location nearest to its centroid.
///
/// Produces the same labels as an argmin over [`distances_to_many`] along the
/// location axis, without materialising the full distance cube. When several
/// locations are exactly equidistant from a pixel the lowest index wins; no
/// secondary criterion is applied.
///
/// [`distances_to_many`]: super::distances_to_many
///
/// # Errors
/// Empty location set, or NaN coordinates in the locations or georeference.
pub fn nearest_location_labels<T: RasterElement>(
    raster: &Raster<T>,
    locations: &LocationSet,
) -> Result<Raster<usize>> {
    raster.georef().validate()?;
    locations.check_coordinates()?;
    if locations.is_empty() {
        return Err(Error::InvalidParameter {
            name: "locations",
            value: "0".to_string(),
            reason: "at least one location is required for labeling".to_string(),
        });
    }

    let (rows, cols) = raster.shape();
    let georef = *raster.georef();
    let coords: Vec<(f64, f64)> = locations.iter().map(|l| (l.lat, l.lon)).collect();

    debug!(
        "labeling {}x{} raster against {} locations",
        rows,
        cols,
        coords.len()
    );

    let labels: Vec<usize> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            (0..cols)
                .map(|col| {
                    let (lat, lon) = georef.index_to_centroid(row as isize, col as isize);
                    argmin_distance(lat, lon, &coords).0
                })
                .collect::<Vec<_>>()
        })
        .collect();

    let labels = Array2::from_shape_vec((rows, cols), labels)?;
    Ok(raster.with_data(labels))
}

/// The closest entry of a location set to a single coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestLocation {
    /// Index into the location set
    pub index: usize,
    /// Haversine distance in kilometres
    pub distance_km: f64,
}

/// Find the location closest to `(lat, lon)`, lowest index on ties.
///
/// Returns `Ok(None)` for an empty location set.
///
/// # Errors
/// `Error::NotANumber` for a NaN query or location coordinate.
pub fn nearest_location(lat: f64, lon: f64, locations: &LocationSet) -> Result<Option<NearestLocation>> {
    if lat.is_nan() || lon.is_nan() {
        return Err(Error::NotANumber(format!("query coordinate ({}, {})", lat, lon)));
    }
    locations.check_coordinates()?;
    if locations.is_empty() {
        return Ok(None);
    }

    let coords: Vec<(f64, f64)> = locations.iter().map(|l| (l.lat, l.lon)).collect();
    let (index, distance_km) = argmin_distance(lat, lon, &coords);
    Ok(Some(NearestLocation { index, distance_km }))
}

/// Index and distance of the nearest coordinate; `coords` must be non-empty
fn argmin_distance(lat: f64, lon: f64, coords: &[(f64, f64)]) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (index, &(clat, clon)) in coords.iter().enumerate() {
        let d = haversine_km(lat, lon, clat, clon);
        // Strict comparison keeps the first of equal distances
        if d < best.1 {
            best = (index, d);
        }
    }
    best
}
