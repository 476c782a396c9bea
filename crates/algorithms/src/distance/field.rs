//! Per-pixel distance fields

use ndarray::{Array2, Array3, Axis, Zip};
use rastergeo_core::raster::{Raster, RasterElement};
use rastergeo_core::{Error, LocationSet, Result};
use tracing::debug;

use super::haversine_km;

/// Distance in kilometres from every pixel centroid to `(lat, lon)`.
///
/// The output has the shape and georeference of `raster`.
///
/// # Errors
/// `Error::NotANumber` if the reference coordinate holds NaN, or any error of
/// [`GeoReference::validate`](rastergeo_core::GeoReference::validate).
/// Checked before any distance is computed.
pub fn distances_to<T: RasterElement>(raster: &Raster<T>, lat: f64, lon: f64) -> Result<Raster<f64>> {
    raster.georef().validate()?;
    if lat.is_nan() || lon.is_nan() {
        return Err(Error::NotANumber(format!("reference coordinate ({}, {})", lat, lon)));
    }

    let (lats, lons) = raster.pixel_centroids();
    Ok(raster.with_data(distance_grid(&lats, &lons, lat, lon)))
}

/// Distances from every pixel centroid to every location, indexed
/// `[location, row, col]`.
///
/// Slice `k` equals `distances_to(raster, locations[k])`.
///
/// # Errors
/// `Error::NotANumber` if any location or the georeference holds NaN.
pub fn distances_to_many<T: RasterElement>(
    raster: &Raster<T>,
    locations: &LocationSet,
) -> Result<Array3<f64>> {
    raster.georef().validate()?;
    locations.check_coordinates()?;

    let (rows, cols) = raster.shape();
    debug!(
        "computing {} distance fields over {}x{} raster",
        locations.len(),
        rows,
        cols
    );

    let (lats, lons) = raster.pixel_centroids();
    let mut distances = Array3::zeros((locations.len(), rows, cols));
    for (mut field, location) in distances.axis_iter_mut(Axis(0)).zip(locations) {
        field.assign(&distance_grid(&lats, &lons, location.lat, location.lon));
    }

    Ok(distances)
}

fn distance_grid(lats: &Array2<f64>, lons: &Array2<f64>, lat: f64, lon: f64) -> Array2<f64> {
    let mut out = Array2::zeros(lats.dim());
    Zip::from(&mut out)
        .and(lats)
        .and(lons)
        .for_each(|d, &plat, &plon| *d = haversine_km(plat, plon, lat, lon));
    out
}
