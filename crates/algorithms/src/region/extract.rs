//! Bounding-box extraction

use ndarray::s;
use rastergeo_core::raster::{Raster, RasterElement, RegionBounds};
use rastergeo_core::{Error, Result};
use tracing::debug;

/// Extract the pixels covering a latitude/longitude bounding box.
///
/// The upper-left corner `(max_lat, min_lon)` selects the first row and
/// column; the lower-right corner `(min_lat, max_lon)` selects the exclusive
/// end, rounded up to the next pixel boundary so the result always covers the
/// requested box. Slices are taken at pixel boundaries and the output is
/// re-georeferenced to the upper-left edge of its first pixel.
///
/// Boxes reaching past the raster footprint are clipped to it; a box fully
/// outside yields an empty raster rather than an error.
///
/// # Errors
/// NaN bounds, `min_lat > max_lat` / `min_lon > max_lon`, or an invalid
/// georeference on `raster`.
pub fn extract_region<T: RasterElement>(
    raster: &Raster<T>,
    bounds: &RegionBounds,
) -> Result<Raster<T>> {
    raster.georef().validate()?;
    validate_bounds(bounds)?;

    let (rows, cols) = raster.shape();
    let georef = raster.georef();

    let (top, left) = georef.coord_to_fractional_index(bounds.max_lat, bounds.min_lon);
    let (bottom, right) = georef.coord_to_fractional_index(bounds.min_lat, bounds.max_lon);

    let start_row = clamp_index(top.floor(), rows);
    let start_col = clamp_index(left.floor(), cols);
    let end_row = clamp_index(bottom.ceil(), rows).max(start_row);
    let end_col = clamp_index(right.ceil(), cols).max(start_col);

    debug!(
        start_row,
        end_row,
        start_col,
        end_col,
        "extracting region from {}x{} raster",
        rows,
        cols
    );

    let data = raster
        .data()
        .slice(s![start_row..end_row, start_col..end_col])
        .to_owned();

    Ok(Raster::new(
        data,
        georef.shifted(start_row as isize, start_col as isize),
    ))
}

fn validate_bounds(bounds: &RegionBounds) -> Result<()> {
    if bounds.has_nan() {
        return Err(Error::NotANumber(format!("region bounds {:?}", bounds)));
    }
    if bounds.min_lat > bounds.max_lat {
        return Err(Error::InvalidParameter {
            name: "min_lat",
            value: bounds.min_lat.to_string(),
            reason: format!("must not exceed max_lat ({})", bounds.max_lat),
        });
    }
    if bounds.min_lon > bounds.max_lon {
        return Err(Error::InvalidParameter {
            name: "min_lon",
            value: bounds.min_lon.to_string(),
            reason: format!("must not exceed max_lon ({})", bounds.max_lon),
        });
    }
    Ok(())
}

/// Clamp a whole-number index into `0..=upper`
fn clamp_index(index: f64, upper: usize) -> usize {
    if index <= 0.0 {
        0
    } else if index >= upper as f64 {
        upper
    } else {
        index as usize
    }
}
