//! Polygon masking
//!
//! Crops a raster to the bounding box of a boundary polygon and zeroes the
//! pixels whose centroid lies outside the boundary. The output keeps the
//! rectangular bounding-box shape.

use geo::{BoundingRect, Contains, MultiPolygon, Point};
use ndarray::Array2;
use rastergeo_core::raster::{Raster, RasterElement, RegionBounds};
use rastergeo_core::{Error, Result};
use tracing::debug;

use super::extract_region;
use crate::maybe_rayon::*;

/// Extract the bounding box of `boundary` and zero every pixel outside it.
///
/// Coordinates are `x = longitude`, `y = latitude`. A pixel is kept when its
/// centroid lies strictly inside the boundary (points on the boundary line
/// count as outside).
///
/// # Arguments
/// * `raster` - Input raster
/// * `boundary` - Polygon or multipolygon in degrees
///
/// # Errors
/// The boundary has no extent (no coordinates) or holds NaN coordinates, or
/// the georeference of `raster` is invalid.
pub fn extract_polygon<T, G>(raster: &Raster<T>, boundary: G) -> Result<Raster<T>>
where
    T: RasterElement,
    G: Into<MultiPolygon<f64>>,
{
    raster.georef().validate()?;
    let boundary: MultiPolygon<f64> = boundary.into();
    let rect = boundary.bounding_rect().ok_or_else(|| Error::InvalidParameter {
        name: "boundary",
        value: "empty".to_string(),
        reason: "polygon has no extent".to_string(),
    })?;

    let bounds = RegionBounds::new(rect.min().y, rect.max().y, rect.min().x, rect.max().x);
    if bounds.has_nan() {
        return Err(Error::NotANumber(format!("polygon bounding box {:?}", bounds)));
    }

    let region = extract_region(raster, &bounds)?;
    let (rows, cols) = region.shape();
    let georef = *region.georef();

    let data: Vec<T> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![T::zero(); cols];
            for (col, cell) in row_data.iter_mut().enumerate() {
                let (lat, lon) = georef.index_to_centroid(row as isize, col as isize);
                if boundary.contains(&Point::new(lon, lat)) {
                    *cell = unsafe { region.get_unchecked(row, col) };
                }
            }
            row_data
        })
        .collect();

    let masked = Array2::from_shape_vec((rows, cols), data)?;
    debug!(
        "masked {}x{} region, {} pixels inside boundary",
        rows,
        cols,
        masked.iter().filter(|v| !v.is_zero()).count()
    );

    Ok(region.with_data(masked))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, Polygon};
    use rastergeo_core::GeoReference;

    fn make_raster() -> Raster<f64> {
        Raster::filled(10, 10, 1.0, GeoReference::new(0.0, 1.0, 10.0, -1.0))
    }

    fn triangle() -> Polygon<f64> {
        // Right triangle with the right angle at (lon 2, lat 2)
        polygon![
            (x: 2.0, y: 2.0),
            (x: 8.0, y: 2.0),
            (x: 2.0, y: 8.0),
            (x: 2.0, y: 2.0),
        ]
    }

    #[test]
    fn test_polygon_keeps_bbox_shape() {
        let raster = make_raster();
        let masked = extract_polygon(&raster, triangle()).unwrap();
        assert_eq!(masked.shape(), (6, 6));
        assert_eq!(masked.georef(), &GeoReference::new(2.0, 1.0, 8.0, -1.0));
    }

    #[test]
    fn test_polygon_zeroes_outside_centroids() {
        let raster = make_raster();
        let masked = extract_polygon(&raster, triangle()).unwrap();

        // Bottom-left pixel: centroid (2.5, 2.5) is inside
        assert_eq!(masked.get(5, 0).unwrap(), 1.0);
        // Top-right pixel: centroid (7.5, 7.5) is outside the hypotenuse
        assert_eq!(masked.get(0, 5).unwrap(), 0.0);
        // Pixels centred on the hypotenuse x + y = 10 count as outside
        assert_eq!(masked.get(2, 2).unwrap(), 0.0);

        let inside = masked.data().iter().filter(|&&v| v == 1.0).count();
        // Centroids strictly below the hypotenuse: 5 + 4 + 3 + 2 + 1
        assert_eq!(inside, 15);
    }

    #[test]
    fn test_polygon_outside_raster_is_empty() {
        let raster = make_raster();
        let far = polygon![
            (x: 50.0, y: 50.0),
            (x: 51.0, y: 50.0),
            (x: 51.0, y: 51.0),
            (x: 50.0, y: 50.0),
        ];
        let masked = extract_polygon(&raster, far).unwrap();
        assert!(masked.is_empty());
    }

    #[test]
    fn test_polygon_straddling_edge_is_clipped() {
        let raster = make_raster();
        // Square over lon 7..13, lat -3..3: only its north-west corner is on the raster
        let square = polygon![
            (x: 7.0, y: -3.0),
            (x: 13.0, y: -3.0),
            (x: 13.0, y: 3.0),
            (x: 7.0, y: 3.0),
            (x: 7.0, y: -3.0),
        ];
        let masked = extract_polygon(&raster, square).unwrap();

        // Rows for lat 3..0 and columns for lon 7..10
        assert_eq!(masked.shape(), (3, 3));
        assert_eq!(masked.georef(), &GeoReference::new(7.0, 1.0, 3.0, -1.0));
        let footprint = masked.bounds();
        assert_eq!(footprint.min_lat, raster.bounds().min_lat);
        assert_eq!(footprint.max_lon, raster.bounds().max_lon);
        assert!(masked.data().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_polygon_rejects_invalid_georef() {
        let raster: Raster<f64> = Raster::filled(4, 4, 1.0, GeoReference::new(0.0, 1.0, f64::NAN, -1.0));
        assert!(matches!(
            extract_polygon(&raster, triangle()),
            Err(Error::NotANumber(_))
        ));
    }

    #[test]
    fn test_empty_polygon_rejected() {
        let raster = make_raster();
        let empty: MultiPolygon<f64> = MultiPolygon::new(vec![]);
        assert!(matches!(
            extract_polygon(&raster, empty),
            Err(Error::InvalidParameter { name: "boundary", .. })
        ));
    }
}
