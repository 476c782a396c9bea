//! Sampling grid values at point locations

use rastergeo_core::raster::{Raster, RasterElement};
use rastergeo_core::{LocationSet, Result};

/// Value of the pixel under each location, in location order.
///
/// Locations outside the raster footprint get `T::zero()`, the "not in
/// region" value. Used to attach an urbanicity class to every market.
///
/// # Errors
/// `Error::NotANumber` if any location has NaN coordinates, or any error of
/// [`GeoReference::validate`](rastergeo_core::GeoReference::validate) for the
/// grid's georeference.
pub fn sample_at_locations<T: RasterElement>(
    grid: &Raster<T>,
    locations: &LocationSet,
) -> Result<Vec<T>> {
    grid.georef().validate()?;
    locations.check_coordinates()?;
    Ok(locations
        .iter()
        .map(|l| grid.value_at(l.lat, l.lon).unwrap_or_else(T::zero))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rastergeo_core::{Error, GeoReference};

    #[test]
    fn test_sample_at_locations() {
        let grid: Raster<u32> =
            Raster::from_vec(vec![1, 2, 3, 4], 2, 2, GeoReference::new(80.0, 1.0, 22.0, -1.0)).unwrap();
        let locations: LocationSet = vec![
            ("north-west", 21.5, 80.5),
            ("south-east", 20.2, 81.9),
            ("outside", 25.0, 80.5),
        ]
        .into_iter()
        .collect();

        assert_eq!(sample_at_locations(&grid, &locations).unwrap(), vec![1, 4, 0]);
    }

    #[test]
    fn test_sample_rejects_invalid_georef() {
        let grid: Raster<u32> =
            Raster::from_vec(vec![7, 1, 1, 1], 2, 2, GeoReference::new(f64::NAN, 1.0, 10.0, -1.0)).unwrap();
        let locations: LocationSet = vec![("west", 9.5, 120.0), ("east", 8.5, -170.0)]
            .into_iter()
            .collect();
        assert!(matches!(
            sample_at_locations(&grid, &locations),
            Err(Error::NotANumber(_))
        ));
    }

    #[test]
    fn test_sample_rejects_nan() {
        let grid: Raster<u32> = Raster::zeros(2, 2, GeoReference::default());
        let locations: LocationSet = vec![("bad", f64::NAN, 0.0)].into_iter().collect();
        assert!(matches!(
            sample_at_locations(&grid, &locations),
            Err(Error::NotANumber(_))
        ));
    }
}
