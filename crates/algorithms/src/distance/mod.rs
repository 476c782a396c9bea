//! Great-circle distance fields
//!
//! - **haversine**: point-to-point distance on a sphere of fixed radius
//! - **field**: per-pixel distances to one or many locations
//! - **nearest**: nearest-location labeling of a whole grid or a single point

mod field;
mod haversine;
mod nearest;

pub use field::{distances_to, distances_to_many};
pub use haversine::{haversine_km, EARTH_RADIUS_KM};
pub use nearest::{
    nearest_location, nearest_location_labels, NearestLocation, NearestLocationLabels,
};
