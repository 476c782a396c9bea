//! # rastergeo algorithms
//!
//! Spatial algorithms over lat/lon rasters.
//!
//! ## Available Algorithm Categories
//!
//! - **region**: bounding-box extraction and polygon masking
//! - **distance**: haversine distance fields and nearest-location labels
//! - **categorize**: digitization, categorical buffers, low-value filtering
//! - **aggregate**: sums by label and sampling at locations

pub mod aggregate;
pub mod categorize;
pub mod distance;
pub mod region;

mod maybe_rayon;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::aggregate::{sample_at_locations, sum_by_label, totals_per_location};
    pub use crate::categorize::{
        add_categorical_buffer, category_counts, clip_negative, digitize, filter_low_values,
        BufferParams, CategoricalBuffer, CategoryHierarchy, Digitize, DigitizeParams,
        FilterLowValues, FilterParams,
    };
    pub use crate::distance::{
        distances_to, distances_to_many, haversine_km, nearest_location,
        nearest_location_labels, NearestLocation, NearestLocationLabels, EARTH_RADIUS_KM,
    };
    pub use crate::region::{extract_polygon, extract_region};
    pub use rastergeo_core::prelude::*;
}
