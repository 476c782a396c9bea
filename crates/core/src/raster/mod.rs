//! Raster data structures and georeferencing

mod element;
mod georef;
mod grid;

pub use element::RasterElement;
pub use georef::{GeoReference, RegionBounds};
pub use grid::{Raster, RasterStatistics};
