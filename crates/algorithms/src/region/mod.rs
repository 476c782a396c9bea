//! Region extraction
//!
//! - **extract**: crop a raster to a latitude/longitude bounding box
//! - **mask**: crop to a polygon's bounding box and zero pixels outside it

mod extract;
mod mask;

pub use extract::extract_region;
pub use mask::extract_polygon;
pub use rastergeo_core::RegionBounds;
