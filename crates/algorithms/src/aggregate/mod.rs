//! Aggregation by label
//!
//! - **sum**: sums of raw values per label (location or category)
//! - **sample**: grid values under a set of point locations

mod sample;
mod sum;

pub use sample::sample_at_locations;
pub use sum::{sum_by_label, totals_per_location};
