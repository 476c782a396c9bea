//! Categorization
//!
//! - **digitize**: continuous values to ordinal categories via threshold bins
//! - **buffer**: new category as a disk-shaped ring around an existing one
//! - **hierarchy**: ordered category levels and re-leveling
//! - **filter**: percentile filtering and negative clipping of raw values

mod buffer;
mod digitize;
mod element;
mod filter;
mod hierarchy;

pub use buffer::{add_categorical_buffer, BufferParams, CategoricalBuffer};
pub use digitize::{category_counts, digitize, Digitize, DigitizeParams};
pub use element::DiskElement;
pub use filter::{clip_negative, filter_low_values, FilterLowValues, FilterParams};
pub use hierarchy::CategoryHierarchy;
