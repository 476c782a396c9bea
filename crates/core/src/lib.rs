//! # rastergeo core
//!
//! Core types for the rastergeo raster engine.
//!
//! This crate provides:
//! - `Raster<T>`: immutable georeferenced grid
//! - `GeoReference`: pixel index <-> latitude/longitude mapping
//! - `LocationSet`: ordered named coordinates
//! - Algorithm trait for consistent API

pub mod error;
pub mod location;
pub mod raster;

pub use error::{Error, Result};
pub use location::{Location, LocationSet};
pub use raster::{GeoReference, Raster, RasterElement, RegionBounds};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::location::{Location, LocationSet};
    pub use crate::raster::{GeoReference, Raster, RasterElement, RegionBounds};
    pub use crate::Algorithm;
}

/// Core trait for all algorithms in rastergeo.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(&self, input: Self::Input, params: Self::Params) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
