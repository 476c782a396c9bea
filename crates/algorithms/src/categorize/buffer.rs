//! Categorical buffer
//!
//! Adds a new category as a ring of fixed pixel radius around an existing
//! category, optionally inserting it at a chosen level of the category
//! hierarchy.

use ndarray::{s, Array2};
use rastergeo_core::raster::Raster;
use rastergeo_core::{Algorithm, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::element::DiskElement;
use super::hierarchy::CategoryHierarchy;
use crate::maybe_rayon::*;

/// Parameters for a categorical buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferParams {
    /// Category the buffer grows around
    pub around: u32,
    /// Buffer width in pixels (Euclidean)
    pub radius: usize,
    /// Level the new category takes in the hierarchy; `None` appends it on top
    #[serde(default)]
    pub level: Option<usize>,
}

impl Default for BufferParams {
    fn default() -> Self {
        Self {
            around: 1,
            radius: 1,
            level: None,
        }
    }
}

/// Categorical buffer algorithm
#[derive(Debug, Clone, Default)]
pub struct CategoricalBuffer;

impl Algorithm for CategoricalBuffer {
    type Input = Raster<u32>;
    type Output = Raster<u32>;
    type Params = BufferParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "CategoricalBuffer"
    }

    fn description(&self) -> &'static str {
        "Add a buffer category around an existing category with a disk structuring element"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        add_categorical_buffer(&input, &params)
    }
}

/// Grow a new category around `params.around`.
///
/// The new category id is `max category + 1`. A cell takes it when it lies
/// within `params.radius` pixels (Euclidean) of a cell of `params.around`,
/// except cells holding 0 (background) or `params.around` itself, which keep
/// their value. Any other category inside the radius is overwritten.
///
/// The grid is padded with `radius` cells of 0 on every side and dilated in a
/// single pass: each cell checks its disk neighbourhood for `around`, which is
/// the same as stamping the disk around every `around` cell because the disk
/// is symmetric. Only the original extent is produced, so nothing needs to be
/// cut back afterwards.
///
/// With `params.level = Some(n)` categories at level `n` and above move up one
/// level and the buffer becomes level `n`.
///
/// The output keeps the georeference of `grid`.
///
/// # Errors
/// `radius == 0`, `around == 0`, or no category id left for the buffer.
///
/// # Panics
/// If `params.level` is 0 or greater than the new category id, or if the
/// structuring element reaches past the padded grid.
pub fn add_categorical_buffer(grid: &Raster<u32>, params: &BufferParams) -> Result<Raster<u32>> {
    let disk = DiskElement::new(params.radius)?;
    let around = params.around;
    if around == 0 {
        return Err(Error::InvalidParameter {
            name: "around",
            value: "0".to_string(),
            reason: "category 0 is reserved for background".to_string(),
        });
    }

    let max_category = grid.data().iter().copied().max().unwrap_or(0);
    let buffer_id = max_category.checked_add(1).ok_or_else(|| Error::InvalidParameter {
        name: "grid",
        value: max_category.to_string(),
        reason: "no category id left for the buffer".to_string(),
    })?;

    let (rows, cols) = grid.shape();
    let radius = disk.radius();
    let padded = pad(grid.data(), radius);
    let offsets = disk.offsets();

    debug!(
        around,
        radius,
        buffer_id,
        "buffering {}x{} category grid with {}-cell disk",
        rows,
        cols,
        offsets.len()
    );

    let data: Vec<u32> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            (0..cols)
                .map(|col| {
                    let current = unsafe { grid.get_unchecked(row, col) };
                    if current == 0 || current == around {
                        return current;
                    }
                    let near = offsets.iter().any(|&(dr, dc)| {
                        padded_value(&padded, row + radius, col + radius, dr, dc) == around
                    });
                    if near {
                        buffer_id
                    } else {
                        current
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect();

    let buffered = grid.with_data(Array2::from_shape_vec((rows, cols), data)?);

    match params.level {
        Some(level) => {
            let mut hierarchy = CategoryHierarchy::from_max(max_category);
            hierarchy.push(buffer_id);
            hierarchy.insert_at(level, buffer_id);
            Ok(hierarchy.relabel(&buffered))
        }
        None => Ok(buffered),
    }
}

/// Surround `data` with `width` cells of category 0 on every side
fn pad(data: &Array2<u32>, width: usize) -> Array2<u32> {
    let (rows, cols) = data.dim();
    let mut padded = Array2::zeros((rows + 2 * width, cols + 2 * width));
    padded
        .slice_mut(s![width..width + rows, width..width + cols])
        .assign(data);
    padded
}

fn padded_value(padded: &Array2<u32>, row: usize, col: usize, dr: isize, dc: isize) -> u32 {
    let r = row.checked_add_signed(dr);
    let c = col.checked_add_signed(dc);
    match (r, c) {
        (Some(r), Some(c)) if r < padded.nrows() && c < padded.ncols() => padded[(r, c)],
        _ => panic!(
            "structuring element offset ({}, {}) overran padded grid of size {:?} at ({}, {})",
            dr,
            dc,
            padded.dim(),
            row,
            col
        ),
    }
}
