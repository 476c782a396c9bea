//! Batch job description and report
//!
//! A job bundles one raster (values plus georeference), an ordered set of
//! market locations and the pipeline steps to apply. Running it produces the
//! tables the supply-chain scripts consume: population per category, per
//! market, and the category under each market.

use anyhow::{Context, Result};
use rastergeo_algorithms::aggregate::{sample_at_locations, sum_by_label, totals_per_location};
use rastergeo_algorithms::categorize::{
    add_categorical_buffer, category_counts, clip_negative, digitize, filter_low_values,
    BufferParams, DigitizeParams,
};
use rastergeo_algorithms::distance::nearest_location_labels;
use rastergeo_algorithms::region::extract_region;
use rastergeo_core::{GeoReference, LocationSet, Raster, RegionBounds};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Raster values in row-major order with their georeference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RasterInput {
    pub georeference: GeoReference,
    pub rows: usize,
    pub cols: usize,
    pub values: Vec<f64>,
}

impl RasterInput {
    pub fn to_raster(&self) -> Result<Raster<f64>> {
        Raster::from_vec(self.values.clone(), self.rows, self.cols, self.georeference)
            .context("Invalid raster in job")
    }
}

/// Pipeline steps, applied in field order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Pipeline {
    /// Crop to a bounding box first
    pub region: Option<RegionBounds>,
    /// Clamp negative values to 0
    pub clip_negative: bool,
    /// Zero values below this percentile
    pub filter_percentile: Option<f64>,
    /// Bin edges for categorization
    pub digitize: Option<DigitizeParams>,
    /// Buffer category added after digitization
    pub buffer: Option<BufferParams>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub raster: RasterInput,
    #[serde(default)]
    pub locations: LocationSet,
    #[serde(default)]
    pub pipeline: Pipeline,
}

impl Job {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read job file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse job file {}", path.display()))
    }
}

/// Per-market row of the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationReport {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub population_served: f64,
    /// Category under the market, 0 outside the raster or without digitization
    pub category: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub rows: usize,
    pub cols: usize,
    pub bounds: RegionBounds,
    pub total: f64,
    pub category_counts: BTreeMap<u32, usize>,
    pub totals_per_category: BTreeMap<u32, f64>,
    pub locations: Vec<LocationReport>,
}

/// Run every configured step and assemble the report
pub fn run(job: &Job) -> Result<Report> {
    let mut raster = job.raster.to_raster()?;
    let pipeline = &job.pipeline;

    if let Some(bounds) = &pipeline.region {
        raster = extract_region(&raster, bounds).context("Failed to extract region")?;
        info!("Cropped to {} x {}", raster.cols(), raster.rows());
    }
    if pipeline.clip_negative {
        raster = clip_negative(&raster);
    }
    if let Some(percentile) = pipeline.filter_percentile {
        raster = filter_low_values(&raster, percentile).context("Failed to filter low values")?;
    }

    let categories = match &pipeline.digitize {
        Some(params) => {
            let mut grid = digitize(&raster, params).context("Failed to digitize")?;
            if let Some(buffer) = &pipeline.buffer {
                grid = add_categorical_buffer(&grid, buffer).context("Failed to add buffer")?;
            }
            Some(grid)
        }
        None => {
            if pipeline.buffer.is_some() {
                anyhow::bail!("A buffer step requires a digitize step");
            }
            None
        }
    };

    let (category_counts, totals_per_category, location_categories) = match &categories {
        Some(grid) => (
            category_counts(grid),
            sum_by_label(&raster, grid).context("Failed to sum by category")?,
            sample_at_locations(grid, &job.locations).context("Failed to sample categories")?,
        ),
        None => (BTreeMap::new(), BTreeMap::new(), vec![0; job.locations.len()]),
    };

    let served = if job.locations.is_empty() || raster.is_empty() {
        vec![0.0; job.locations.len()]
    } else {
        let labels = nearest_location_labels(&raster, &job.locations)
            .context("Failed to label pixels by nearest location")?;
        totals_per_location(&raster, &labels, job.locations.len())
            .context("Failed to total population per location")?
    };
    debug!("computed service totals for {} locations", served.len());

    let locations = job
        .locations
        .iter()
        .zip(served)
        .zip(location_categories)
        .map(|((location, population_served), category)| LocationReport {
            name: location.name.clone(),
            lat: location.lat,
            lon: location.lon,
            population_served,
            category,
        })
        .collect();

    Ok(Report {
        rows: raster.rows(),
        cols: raster.cols(),
        bounds: raster.bounds(),
        total: raster.statistics().sum,
        category_counts,
        totals_per_category,
        locations,
    })
}
