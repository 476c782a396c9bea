//! rastergeo CLI - population raster analysis for market catchments

mod job;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use job::Job;
use rastergeo_algorithms::distance::nearest_location;

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "rastergeo")]
#[command(author, version, about = "Population raster analysis for market catchments", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about the raster of a job file
    Info {
        /// Job file (JSON)
        job: PathBuf,
    },
    /// Run the pipeline of a job file and emit a JSON report
    Run {
        /// Job file (JSON)
        job: PathBuf,
        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print the report
        #[arg(long)]
        pretty: bool,
    },
    /// Find the job location nearest to a coordinate
    Nearest {
        /// Job file (JSON)
        job: PathBuf,
        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn read_job(path: &Path) -> Result<Job> {
    let pb = spinner("Reading job...");
    let job = Job::from_path(path)?;
    pb.finish_and_clear();
    info!(
        "Input: {} x {}, {} locations",
        job.raster.cols,
        job.raster.rows,
        job.locations.len()
    );
    Ok(job)
}

fn write_report(report: &job::Report, output: Option<&Path>, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    }
    .context("Failed to serialize report")?;

    match output {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("Failed to write report to {}", path.display())),
        None => {
            println!("{}", text);
            Ok(())
        }
    }
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Info { job } => {
            let parsed = read_job(&job)?;
            let raster = parsed.raster.to_raster()?;
            let (rows, cols) = raster.shape();
            let bounds = raster.bounds();
            let georef = raster.georef();
            let stats = raster.statistics();

            println!("File: {}", job.display());
            println!("Dimensions: {} x {} ({} cells)", cols, rows, raster.len());
            println!(
                "Pixel size: {} lon x {} lat",
                georef.lon_pixel_size, georef.lat_pixel_size
            );
            println!(
                "Bounds: lat {:.6} .. {:.6}, lon {:.6} .. {:.6}",
                bounds.min_lat, bounds.max_lat, bounds.min_lon, bounds.max_lon
            );
            println!("Locations: {}", parsed.locations.len());
            println!("\nStatistics:");
            if let Some(min) = stats.min {
                println!("  Min: {:.4}", min);
            }
            if let Some(max) = stats.max {
                println!("  Max: {:.4}", max);
            }
            if let Some(mean) = stats.mean {
                println!("  Mean: {:.4}", mean);
            }
            println!("  Sum: {:.4}", stats.sum);
            println!(
                "  Valid cells: {} ({:.1}%)",
                stats.valid_count,
                100.0 * stats.valid_count as f64 / raster.len().max(1) as f64
            );
        }

        Commands::Run { job, output, pretty } => {
            let parsed = read_job(&job)?;
            let start = Instant::now();
            let pb = spinner("Running pipeline...");
            let report = job::run(&parsed)?;
            pb.finish_and_clear();
            info!("Pipeline finished in {:.2?}", start.elapsed());
            write_report(&report, output.as_deref(), pretty)?;
            if let Some(path) = output {
                println!("Report saved to: {}", path.display());
            }
        }

        Commands::Nearest { job, lat, lon } => {
            let parsed = read_job(&job)?;
            match nearest_location(lat, lon, &parsed.locations)? {
                Some(found) => {
                    let location = parsed
                        .locations
                        .get(found.index)
                        .context("Nearest index outside the location set")?;
                    println!(
                        "{} ({:.6}, {:.6}) at {:.3} km",
                        location.name, location.lat, location.lon, found.distance_km
                    );
                }
                None => println!("Job has no locations"),
            }
        }
    }

    Ok(())
}
