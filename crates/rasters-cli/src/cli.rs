use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rasters_core::config::CliConfigOverrides;
use rasters_core::Crs;
use std::path::PathBuf;

/// Rasters - CRS-aware vector geometry
#[derive(Parser, Debug)]
#[command(name = "rasters")]
#[command(about = "CRS-aware vector geometry toolbox", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// CRS of the input geometries (e.g. EPSG:4326 or a PROJ string)
    #[arg(long, global = true, value_name = "CRS", allow_hyphen_values = true)]
    pub crs: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Configuration overrides given on the command line
    pub fn config_overrides(&self) -> Result<CliConfigOverrides> {
        let default_crs = self
            .crs
            .as_deref()
            .map(Crs::parse)
            .transpose()
            .context("Invalid --crs value")?;

        Ok(CliConfigOverrides { default_crs, ..Default::default() })
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Describe a geometry: kind, CRS, bounding box, local UTM zone
    Info(InfoArgs),

    /// Reproject a geometry into another CRS
    Reproject(ReprojectArgs),

    /// Measure distances from a geometry to a set of points
    Distances(DistancesArgs),

    /// Write a geometry to a GeoJSON file
    Export(ExportArgs),

    /// Show the effective configuration and where each value came from
    Config,
}

#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Geometry as Well-Known Text
    pub wkt: String,
}

#[derive(Parser, Debug)]
pub struct ReprojectArgs {
    /// Geometry as Well-Known Text
    pub wkt: String,

    /// Target: latlon, utm, projected, or any CRS
    #[arg(long, allow_hyphen_values = true)]
    pub to: String,
}

#[derive(Parser, Debug)]
pub struct DistancesArgs {
    /// Geometry to measure from, as Well-Known Text
    pub wkt: String,

    /// Point to measure to, as Well-Known Text (repeatable)
    #[arg(long = "point", value_name = "WKT", required = true)]
    pub points: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Geometry as Well-Known Text
    pub wkt: String,

    /// Output GeoJSON file
    #[arg(long, short)]
    pub output: PathBuf,

    /// Pretty-print the GeoJSON
    #[arg(long)]
    pub pretty: bool,
}
