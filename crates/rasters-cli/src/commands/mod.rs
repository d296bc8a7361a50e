//! Command implementations

mod config;
mod distances;
mod export;
mod info;
mod reproject;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use rasters_core::config::LayeredConfig;
use rasters_geo::VectorGeometry;

/// Execute a CLI command
pub fn execute(cli: Cli, config: &LayeredConfig) -> Result<()> {
    let output = OutputWriter::new(cli.json);

    match cli.command {
        Commands::Info(args) => info::execute(args, config, &output),
        Commands::Reproject(args) => reproject::execute(args, config, &output),
        Commands::Distances(args) => distances::execute(args, config, &output),
        Commands::Export(args) => export::execute(args, config, &output),
        Commands::Config => config::execute(config, &output),
    }
}

/// Parse WKT input under the configured default CRS
fn parse_geometry(wkt: &str, config: &LayeredConfig) -> Result<VectorGeometry> {
    VectorGeometry::from_wkt(wkt, config.default_crs.value.clone())
        .with_context(|| format!("Failed to read geometry '{}'", wkt))
}
