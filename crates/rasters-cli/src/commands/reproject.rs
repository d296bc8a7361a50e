//! Reproject command implementation

use super::parse_geometry;
use crate::cli::ReprojectArgs;
use crate::output::OutputWriter;
use crate::output_types::ReprojectOutput;
use anyhow::{Context, Result};
use rasters_core::config::LayeredConfig;

pub fn execute(args: ReprojectArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let geometry = parse_geometry(&args.wkt, config)?;

    let result = match args.to.to_lowercase().as_str() {
        "latlon" => geometry.latlon(),
        "utm" => geometry.utm(),
        "projected" => geometry.projected().map(|p| p.into_owned()),
        _ => geometry.to_crs(args.to.as_str()),
    }
    .with_context(|| format!("Failed to reproject from {} to {}", geometry.crs(), args.to))?;

    let reprojected = ReprojectOutput {
        wkt: result.wkt(),
        crs: result.crs().to_string(),
        geographic: result.is_geographic(),
    };

    if output.is_json() {
        return output.result(reprojected);
    }

    output.kv("WKT", &reprojected.wkt);
    output.kv("CRS", &reprojected.crs);
    Ok(())
}
