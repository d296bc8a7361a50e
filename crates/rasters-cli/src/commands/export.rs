//! Export command implementation

use super::parse_geometry;
use crate::cli::ExportArgs;
use crate::output::OutputWriter;
use crate::output_types::ExportOutput;
use anyhow::{Context, Result};
use rasters_core::config::LayeredConfig;
use rasters_geo::Driver;

pub fn execute(args: ExportArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let geometry = parse_geometry(&args.wkt, config)?;
    let pretty = args.pretty || config.geojson_pretty.value;

    let written = if pretty {
        geometry.gdf().and_then(|frame| frame.to_file_with(&args.output, Driver::GeoJson, true))
    } else {
        geometry.to_geojson(&args.output)
    };
    written.with_context(|| format!("Failed to write {}", args.output.display()))?;

    if output.is_json() {
        return output.result(ExportOutput {
            path: args.output.display().to_string(),
            crs: geometry.crs().to_string(),
        });
    }

    output.success(format!("Wrote {}", args.output.display()));
    Ok(())
}
