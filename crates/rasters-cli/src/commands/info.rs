//! Info command implementation

use super::parse_geometry;
use crate::cli::InfoArgs;
use crate::output::OutputWriter;
use crate::output_types::InfoOutput;
use anyhow::Result;
use rasters_core::config::LayeredConfig;

pub fn execute(args: InfoArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let geometry = parse_geometry(&args.wkt, config)?;

    // The UTM lookup needs a non-empty geometry and a transform to WGS 84
    let local_utm = match geometry.local_utm_crs() {
        Ok(crs) => Some(crs.to_string()),
        Err(e) => {
            tracing::warn!(error = %e, "Could not determine local UTM zone");
            None
        }
    };

    let info = InfoOutput {
        wkt: geometry.wkt(),
        kind: format!("{:?}", geometry.kind()),
        crs: geometry.crs().to_string(),
        geographic: geometry.is_geographic(),
        bbox: geometry.bbox(),
        local_utm,
    };

    if output.is_json() {
        return output.result(info);
    }

    output.section("Geometry");
    output.kv("WKT", &info.wkt);
    output.kv("Kind", &info.kind);
    output.kv("CRS", &info.crs);
    output.kv("Geographic", info.geographic);
    match &info.bbox {
        Some(b) => {
            output.kv("Bounds", format!("[{}, {}, {}, {}]", b.xmin, b.ymin, b.xmax, b.ymax));
            output.kv("Extent", format!("{} x {}", b.width(), b.height()));
        }
        None => output.kv("Bounds", "(empty)"),
    }
    output.kv("Local UTM", info.local_utm.as_deref().unwrap_or("(unknown)"));

    Ok(())
}
