//! Distances command implementation

use super::parse_geometry;
use crate::cli::DistancesArgs;
use crate::output::OutputWriter;
use crate::output_types::{DistanceRow, DistancesOutput};
use anyhow::{Context, Result};
use rasters_core::config::LayeredConfig;
use tabled::Tabled;

pub fn execute(args: DistancesArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let origin = parse_geometry(&args.wkt, config)?;
    let points = args
        .points
        .iter()
        .map(|wkt| parse_geometry(wkt, config))
        .collect::<Result<Vec<_>>>()?;

    let frame = origin.distances(&points).context("Failed to compute distances")?;
    let distances = frame.f64_column("distance").unwrap_or_default();

    // Segments are in the origin's coordinates
    let rows: Vec<DistanceRow> = frame
        .geometries()
        .iter()
        .zip(distances)
        .map(|(segment, distance)| DistanceRow {
            distance,
            geometry: origin.contain(segment.clone(), None).wkt(),
        })
        .collect();

    if output.is_json() {
        return output.result(DistancesOutput { origin_crs: origin.crs().to_string(), rows });
    }

    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "#")]
        index: usize,
        #[tabled(rename = "Distance (m)")]
        distance: String,
        #[tabled(rename = "Segment")]
        geometry: String,
    }

    let table: Vec<Row> = rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| Row {
            index,
            distance: format!("{:.3}", row.distance),
            geometry: row.geometry,
        })
        .collect();

    output.table(table);
    Ok(())
}
