use rasters_core::BBox;
use serde::Serialize;

/// Output for info command
#[derive(Debug, Serialize)]
pub struct InfoOutput {
    pub wkt: String,
    pub kind: String,
    pub crs: String,
    pub geographic: bool,
    pub bbox: Option<BBox>,
    pub local_utm: Option<String>,
}

/// Output for reproject command
#[derive(Debug, Serialize)]
pub struct ReprojectOutput {
    pub wkt: String,
    pub crs: String,
    pub geographic: bool,
}

/// Output for distances command
#[derive(Debug, Serialize)]
pub struct DistancesOutput {
    pub origin_crs: String,
    pub rows: Vec<DistanceRow>,
}

#[derive(Debug, Serialize)]
pub struct DistanceRow {
    pub distance: f64,
    pub geometry: String,
}

/// Output for export command
#[derive(Debug, Serialize)]
pub struct ExportOutput {
    pub path: String,
    pub crs: String,
}

/// Output for config command
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub values: Vec<ConfigEntry>,
}

#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
    pub source: String,
}
