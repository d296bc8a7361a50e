//! Tabular geometry container with a GeoJSON file driver.
//!
//! A [`GeoFrame`] is a row-oriented table: named attribute columns of JSON
//! values, one geometry per row, and an optional CRS for the whole table.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use geo::Geometry;
use geojson::{Feature, FeatureCollection, GeoJson, JsonObject, JsonValue};
use rasters_core::{Crs, RastersError, Result, WGS84};

/// Name reported for the geometry column
pub const GEOMETRY_COLUMN: &str = "geometry";

/// Output format for [`GeoFrame::to_file`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Driver {
    #[default]
    GeoJson,
}

impl Driver {
    pub fn name(&self) -> &'static str {
        match self {
            Driver::GeoJson => "GeoJSON",
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Driver {
    type Err = RastersError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "geojson" => Ok(Driver::GeoJson),
            _ => Err(RastersError::UnsupportedDriver { driver: s.to_string() }),
        }
    }
}

/// Named attribute column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<JsonValue>,
}

impl Column {
    pub fn new<V: Into<JsonValue>>(name: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Geometry table with attribute columns and an optional CRS
#[derive(Debug, Clone, PartialEq)]
pub struct GeoFrame {
    columns: Vec<Column>,
    geometry: Vec<Geometry>,
    crs: Option<Crs>,
}

impl GeoFrame {
    /// Create a frame, checking that every column has one value per geometry
    pub fn new(columns: Vec<Column>, geometry: Vec<Geometry>, crs: Option<Crs>) -> Result<Self> {
        for (idx, column) in columns.iter().enumerate() {
            if column.name == GEOMETRY_COLUMN {
                return Err(RastersError::invalid_geometry(format!(
                    "attribute column cannot be named '{}'",
                    GEOMETRY_COLUMN
                )));
            }
            if columns[..idx].iter().any(|c| c.name == column.name) {
                return Err(RastersError::invalid_geometry(format!(
                    "duplicate column '{}'",
                    column.name
                )));
            }
            if column.values.len() != geometry.len() {
                return Err(RastersError::invalid_geometry(format!(
                    "column '{}' has {} values but there are {} geometries",
                    column.name,
                    column.values.len(),
                    geometry.len()
                )));
            }
        }

        Ok(Self { columns, geometry, crs })
    }

    /// Zero-row frame with the given attribute columns
    pub fn empty(column_names: &[&str], crs: Option<Crs>) -> Self {
        Self {
            columns: column_names
                .iter()
                .map(|name| Column { name: name.to_string(), values: Vec::new() })
                .collect(),
            geometry: Vec::new(),
            crs,
        }
    }

    pub fn len(&self) -> usize {
        self.geometry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty()
    }

    pub fn crs(&self) -> Option<&Crs> {
        self.crs.as_ref()
    }

    /// Attribute column names in insertion order, followed by `geometry`
    pub fn column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(|c| c.name.as_str())
            .chain(std::iter::once(GEOMETRY_COLUMN))
            .collect()
    }

    pub fn column(&self, name: &str) -> Option<&[JsonValue]> {
        self.columns.iter().find(|c| c.name == name).map(|c| c.values.as_slice())
    }

    /// Column values as floats; non-numeric cells become NaN
    pub fn f64_column(&self, name: &str) -> Option<Vec<f64>> {
        self.column(name)
            .map(|values| values.iter().map(|v| v.as_f64().unwrap_or(f64::NAN)).collect())
    }

    pub fn geometries(&self) -> &[Geometry] {
        &self.geometry
    }

    /// Convert to a GeoJSON FeatureCollection, one feature per row
    pub fn to_feature_collection(&self) -> FeatureCollection {
        let features = self
            .geometry
            .iter()
            .enumerate()
            .map(|(row, geometry)| {
                let properties: JsonObject = self
                    .columns
                    .iter()
                    .map(|c| (c.name.clone(), c.values[row].clone()))
                    .collect();

                Feature {
                    bbox: None,
                    geometry: Some(geojson::Geometry::new(geojson::Value::from(geometry))),
                    id: None,
                    properties: Some(properties),
                    foreign_members: None,
                }
            })
            .collect();

        let foreign_members = self.crs.as_ref().and_then(crs_member).map(|member| {
            let mut members = JsonObject::new();
            members.insert("crs".to_string(), member);
            members
        });

        FeatureCollection { bbox: None, features, foreign_members }
    }

    /// Serialize as GeoJSON text
    pub fn to_geojson_string(&self, pretty: bool) -> Result<String> {
        let collection = self.to_feature_collection();
        let text = if pretty {
            serde_json::to_string_pretty(&collection)
        } else {
            serde_json::to_string(&collection)
        };
        text.map_err(|e| RastersError::Serialization(format!("Failed to serialize GeoJSON: {}", e)))
    }

    /// Write the frame to `path`, replacing any existing file
    pub fn to_file(&self, path: impl AsRef<Path>, driver: Driver) -> Result<()> {
        self.to_file_with(path, driver, false)
    }

    /// Write the frame to `path`, optionally pretty-printed
    pub fn to_file_with(&self, path: impl AsRef<Path>, driver: Driver, pretty: bool) -> Result<()> {
        let path = path.as_ref();
        let content = match driver {
            Driver::GeoJson => self.to_geojson_string(pretty)?,
        };

        fs::write(path, content)?;

        tracing::info!(path = %path.display(), rows = self.len(), driver = %driver, "Wrote geometry table");
        Ok(())
    }

    /// Read a GeoJSON file into a frame
    pub fn read_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_geojson_str(&content)
    }

    /// Parse GeoJSON text (FeatureCollection, Feature, or bare Geometry)
    pub fn from_geojson_str(content: &str) -> Result<Self> {
        let geojson: GeoJson = content
            .parse()
            .map_err(|e| RastersError::Serialization(format!("Failed to parse GeoJSON: {}", e)))?;

        match geojson {
            GeoJson::FeatureCollection(fc) => {
                // WGS84 only when no crs member is given
                let crs = match fc.foreign_members.as_ref().and_then(|fm| fm.get("crs")) {
                    Some(member) => extract_crs(member)?,
                    None => WGS84,
                };
                Self::from_features(fc.features, crs)
            }
            GeoJson::Feature(feature) => Self::from_features(vec![feature], WGS84),
            GeoJson::Geometry(geometry) => {
                let geometry = to_geo(geometry, 0)?;
                Self::new(Vec::new(), vec![geometry], Some(WGS84))
            }
        }
    }

    fn from_features(features: Vec<Feature>, crs: Crs) -> Result<Self> {
        // Property keys become columns in first-seen order
        let mut names: Vec<String> = Vec::new();
        for feature in &features {
            for key in feature.properties.iter().flat_map(|props| props.keys()) {
                if !names.contains(key) {
                    names.push(key.clone());
                }
            }
        }

        let mut columns: Vec<Column> =
            names.into_iter().map(|name| Column { name, values: Vec::new() }).collect();
        let mut geometries = Vec::with_capacity(features.len());

        for (idx, feature) in features.into_iter().enumerate() {
            for column in &mut columns {
                let value = feature
                    .properties
                    .as_ref()
                    .and_then(|props| props.get(&column.name))
                    .cloned()
                    .unwrap_or(JsonValue::Null);
                column.values.push(value);
            }

            let geometry = feature.geometry.ok_or_else(|| {
                RastersError::invalid_geometry(format!("feature {} has no geometry", idx))
            })?;
            geometries.push(to_geo(geometry, idx)?);
        }

        Self::new(columns, geometries, Some(crs))
    }
}

fn to_geo(geometry: geojson::Geometry, idx: usize) -> Result<Geometry> {
    Geometry::<f64>::try_from(geometry.value).map_err(|e| {
        RastersError::invalid_geometry(format!("feature {}: {}", idx, e))
    })
}

/// Named-CRS member for a FeatureCollection; WGS 84 is implied and omitted
fn crs_member(crs: &Crs) -> Option<JsonValue> {
    if crs.epsg_code() == Some(4326) {
        return None;
    }
    match crs.urn() {
        Some(urn) => Some(serde_json::json!({
            "type": "name",
            "properties": { "name": urn }
        })),
        None => {
            tracing::warn!(crs = %crs, "CRS has no EPSG code; writing GeoJSON without a crs member");
            None
        }
    }
}

/// Extract CRS from a named-CRS object
fn extract_crs(crs: &JsonValue) -> Result<Crs> {
    let name = crs
        .get("properties")
        .and_then(|props| props.get("name"))
        .and_then(JsonValue::as_str)
        .ok_or_else(|| RastersError::CrsInvalid {
            crs: crs.to_string(),
            reason: "crs member has no properties.name".to_string(),
        })?;
    Crs::parse(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::point;

    fn sample_frame(crs: Option<Crs>) -> GeoFrame {
        GeoFrame::new(
            vec![Column::new("distance", [1.5, 2.5])],
            vec![
                Geometry::Point(point!(x: 1.0, y: 2.0)),
                Geometry::Point(point!(x: 3.0, y: 4.0)),
            ],
            crs,
        )
        .unwrap()
    }

    #[test]
    fn test_column_length_mismatch() {
        let result = GeoFrame::new(
            vec![Column::new("distance", [1.0])],
            vec![
                Geometry::Point(point!(x: 0.0, y: 0.0)),
                Geometry::Point(point!(x: 1.0, y: 1.0)),
            ],
            None,
        );
        assert!(matches!(result, Err(RastersError::InvalidGeometry { .. })));
    }

    #[test]
    fn test_reserved_and_duplicate_names() {
        let reserved = GeoFrame::new(vec![Column::new::<f64>("geometry", [])], vec![], None);
        assert!(reserved.is_err());

        let duplicate = GeoFrame::new(
            vec![Column::new::<f64>("a", []), Column::new::<f64>("a", [])],
            vec![],
            None,
        );
        assert!(duplicate.is_err());
    }

    #[test]
    fn test_empty_frame_keeps_columns() {
        let frame = GeoFrame::empty(&["distance"], None);
        assert!(frame.is_empty());
        assert_eq!(frame.column_names(), vec!["distance", "geometry"]);
        assert_eq!(frame.f64_column("distance"), Some(vec![]));
    }

    #[test]
    fn test_feature_collection_properties() {
        let frame = sample_frame(None);
        let fc = frame.to_feature_collection();

        assert_eq!(fc.features.len(), 2);
        let props = fc.features[1].properties.as_ref().unwrap();
        assert_eq!(props["distance"], serde_json::json!(2.5));
        assert!(fc.foreign_members.is_none());
    }

    #[test]
    fn test_crs_member() {
        let wgs84 = sample_frame(Some(WGS84)).to_feature_collection();
        assert!(wgs84.foreign_members.is_none());

        let utm = sample_frame(Some(Crs::utm(10, false))).to_feature_collection();
        let members = utm.foreign_members.unwrap();
        assert_eq!(members["crs"]["properties"]["name"], "urn:ogc:def:crs:EPSG::32610");
    }

    #[test]
    fn test_parse_feature_collection() {
        let content = r#"{
            "type": "FeatureCollection",
            "crs": { "type": "name", "properties": { "name": "EPSG:3857" } },
            "features": [
                {
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [10.0, 20.0] },
                    "properties": { "name": "a" }
                },
                {
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [30.0, 40.0] },
                    "properties": { "rank": 2 }
                }
            ]
        }"#;

        let frame = GeoFrame::from_geojson_str(content).unwrap();

        assert_eq!(frame.len(), 2);
        assert_eq!(frame.crs(), Some(&Crs::web_mercator()));
        assert_eq!(frame.column_names(), vec!["name", "rank", "geometry"]);
        assert_eq!(frame.column("name").unwrap()[1], JsonValue::Null);
    }

    #[test]
    fn test_unparseable_crs_member_is_an_error() {
        let content = r#"{
            "type": "FeatureCollection",
            "crs": { "type": "name", "properties": { "name": "urn:ogc:def:crs:EPSG::north" } },
            "features": [
                {
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [500000.0, 4000000.0] },
                    "properties": {}
                }
            ]
        }"#;
        let result = GeoFrame::from_geojson_str(content);
        assert!(matches!(result, Err(RastersError::CrsInvalid { .. })));

        let nameless = r#"{
            "type": "FeatureCollection",
            "crs": { "type": "link", "properties": { "href": "crs.txt" } },
            "features": []
        }"#;
        assert!(matches!(
            GeoFrame::from_geojson_str(nameless),
            Err(RastersError::CrsInvalid { .. })
        ));
    }

    #[test]
    fn test_authority_crs_member_round_trips() {
        let esri = Crs::parse("ESRI:102003").unwrap();
        let text = sample_frame(Some(esri.clone())).to_geojson_string(false).unwrap();
        assert!(text.contains("urn:ogc:def:crs:ESRI::102003"));

        let frame = GeoFrame::from_geojson_str(&text).unwrap();
        assert_eq!(frame.crs(), Some(&esri));
    }

    #[test]
    fn test_feature_without_geometry() {
        let content = r#"{ "type": "Feature", "geometry": null, "properties": {} }"#;
        let result = GeoFrame::from_geojson_str(content);
        assert!(matches!(result, Err(RastersError::InvalidGeometry { .. })));
    }

    #[test]
    fn test_driver_from_str() {
        assert_eq!("GeoJSON".parse::<Driver>().unwrap(), Driver::GeoJson);
        assert!(matches!(
            "ESRI Shapefile".parse::<Driver>(),
            Err(RastersError::UnsupportedDriver { .. })
        ));
    }
}
