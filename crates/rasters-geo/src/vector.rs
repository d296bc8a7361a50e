//! CRS-aware vector geometry.
//!
//! [`VectorGeometry`] pairs a `geo` geometry with the CRS its coordinates are
//! expressed in. The pair is never changed in place: every reprojection
//! returns a new value, and the CRS is shared between values through an
//! `Arc` rather than copied.

use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use geo::{
    BoundingRect, Centroid, Coord, CoordsIter, Distance, Euclidean, Geometry, LineString,
    MultiPoint, Point,
};
use rasters_core::{BBox, Crs, IntoCrs, RastersError, Result, WGS84};
use wkt::{ToWkt, TryFromWkt};

use crate::frame::{Column, Driver, GeoFrame};
use crate::transform::reproject_geometry;
use crate::utm::local_utm_crs;
use crate::wrap::IntoVectorGeometry;

/// Whether a geometry holds one shape or a collection of shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VectorKind {
    /// Point, line, polygon, rect, or triangle
    Single,
    /// Multi-point, multi-line, multi-polygon, or geometry collection
    Multi,
}

impl VectorKind {
    /// Classify a geometry by its variant
    pub fn of(geometry: &Geometry) -> Self {
        match geometry {
            Geometry::Point(_)
            | Geometry::Line(_)
            | Geometry::LineString(_)
            | Geometry::Polygon(_)
            | Geometry::Rect(_)
            | Geometry::Triangle(_) => VectorKind::Single,
            Geometry::MultiPoint(_)
            | Geometry::MultiLineString(_)
            | Geometry::MultiPolygon(_)
            | Geometry::GeometryCollection(_) => VectorKind::Multi,
        }
    }
}

/// A geometry together with the CRS of its coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct VectorGeometry {
    geometry: Geometry,
    crs: Arc<Crs>,
    kind: VectorKind,
}

impl VectorGeometry {
    pub fn new(geometry: impl Into<Geometry>, crs: Crs) -> Self {
        Self::with_shared_crs(geometry, Arc::new(crs))
    }

    /// Wrap a geometry under an already shared CRS
    pub fn with_shared_crs(geometry: impl Into<Geometry>, crs: Arc<Crs>) -> Self {
        let geometry = geometry.into();
        let kind = VectorKind::of(&geometry);
        Self { geometry, crs, kind }
    }

    /// Parse a geometry from Well-Known Text
    pub fn from_wkt(text: &str, crs: Crs) -> Result<Self> {
        let geometry = Geometry::<f64>::try_from_wkt_str(text)
            .map_err(|e| RastersError::invalid_geometry(format!("Failed to parse WKT: {}", e)))?;
        Ok(Self::new(geometry, crs))
    }

    pub fn point(x: f64, y: f64, crs: Crs) -> Self {
        Self::new(Point::new(x, y), crs)
    }

    pub fn multi_point(coords: impl IntoIterator<Item = (f64, f64)>, crs: Crs) -> Self {
        let points: Vec<Point> = coords.into_iter().map(Point::from).collect();
        Self::new(MultiPoint::new(points), crs)
    }

    /// Build a multi-point from parallel x and y arrays
    pub fn multi_point_from_xy(x: &[f64], y: &[f64], crs: Crs) -> Result<Self> {
        if x.len() != y.len() {
            return Err(RastersError::invalid_geometry(format!(
                "length of x ({}) must match length of y ({})",
                x.len(),
                y.len()
            )));
        }
        Ok(Self::multi_point(x.iter().copied().zip(y.iter().copied()), crs))
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn into_geometry(self) -> Geometry {
        self.geometry
    }

    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    pub fn shared_crs(&self) -> &Arc<Crs> {
        &self.crs
    }

    pub fn kind(&self) -> VectorKind {
        self.kind
    }

    pub fn is_single(&self) -> bool {
        self.kind == VectorKind::Single
    }

    pub fn is_multi(&self) -> bool {
        self.kind == VectorKind::Multi
    }

    /// Well-Known Text of the geometry
    pub fn wkt(&self) -> String {
        self.geometry.wkt_string()
    }

    /// Wrap another geometry as the same kind as `self`.
    ///
    /// Without an explicit CRS the result shares `self`'s CRS.
    pub fn contain(&self, other: impl Into<Geometry>, crs: Option<Crs>) -> Self {
        let crs = match crs {
            Some(crs) => Arc::new(crs),
            None => Arc::clone(&self.crs),
        };
        self.contain_shared(other, crs)
    }

    fn contain_shared(&self, other: impl Into<Geometry>, crs: Arc<Crs>) -> Self {
        Self { geometry: other.into(), crs, kind: self.kind }
    }

    /// Reproject into another CRS
    pub fn to_crs(&self, target: impl IntoCrs) -> Result<Self> {
        let target = target.into_crs()?;
        tracing::debug!(from = %self.crs, to = %target, "Reprojecting geometry");

        let geometry = reproject_geometry(&self.geometry, &self.crs, &target)?;
        Ok(self.contain_shared(geometry, target))
    }

    /// The geometry in WGS 84 longitude/latitude
    pub fn latlon(&self) -> Result<Self> {
        self.to_crs(WGS84)
    }

    /// The geometry in its local UTM zone
    pub fn utm(&self) -> Result<Self> {
        self.to_crs(self.local_utm_crs()?)
    }

    /// Centroid as a point in the same CRS; `None` for empty geometries
    pub fn centroid(&self) -> Option<Self> {
        self.geometry
            .centroid()
            .map(|c| Self::with_shared_crs(c, Arc::clone(&self.crs)))
    }

    pub fn centroid_latlon(&self) -> Result<Self> {
        self.centroid()
            .ok_or_else(|| RastersError::EmptyGeometry { operation: "centroid".to_string() })?
            .latlon()
    }

    /// UTM zone containing the WGS 84 centroid
    pub fn local_utm_crs(&self) -> Result<Crs> {
        let centroid = self.centroid_latlon()?;
        match centroid.geometry {
            Geometry::Point(p) => Ok(local_utm_crs(p.y(), p.x())),
            _ => Err(RastersError::invalid_geometry("centroid is not a point")),
        }
    }

    pub fn local_utm_proj4(&self) -> Result<String> {
        self.local_utm_crs().map(|crs| crs.to_string())
    }

    /// GeoJSON representation of the geometry
    pub fn mapping(&self) -> geojson::Geometry {
        geojson::Geometry::new(geojson::Value::from(&self.geometry))
    }

    /// Plain `geo` geometry rebuilt from [`mapping`](Self::mapping)
    pub fn to_geo(&self) -> Result<Geometry> {
        Geometry::<f64>::try_from(self.mapping().value)
            .map_err(|e| RastersError::invalid_geometry(e.to_string()))
    }

    /// One-row table holding this geometry under its CRS
    pub fn gdf(&self) -> Result<GeoFrame> {
        GeoFrame::new(Vec::new(), vec![self.to_geo()?], Some(self.crs().clone()))
    }

    /// Write the geometry to a GeoJSON file
    pub fn to_geojson(&self, path: impl AsRef<Path>) -> Result<()> {
        self.gdf()?.to_file(path, Driver::GeoJson)
    }

    pub fn is_geographic(&self) -> bool {
        self.crs.is_geographic()
    }

    /// The geometry in a projected CRS.
    ///
    /// Already projected geometries are borrowed as-is; geographic ones are
    /// reprojected to their local UTM zone.
    pub fn projected(&self) -> Result<Cow<'_, Self>> {
        if self.is_geographic() {
            Ok(Cow::Owned(self.utm()?))
        } else {
            Ok(Cow::Borrowed(self))
        }
    }

    /// Distances from this geometry to each point.
    ///
    /// The `geometry` column holds a segment from this geometry to the point in
    /// their original coordinates. The `distance` column is measured between
    /// the projected forms of both, each projected on its own.
    pub fn distances<I>(&self, points: I) -> Result<GeoFrame>
    where
        I: IntoIterator,
        I::Item: IntoVectorGeometry,
    {
        let points: Vec<VectorGeometry> =
            points.into_iter().map(IntoVectorGeometry::into_vector_geometry).collect();

        if points.is_empty() {
            return Ok(GeoFrame::empty(&["distance"], None));
        }

        let start = self.anchor()?;
        let projected = self.projected()?;

        let mut geometry = Vec::with_capacity(points.len());
        let mut distance_column = Vec::with_capacity(points.len());

        for point in &points {
            let end = point.anchor()?;
            geometry.push(Geometry::LineString(LineString::new(vec![start, end])));

            let distance = Euclidean.distance(projected.geometry(), point.projected()?.geometry());
            distance_column.push(distance);
        }

        tracing::debug!(points = points.len(), crs = %self.crs, "Computed distances");

        GeoFrame::new(vec![Column::new("distance", distance_column)], geometry, None)
    }

    /// x coordinates of every vertex
    pub fn x(&self) -> Vec<f64> {
        self.geometry.coords_iter().map(|c| c.x).collect()
    }

    /// y coordinates of every vertex
    pub fn y(&self) -> Vec<f64> {
        self.geometry.coords_iter().map(|c| c.y).collect()
    }

    pub fn bbox(&self) -> Option<BBox> {
        self.geometry.bounding_rect().map(|rect| {
            BBox::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y, self.crs().clone())
        })
    }

    /// Split a multi geometry into single parts sharing this CRS
    pub fn explode(&self) -> Vec<Self> {
        let crs = || Arc::clone(&self.crs);
        match &self.geometry {
            Geometry::MultiPoint(mp) => {
                mp.iter().map(|p| Self::with_shared_crs(*p, crs())).collect()
            }
            Geometry::MultiLineString(mls) => {
                mls.iter().map(|ls| Self::with_shared_crs(ls.clone(), crs())).collect()
            }
            Geometry::MultiPolygon(mp) => {
                mp.iter().map(|p| Self::with_shared_crs(p.clone(), crs())).collect()
            }
            Geometry::GeometryCollection(gc) => {
                gc.iter().map(|g| Self::with_shared_crs(g.clone(), crs())).collect()
            }
            _ => vec![self.clone()],
        }
    }

    /// Coordinate a connecting segment starts or ends at
    fn anchor(&self) -> Result<Coord> {
        match &self.geometry {
            Geometry::Point(p) => Ok(p.0),
            other => other
                .centroid()
                .map(|c| c.0)
                .ok_or_else(|| RastersError::EmptyGeometry { operation: "distance".to_string() }),
        }
    }
}

impl fmt::Display for VectorGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.wkt())
    }
}
