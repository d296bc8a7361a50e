//! Rasters Geo - CRS-aware vector geometry
//!
//! This crate wraps `geo` geometries with a coordinate reference system and
//! delegates reprojection to PROJ, WKT to `wkt`, and GeoJSON to `geojson`.

pub mod frame;
pub mod transform;
pub mod utm;
pub mod vector;
pub mod wrap;

pub use frame::{Column, Driver, GeoFrame};
pub use transform::{crs_match, reproject_geometry};
pub use utm::{local_utm_crs, local_utm_proj4_from_lat_lon, utm_zone};
pub use vector::{VectorGeometry, VectorKind};
pub use wrap::{wrap_geometry, IntoVectorGeometry};
