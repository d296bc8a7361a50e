//! CRS transformation

use geo::{Coord, Geometry, MapCoords};
use proj::Proj;
use rasters_core::{Crs, RastersError, Result};

/// Check if two CRS are the same
pub fn crs_match(crs1: &Crs, crs2: &Crs) -> bool {
    crs1 == crs2
}

/// Build a PROJ transform between two CRS with x/y in longitude, latitude order
pub fn transformer(from_crs: &Crs, to_crs: &Crs) -> Result<Proj> {
    let from_def = from_crs.definition();
    let to_def = to_crs.definition();

    // new_known_crs normalizes axis order for visualization (x = lon, y = lat)
    Proj::new_known_crs(&from_def, &to_def, None).map_err(|e| RastersError::TransformUnavailable {
        from: from_crs.to_string(),
        to: to_crs.to_string(),
        reason: e.to_string(),
    })
}

/// Reproject a geometry from one CRS to another
pub fn reproject_geometry(geometry: &Geometry, from_crs: &Crs, to_crs: &Crs) -> Result<Geometry> {
    // If CRS are the same, no transformation needed
    if crs_match(from_crs, to_crs) {
        return Ok(geometry.clone());
    }

    let proj = transformer(from_crs, to_crs)?;
    let proj = &proj;

    geometry
        .try_map_coords(|coord| proj.convert((coord.x, coord.y)).map(|(x, y)| Coord { x, y }))
        .map_err(|e| RastersError::ProjectionFailed {
            from: from_crs.to_string(),
            to: to_crs.to_string(),
            reason: e.to_string(),
        })
}
