//! Coercion of raw geometries into [`VectorGeometry`]

use geo::{Coord, Geometry, Point};
use rasters_core::WGS84;

use crate::vector::VectorGeometry;

/// Values that can be wrapped as a [`VectorGeometry`].
///
/// Raw `geo` values carry no CRS and are taken to be WGS 84.
pub trait IntoVectorGeometry {
    fn into_vector_geometry(self) -> VectorGeometry;
}

impl IntoVectorGeometry for VectorGeometry {
    fn into_vector_geometry(self) -> VectorGeometry {
        self
    }
}

impl IntoVectorGeometry for &VectorGeometry {
    fn into_vector_geometry(self) -> VectorGeometry {
        self.clone()
    }
}

impl IntoVectorGeometry for Geometry {
    fn into_vector_geometry(self) -> VectorGeometry {
        VectorGeometry::new(self, WGS84)
    }
}

impl IntoVectorGeometry for Point {
    fn into_vector_geometry(self) -> VectorGeometry {
        VectorGeometry::new(self, WGS84)
    }
}

impl IntoVectorGeometry for Coord {
    fn into_vector_geometry(self) -> VectorGeometry {
        VectorGeometry::new(Point::from(self), WGS84)
    }
}

impl IntoVectorGeometry for (f64, f64) {
    fn into_vector_geometry(self) -> VectorGeometry {
        VectorGeometry::point(self.0, self.1, WGS84)
    }
}

/// Wrap any supported value as a [`VectorGeometry`]
pub fn wrap_geometry<G: IntoVectorGeometry>(geometry: G) -> VectorGeometry {
    geometry.into_vector_geometry()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;
    use rasters_core::Crs;

    #[test]
    fn test_raw_values_default_to_wgs84() {
        assert_eq!(wrap_geometry((1.0, 2.0)).crs(), &WGS84);
        assert_eq!(wrap_geometry(coord! { x: 1.0, y: 2.0 }).x(), vec![1.0]);
        assert_eq!(wrap_geometry(Point::new(1.0, 2.0)), VectorGeometry::point(1.0, 2.0, WGS84));
    }

    #[test]
    fn test_wrapped_values_keep_their_crs() {
        let utm = VectorGeometry::point(500_000.0, 0.0, Crs::epsg(32631));
        assert_eq!(wrap_geometry(&utm), utm);
        assert_eq!(wrap_geometry(utm.clone()).crs(), &Crs::epsg(32631));
    }
}
