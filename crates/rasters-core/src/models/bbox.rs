use serde::{Deserialize, Serialize};

use super::crs::Crs;

/// Axis-aligned bounding box in the coordinates of its CRS
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
    pub crs: Crs,
}

impl BBox {
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64, crs: Crs) -> Self {
        Self { xmin, ymin, xmax, ymax, crs }
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }
}
