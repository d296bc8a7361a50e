pub mod bbox;
pub mod crs;

pub use bbox::BBox;
pub use crs::{Crs, IntoCrs, WGS84};
