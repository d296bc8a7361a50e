//! Rasters Core - CRS values, bounding boxes, errors, and configuration
//!
//! This crate contains the domain values shared by the geometry adapter and the CLI.

pub mod config;
pub mod error;
pub mod models;

pub use error::{RastersError, Result};
pub use models::{BBox, Crs, IntoCrs, WGS84};
