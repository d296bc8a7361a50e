//! Error types for Rasters

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RastersError {
    // CRS errors
    #[error("Invalid CRS '{crs}': {reason}")]
    CrsInvalid { crs: String, reason: String },

    #[error("No transform available from {from} to {to}: {reason}")]
    TransformUnavailable {
        from: String,
        to: String,
        reason: String,
    },

    #[error("Projection from {from} to {to} failed: {reason}")]
    ProjectionFailed {
        from: String,
        to: String,
        reason: String,
    },

    // Geometry errors
    #[error("Invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    #[error("Cannot compute {operation} of an empty geometry")]
    EmptyGeometry { operation: String },

    // Output errors
    #[error("Unsupported output driver: {driver}. Only GeoJSON is available")]
    UnsupportedDriver { driver: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RastersError {
    /// Shorthand for an [`RastersError::InvalidGeometry`] with a formatted reason
    pub fn invalid_geometry(reason: impl Into<String>) -> Self {
        RastersError::InvalidGeometry { reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, RastersError>;
