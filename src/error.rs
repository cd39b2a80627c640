//! Error types for seagrid.
//!
//! A single error enum covers every failure the locator, resampler,
//! configuration layer and NetCDF loader can surface.

use thiserror::Error;

/// The main error type for seagrid operations.
#[derive(Error, Debug)]
pub enum SeagridError {
    /// NetCDF file operation errors
    #[cfg(feature = "netcdf")]
    #[error("NetCDF error: {0}")]
    NetCdf(#[from] netcdf::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Array construction errors
    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// A grid type was requested that has no tolerance profile
    #[error("Unknown grid type '{grid_type}': add it to the tolerance table (known: {known})")]
    UnknownGridType { grid_type: String, known: String },

    /// The target resolved to land and no water cell was reachable
    #[error(
        "lon/lat ({lon}, {lat}) is on land at (j={j}, i={i}) and no water point was found within {max_radius} cells"
    )]
    NoWaterPointFound {
        lon: f64,
        lat: f64,
        j: usize,
        i: usize,
        max_radius: usize,
    },

    /// Arrays that must be co-indexed have different shapes or lengths
    #[error("Shape mismatch: {message}")]
    ShapeMismatch { message: String },

    /// Interpolation errors
    #[error("Interpolation error: {message}")]
    Interpolation { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Data not found errors
    #[error("Data not found: {message}")]
    DataNotFound { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results with SeagridError
pub type Result<T> = std::result::Result<T, SeagridError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_water_message() {
        let err = SeagridError::NoWaterPointFound {
            lon: -125.5,
            lat: 49.2,
            j: 3,
            i: 7,
            max_radius: 10,
        };
        let text = err.to_string();
        assert!(text.contains("on land"));
        assert!(text.contains("j=3"));
        assert!(text.contains("10 cells"));
    }

    #[test]
    fn test_unknown_grid_type_message() {
        let err = SeagridError::UnknownGridType {
            grid_type: "ORCA".to_string(),
            known: "GEM2.5, NEMO".to_string(),
        };
        assert!(err.to_string().contains("'ORCA'"));
    }
}
