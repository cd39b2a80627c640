//! Scattered-data interpolation over 2-D lon/lat samples.
//!
//! Two methods are provided: piecewise-linear interpolation on a Delaunay
//! triangulation of the samples, and nearest-neighbour lookup. The linear
//! method is undefined outside the convex hull of the samples; the nearest
//! method is defined everywhere once at least one sample exists.

pub mod common;
pub mod linear;
pub mod nearest;

use crate::error::{Result, SeagridError};
use crate::grid::ScatteredField;

pub use linear::LinearInterpolator;
pub use nearest::NearestInterpolator;

/// Trait for scattered-data interpolation methods
pub trait ScatteredInterpolator {
    /// Interpolate a value at `(lon, lat)`; `None` where the method is undefined
    fn interpolate(&self, lon: f64, lat: f64) -> Option<f64>;

    /// Get the name of this interpolation method
    fn name(&self) -> &str;

    /// Interpolate at many query points, writing NaN where undefined
    fn interpolate_many(&self, lons: &[f64], lats: &[f64]) -> Vec<f64> {
        lons.iter()
            .zip(lats)
            .map(|(&lon, &lat)| self.interpolate(lon, lat).unwrap_or(f64::NAN))
            .collect()
    }
}

/// Build an interpolator over `field` by name
pub fn get_interpolator(name: &str, field: &ScatteredField) -> Result<Box<dyn ScatteredInterpolator>> {
    match name.to_lowercase().as_str() {
        "linear" => Ok(Box::new(LinearInterpolator::new(field)?)),
        "nearest" => Ok(Box::new(NearestInterpolator::new(field)?)),
        _ => Err(SeagridError::InvalidParameter {
            param: "interpolation".to_string(),
            message: format!("Unknown interpolation method: {}", name),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> ScatteredField {
        ScatteredField::new(
            vec![0.0, 1.0, 0.0, 1.0],
            vec![0.0, 0.0, 1.0, 1.0],
            vec![0.0, 1.0, 2.0, 3.0],
        )
        .unwrap()
    }

    #[test]
    fn test_get_interpolator_by_name() {
        let field = unit_square();
        assert_eq!(get_interpolator("linear", &field).unwrap().name(), "linear");
        assert_eq!(get_interpolator("Nearest", &field).unwrap().name(), "nearest");
        assert!(get_interpolator("cubic", &field).is_err());
    }

    #[test]
    fn test_interpolate_many_marks_undefined_as_nan() {
        let field = unit_square();
        let linear = LinearInterpolator::new(&field).unwrap();
        let values = linear.interpolate_many(&[0.5, 5.0], &[0.5, 5.0]);
        assert!((values[0] - 1.5).abs() < 1e-12);
        assert!(values[1].is_nan());
    }
}
