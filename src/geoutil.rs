//! Great-circle distance on a spherical Earth.
//!
//! Used by the point locator to break ties between candidate cells and by
//! the spiral search to rank water cells found on the same ring.

use ndarray::{Array, ArrayView, Dimension, Zip};

use crate::error::{Result, SeagridError};

/// Radius of the sphere used by [`haversine`], in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6367.0;

/// Great-circle distance in kilometres between two lon/lat points given in degrees.
///
/// Reference: <http://www.movable-type.co.uk/scripts/latlong.html>
pub fn haversine(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let (lon1, lat1, lon2, lat2) = (
        lon1.to_radians(),
        lat1.to_radians(),
        lon2.to_radians(),
        lat2.to_radians(),
    );
    let dlon = lon2 - lon1;
    let dlat = lat2 - lat1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // a can creep above 1.0 through rounding for antipodal points
    let c = 2.0 * a.sqrt().min(1.0).asin();
    EARTH_RADIUS_KM * c
}

/// Elementwise [`haversine`] over arrays of identical shape.
pub fn haversine_array<D: Dimension>(
    lon1: ArrayView<f64, D>,
    lat1: ArrayView<f64, D>,
    lon2: ArrayView<f64, D>,
    lat2: ArrayView<f64, D>,
) -> Result<Array<f64, D>> {
    let shape = lon1.shape();
    if lat1.shape() != shape || lon2.shape() != shape || lat2.shape() != shape {
        return Err(SeagridError::ShapeMismatch {
            message: format!(
                "haversine inputs must share a shape: {:?}, {:?}, {:?}, {:?}",
                lon1.shape(),
                lat1.shape(),
                lon2.shape(),
                lat2.shape()
            ),
        });
    }

    let mut out = Array::zeros(lon1.raw_dim());
    Zip::from(&mut out)
        .and(&lon1)
        .and(&lat1)
        .and(&lon2)
        .and(&lat2)
        .for_each(|d, &a, &b, &c, &e| *d = haversine(a, b, c, e));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    #[test]
    fn test_zero_distance() {
        assert_eq!(haversine(-125.5, 49.2, -125.5, 49.2), 0.0);
        assert_eq!(haversine(0.0, 0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let d1 = haversine(-123.1, 49.3, -70.6, 42.4);
        let d2 = haversine(-70.6, 42.4, -123.1, 49.3);
        assert!((d1 - d2).abs() < 1e-9);
    }

    #[test]
    fn test_one_degree_on_equator() {
        // One degree of arc on a 6367 km sphere
        let expected = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;
        let d = haversine(0.0, 0.0, 1.0, 0.0);
        assert!((d - expected).abs() < 1e-9);
        let d = haversine(0.0, 0.0, 0.0, 1.0);
        assert!((d - expected).abs() < 1e-9);
    }

    #[test]
    fn test_antipodal_points() {
        let d = haversine(0.0, 0.0, 180.0, 0.0);
        assert!((d - EARTH_RADIUS_KM * std::f64::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn test_array_matches_scalar() {
        let lon1 = arr2(&[[0.0, 10.0], [20.0, -30.0]]);
        let lat1 = arr2(&[[0.0, 5.0], [60.0, -45.0]]);
        let lon2 = arr2(&[[1.0, 11.0], [25.0, -31.0]]);
        let lat2 = arr2(&[[1.0, 4.0], [61.0, -44.0]]);

        let d = haversine_array(lon1.view(), lat1.view(), lon2.view(), lat2.view()).unwrap();
        for ((j, i), &value) in d.indexed_iter() {
            let expected = haversine(lon1[[j, i]], lat1[[j, i]], lon2[[j, i]], lat2[[j, i]]);
            assert_eq!(value, expected);
        }
    }

    #[test]
    fn test_array_shape_mismatch() {
        let a = arr1(&[0.0, 1.0]);
        let b = arr1(&[0.0, 1.0, 2.0]);
        let result = haversine_array(a.view(), a.view(), b.view(), a.view());
        assert!(matches!(result, Err(SeagridError::ShapeMismatch { .. })));
    }
}
