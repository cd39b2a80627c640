//! Assertion utilities for testing.
//!
//! This module provides helper functions for making assertions in tests,
//! particularly for floating-point comparisons and grid lookups.

use seagrid::{haversine, Grid, GridIndex, LandMask};

/// Default epsilon for floating-point comparisons
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Assert that two floating-point values are approximately equal.
///
/// # Panics
///
/// Panics if the absolute difference between `actual` and `expected` is greater than `epsilon`.
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: Option<f64>) {
    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    let diff = (actual - expected).abs();

    assert!(
        diff <= epsilon,
        "Values not approximately equal: actual = {}, expected = {}, diff = {}, epsilon = {}",
        actual,
        expected,
        diff,
        epsilon
    );
}

/// Assert that no value is NaN or infinite.
pub fn assert_all_finite<'a>(values: impl IntoIterator<Item = &'a f64>) {
    for (k, v) in values.into_iter().enumerate() {
        assert!(v.is_finite(), "Value at position {} is not finite: {}", k, v);
    }
}

/// Assert that `chosen` is at least as close to `(lon, lat)` as every water cell of the grid.
pub fn assert_closest_water(grid: &Grid, mask: &LandMask, chosen: GridIndex, lon: f64, lat: f64) {
    assert!(mask.is_water(chosen), "Chosen cell {:?} is land", chosen);
    let (clon, clat) = grid.coord(chosen);
    let chosen_dist = haversine(lon, lat, clon, clat);

    for (index, cell_lon, cell_lat) in grid.cells() {
        if mask.is_water(index) {
            let dist = haversine(lon, lat, cell_lon, cell_lat);
            assert!(
                chosen_dist <= dist,
                "Cell {:?} ({} km) is closer than chosen {:?} ({} km)",
                index,
                dist,
                chosen,
                chosen_dist
            );
        }
    }
}
