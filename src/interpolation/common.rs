//! Common utilities for interpolation algorithms.

/// Indices of the undefined (NaN) positions of `values`
pub fn undefined_positions(values: &[f64]) -> Vec<usize> {
    values
        .iter()
        .enumerate()
        .filter_map(|(k, v)| v.is_nan().then_some(k))
        .collect()
}
