//! Test data generation utilities.
//!
//! Builders for small rectilinear and curvilinear grids with known layouts.

use ndarray::Array2;
use seagrid::{Grid, LandMask};

/// A rectilinear grid with integer-degree spacing: columns 0..nx, rows 0..ny
pub fn integer_grid(nx: usize, ny: usize) -> Grid {
    let lons: Vec<f64> = (0..nx).map(|i| i as f64).collect();
    let lats: Vec<f64> = (0..ny).map(|j| j as f64).collect();
    Grid::from_axes(&lons, &lats)
}

/// A rotated, stretched grid loosely shaped like a NEMO regional domain
/// (about 1/12 degree spacing, rows tilted to the north-east).
pub fn curvilinear_grid(nx: usize, ny: usize) -> Grid {
    let lons = Array2::from_shape_fn((ny, nx), |(j, i)| {
        -80.0 + i as f64 / 12.0 + j as f64 * 0.02
    });
    let lats = Array2::from_shape_fn((ny, nx), |(j, i)| {
        55.0 + j as f64 / 24.0 + i as f64 * 0.01
    });
    Grid::new(lons, lats).expect("lon/lat shapes match")
}

/// A mask with land in every column `i < coast_i` (a western coastline)
pub fn western_coast_mask(nx: usize, ny: usize, coast_i: usize) -> LandMask {
    LandMask::from_bools(Array2::from_shape_fn((ny, nx), |(_, i)| i < coast_i))
}

/// Values of a smooth analytic field at each grid cell
pub fn analytic_field(grid: &Grid, f: impl Fn(f64, f64) -> f64) -> Array2<f64> {
    let (lons, lats) = (grid.lons(), grid.lats());
    Array2::from_shape_fn(grid.shape(), |(j, i)| f(lons[[j, i]], lats[[j, i]]))
}
