//! Grid data model.
//!
//! A [`Grid`] holds co-indexed 2-D longitude and latitude arrays laid out as
//! `(j, i)` = (row, column). Coordinates are not assumed to be monotonic or
//! regular, so curvilinear ocean-model grids are supported. A [`LandMask`]
//! marks land cells of a grid, and a [`ScatteredField`] is the flattened
//! sample set fed to the resampler.

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SeagridError};

/// Index of a grid cell: `j` is the row (latitude-like) index and `i` the
/// column (longitude-like) index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridIndex {
    pub j: usize,
    pub i: usize,
}

impl GridIndex {
    pub fn new(j: usize, i: usize) -> Self {
        Self { j, i }
    }

    /// The `[j, i]` pair used to index an `Array2`
    pub fn as_array_index(&self) -> [usize; 2] {
        [self.j, self.i]
    }
}

impl From<(usize, usize)> for GridIndex {
    fn from((j, i): (usize, usize)) -> Self {
        Self { j, i }
    }
}

/// A curvilinear lon/lat grid.
#[derive(Debug, Clone)]
pub struct Grid {
    lons: Array2<f64>,
    lats: Array2<f64>,
}

impl Grid {
    /// Create a grid from co-indexed longitude and latitude arrays
    pub fn new(lons: Array2<f64>, lats: Array2<f64>) -> Result<Self> {
        if lons.shape() != lats.shape() {
            return Err(SeagridError::ShapeMismatch {
                message: format!(
                    "longitude grid {:?} and latitude grid {:?} differ",
                    lons.shape(),
                    lats.shape()
                ),
            });
        }
        Ok(Self { lons, lats })
    }

    /// Build a rectilinear grid from 1-D axes; rows follow `lats`, columns follow `lons`
    pub fn from_axes(lons: &[f64], lats: &[f64]) -> Self {
        let shape = (lats.len(), lons.len());
        Self {
            lons: Array2::from_shape_fn(shape, |(_, i)| lons[i]),
            lats: Array2::from_shape_fn(shape, |(j, _)| lats[j]),
        }
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        self.lons.dim()
    }

    pub fn len(&self) -> usize {
        self.lons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lons.is_empty()
    }

    pub fn lons(&self) -> ArrayView2<'_, f64> {
        self.lons.view()
    }

    pub fn lats(&self) -> ArrayView2<'_, f64> {
        self.lats.view()
    }

    /// The `(lon, lat)` of a cell
    pub fn coord(&self, index: GridIndex) -> (f64, f64) {
        let idx = index.as_array_index();
        (self.lons[idx], self.lats[idx])
    }

    /// Whether `index` lies inside the grid
    pub fn contains(&self, index: GridIndex) -> bool {
        let (rows, cols) = self.shape();
        index.j < rows && index.i < cols
    }

    /// Row-major iterator over `(index, lon, lat)`
    pub fn cells(&self) -> impl Iterator<Item = (GridIndex, f64, f64)> + '_ {
        self.lons
            .indexed_iter()
            .zip(self.lats.iter())
            .map(|(((j, i), &lon), &lat)| (GridIndex::new(j, i), lon, lat))
    }

    /// Longitude and latitude flattened in row-major order
    pub fn flattened(&self) -> (Vec<f64>, Vec<f64>) {
        (
            self.lons.iter().copied().collect(),
            self.lats.iter().copied().collect(),
        )
    }
}

/// Land/water classification co-indexed with a [`Grid`]; `true` = land.
#[derive(Debug, Clone)]
pub struct LandMask {
    land: Array2<bool>,
}

impl LandMask {
    /// Wrap a boolean array where `true` marks land
    pub fn from_bools(land: Array2<bool>) -> Self {
        Self { land }
    }

    /// Convert a NEMO-style `tmask` (1 = water, 0 = land); missing values count as land
    pub fn from_tmask(tmask: ArrayView2<f64>) -> Self {
        Self {
            land: tmask.mapv(|v| v.is_nan() || v <= 0.0),
        }
    }

    /// A mask where every cell is water
    pub fn all_water(shape: (usize, usize)) -> Self {
        Self {
            land: Array2::from_elem(shape, false),
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        self.land.dim()
    }

    pub fn is_land(&self, index: GridIndex) -> bool {
        self.land[index.as_array_index()]
    }

    pub fn is_water(&self, index: GridIndex) -> bool {
        !self.is_land(index)
    }

    /// Fraction of cells that are land (0.0 for an empty mask)
    pub fn land_fraction(&self) -> f64 {
        if self.land.is_empty() {
            return 0.0;
        }
        self.land.iter().filter(|&&l| l).count() as f64 / self.land.len() as f64
    }

    /// Check that this mask is co-indexed with `grid`
    pub fn check_matches(&self, grid: &Grid) -> Result<()> {
        if self.shape() != grid.shape() {
            return Err(SeagridError::ShapeMismatch {
                message: format!(
                    "land mask {:?} does not match grid {:?}",
                    self.shape(),
                    grid.shape()
                ),
            });
        }
        Ok(())
    }
}

/// A set of `(lon, lat) -> value` samples on a source grid.
#[derive(Debug, Clone, Default)]
pub struct ScatteredField {
    lons: Vec<f64>,
    lats: Vec<f64>,
    values: Vec<f64>,
}

impl ScatteredField {
    /// Samples that are already flattened into parallel lists
    pub fn new(lons: Vec<f64>, lats: Vec<f64>, values: Vec<f64>) -> Result<Self> {
        if lons.len() != lats.len() || lons.len() != values.len() {
            return Err(SeagridError::ShapeMismatch {
                message: format!(
                    "scattered samples need equal lengths: {} lons, {} lats, {} values",
                    lons.len(),
                    lats.len(),
                    values.len()
                ),
            });
        }
        Ok(Self { lons, lats, values })
    }

    /// Flatten a 2-D field defined on `grid`
    pub fn from_grid(grid: &Grid, values: ArrayView2<f64>) -> Result<Self> {
        if values.dim() != grid.shape() {
            return Err(SeagridError::ShapeMismatch {
                message: format!(
                    "field {:?} does not match source grid {:?}",
                    values.dim(),
                    grid.shape()
                ),
            });
        }
        let (lons, lats) = grid.flattened();
        Ok(Self {
            lons,
            lats,
            values: values.iter().copied().collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Samples whose coordinates and value are all finite, as `([lon, lat], value)`.
    ///
    /// Land points stored as NaN or fill values never take part in interpolation.
    pub fn finite_samples(&self) -> impl Iterator<Item = ([f64; 2], f64)> + '_ {
        self.lons
            .iter()
            .zip(&self.lats)
            .zip(&self.values)
            .filter(|((lon, lat), value)| lon.is_finite() && lat.is_finite() && value.is_finite())
            .map(|((&lon, &lat), &value)| ([lon, lat], value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_grid_shape_mismatch() {
        let lons = Array2::<f64>::zeros((3, 4));
        let lats = Array2::<f64>::zeros((4, 3));
        assert!(matches!(
            Grid::new(lons, lats),
            Err(SeagridError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_from_axes() {
        let grid = Grid::from_axes(&[10.0, 11.0, 12.0], &[-5.0, -4.0]);
        assert_eq!(grid.shape(), (2, 3));
        assert_eq!(grid.coord(GridIndex::new(0, 2)), (12.0, -5.0));
        assert_eq!(grid.coord(GridIndex::new(1, 0)), (10.0, -4.0));
    }

    #[test]
    fn test_cells_are_row_major() {
        let grid = Grid::from_axes(&[0.0, 1.0], &[0.0, 1.0]);
        let order: Vec<GridIndex> = grid.cells().map(|(idx, _, _)| idx).collect();
        assert_eq!(
            order,
            vec![
                GridIndex::new(0, 0),
                GridIndex::new(0, 1),
                GridIndex::new(1, 0),
                GridIndex::new(1, 1)
            ]
        );
    }

    #[test]
    fn test_land_mask_from_tmask() {
        let tmask = arr2(&[[1.0, 0.0], [f64::NAN, 1.0]]);
        let mask = LandMask::from_tmask(tmask.view());
        assert!(mask.is_water(GridIndex::new(0, 0)));
        assert!(mask.is_land(GridIndex::new(0, 1)));
        assert!(mask.is_land(GridIndex::new(1, 0)));
        assert_eq!(mask.land_fraction(), 0.5);
    }

    #[test]
    fn test_land_mask_check_matches() {
        let grid = Grid::from_axes(&[0.0, 1.0, 2.0], &[0.0, 1.0]);
        assert!(LandMask::all_water((2, 3)).check_matches(&grid).is_ok());
        assert!(LandMask::all_water((3, 2)).check_matches(&grid).is_err());
    }

    #[test]
    fn test_scattered_field_skips_non_finite() {
        let field = ScatteredField::new(
            vec![0.0, 1.0, f64::NAN, 3.0],
            vec![0.0, 1.0, 2.0, 3.0],
            vec![1.0, f64::NAN, 3.0, 4.0],
        )
        .unwrap();
        let samples: Vec<_> = field.finite_samples().collect();
        assert_eq!(samples, vec![([0.0, 0.0], 1.0), ([3.0, 3.0], 4.0)]);
    }

    #[test]
    fn test_scattered_field_from_grid() {
        let grid = Grid::from_axes(&[0.0, 1.0], &[10.0, 11.0]);
        let values = arr2(&[[1.0, 2.0], [3.0, 4.0]]);
        let field = ScatteredField::from_grid(&grid, values.view()).unwrap();
        assert_eq!(field.len(), 4);
        let samples: Vec<_> = field.finite_samples().collect();
        assert_eq!(samples[1], ([1.0, 10.0], 2.0));
        assert_eq!(samples[2], ([0.0, 11.0], 3.0));

        let wrong = arr2(&[[1.0, 2.0, 3.0]]);
        assert!(ScatteredField::from_grid(&grid, wrong.view()).is_err());
    }
}
