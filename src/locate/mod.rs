//! Closest-point lookup on curvilinear grids.
//!
//! [`PointLocator`] maps a target lon/lat to the `(j, i)` index of the
//! closest grid cell:
//!
//! 1. every cell whose longitude lies within `tol_lon` of the target and
//!    whose latitude lies within `tol_lat` is a candidate (a per-axis box,
//!    not a circle);
//! 2. no candidates means the target is outside the grid, which is reported
//!    as `Ok(None)` rather than an error;
//! 3. among several candidates the one with the smallest great-circle
//!    distance wins, the first in row-major order on exact ties;
//! 4. with a land mask, a land result is replaced by the nearest water cell
//!    found by the [`spiral`] search.

pub mod spiral;
pub mod vector;

use tracing::{debug, trace};

use crate::config::{ToleranceProfile, ToleranceTable, DEFAULT_GRID_TYPE};
use crate::error::Result;
use crate::geoutil::haversine;
use crate::grid::{Grid, GridIndex, LandMask};

pub use spiral::{default_max_radius, find_nearest_water};
pub use vector::TransectIndices;

/// Finds grid indices for lon/lat targets on one grid.
#[derive(Debug, Clone)]
pub struct PointLocator<'a> {
    grid: &'a Grid,
    tolerance: ToleranceProfile,
    land_mask: Option<&'a LandMask>,
    max_radius: usize,
}

impl<'a> PointLocator<'a> {
    /// Create a locator using the tolerance profile registered for `grid_type`
    pub fn new(grid: &'a Grid, grid_type: &str, tolerances: &ToleranceTable) -> Result<Self> {
        let tolerance = tolerances.get(grid_type)?;
        Ok(Self::with_tolerance(grid, tolerance))
    }

    /// Create a locator with an explicit tolerance window
    pub fn with_tolerance(grid: &'a Grid, tolerance: ToleranceProfile) -> Self {
        Self {
            grid,
            tolerance,
            land_mask: None,
            max_radius: default_max_radius(grid.shape()),
        }
    }

    /// Resolve land hits to the nearest water cell of `mask`
    pub fn with_land_mask(mut self, mask: &'a LandMask) -> Result<Self> {
        mask.check_matches(self.grid)?;
        self.land_mask = Some(mask);
        Ok(self)
    }

    /// Bound the ring radius of the nearest-water search
    pub fn with_max_radius(mut self, max_radius: usize) -> Self {
        self.max_radius = max_radius;
        self
    }

    pub fn grid(&self) -> &Grid {
        self.grid
    }

    pub fn tolerance(&self) -> ToleranceProfile {
        self.tolerance
    }

    pub fn max_radius(&self) -> usize {
        self.max_radius
    }

    /// Locate the grid cell closest to `(lon, lat)`.
    ///
    /// Returns `Ok(None)` when no cell falls inside the tolerance window, and
    /// [`NoWaterPointFound`](crate::SeagridError::NoWaterPointFound) when the match is land and the
    /// spiral search finds no water within the radius bound.
    pub fn locate(&self, lon: f64, lat: f64) -> Result<Option<GridIndex>> {
        let candidates = self.candidates(lon, lat);
        trace!(lon, lat, candidates = candidates.len(), "Tolerance window searched");

        let index = match candidates.as_slice() {
            [] => return Ok(None),
            [only] => *only,
            _ => self.closest_candidate(lon, lat, &candidates),
        };

        match self.land_mask {
            Some(mask) if mask.is_land(index) => {
                debug!(j = index.j, i = index.i, "Closest point is land, searching for water");
                find_nearest_water(self.grid, mask, index, lon, lat, self.max_radius).map(Some)
            }
            _ => Ok(Some(index)),
        }
    }

    /// Row-major indices of every cell inside the tolerance window
    fn candidates(&self, lon: f64, lat: f64) -> Vec<GridIndex> {
        let ToleranceProfile { tol_lon, tol_lat } = self.tolerance;
        self.grid
            .cells()
            .filter(|&(_, cell_lon, cell_lat)| {
                cell_lon > lon - tol_lon
                    && cell_lon < lon + tol_lon
                    && cell_lat > lat - tol_lat
                    && cell_lat < lat + tol_lat
            })
            .map(|(index, _, _)| index)
            .collect()
    }

    /// The candidate with the smallest great-circle distance; first wins on ties
    fn closest_candidate(&self, lon: f64, lat: f64, candidates: &[GridIndex]) -> GridIndex {
        let mut best = candidates[0];
        let mut best_dist = f64::INFINITY;
        for &index in candidates {
            let (cell_lon, cell_lat) = self.grid.coord(index);
            let dist = haversine(lon, lat, cell_lon, cell_lat);
            if dist < best_dist {
                best_dist = dist;
                best = index;
            }
        }
        best
    }
}

/// Locate the grid cell closest to `(lon, lat)`, or the closest water cell when
/// `land_mask` is given.
pub fn find_closest_model_point(
    lon: f64,
    lat: f64,
    grid: &Grid,
    grid_type: &str,
    tolerances: &ToleranceTable,
    land_mask: Option<&LandMask>,
) -> Result<Option<GridIndex>> {
    let locator = PointLocator::new(grid, grid_type, tolerances)?;
    let locator = match land_mask {
        Some(mask) => locator.with_land_mask(mask)?,
        None => locator,
    };
    locator.locate(lon, lat)
}

/// Locate every point of a transect on a NEMO-type grid, without a land mask.
///
/// Points that cannot be located yield `None` in both output sequences.
pub fn find_indices_vector(
    lons: &[f64],
    lats: &[f64],
    grid: &Grid,
    tolerances: &ToleranceTable,
) -> Result<TransectIndices> {
    PointLocator::new(grid, DEFAULT_GRID_TYPE, tolerances)?.locate_all(lons, lats)
}
