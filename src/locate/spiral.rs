//! Spiral search for the nearest water cell.
//!
//! Starting from a land cell, square rings of Chebyshev radius 1, 2, ... are
//! scanned. The first ring holding any water cell ends the search, and among
//! that ring's water cells the one closest to the original target (by
//! great-circle distance) is returned, so no compass direction is favoured.
//! Within a ring, cells are visited row by row, west to east, and the
//! first visited cell wins an exact distance tie. Offsets falling outside the
//! grid are skipped; indices never wrap.

use tracing::debug;

use crate::error::{Result, SeagridError};
use crate::geoutil::haversine;
use crate::grid::{Grid, GridIndex, LandMask};

/// Radius bound that lets the search reach every cell of a `(rows, cols)` grid
pub fn default_max_radius((rows, cols): (usize, usize)) -> usize {
    rows.max(cols).saturating_sub(1).max(1)
}

/// Find the water cell nearest to `(lon, lat)`, searching outward from `start`.
pub fn find_nearest_water(
    grid: &Grid,
    mask: &LandMask,
    start: GridIndex,
    lon: f64,
    lat: f64,
    max_radius: usize,
) -> Result<GridIndex> {
    mask.check_matches(grid)?;
    if mask.is_water(start) {
        return Ok(start);
    }

    let (rows, cols) = grid.shape();
    for radius in 1..=max_radius {
        let mut best: Option<(GridIndex, f64)> = None;
        for index in ring(start, radius, rows, cols) {
            if mask.is_land(index) {
                continue;
            }
            let (cell_lon, cell_lat) = grid.coord(index);
            let dist = haversine(lon, lat, cell_lon, cell_lat);
            match best {
                Some((_, best_dist)) if dist >= best_dist => {}
                _ => best = Some((index, dist)),
            }
        }

        if let Some((index, dist)) = best {
            debug!(
                radius,
                j = index.j,
                i = index.i,
                distance_km = dist,
                "Found nearest water point"
            );
            return Ok(index);
        }

        if ring_covers_grid(start, radius, rows, cols) {
            break;
        }
    }

    Err(SeagridError::NoWaterPointFound {
        lon,
        lat,
        j: start.j,
        i: start.i,
        max_radius,
    })
}

/// Whether every cell lies within Chebyshev distance `radius` of `center`
fn ring_covers_grid(center: GridIndex, radius: usize, rows: usize, cols: usize) -> bool {
    center.j <= radius
        && center.j + radius + 1 >= rows
        && center.i <= radius
        && center.i + radius + 1 >= cols
}

/// In-bounds cells at Chebyshev distance `radius` from `center`, row-major
fn ring(
    center: GridIndex,
    radius: usize,
    rows: usize,
    cols: usize,
) -> impl Iterator<Item = GridIndex> {
    let r = radius as isize;
    let (cj, ci) = (center.j as isize, center.i as isize);
    (-r..=r)
        .flat_map(move |dj| {
            let edge_row = dj.abs() == r;
            let step = if edge_row { 1 } else { 2 * r as usize };
            (-r..=r).step_by(step).map(move |di| (cj + dj, ci + di))
        })
        .filter(move |&(j, i)| j >= 0 && i >= 0 && (j as usize) < rows && (i as usize) < cols)
        .map(|(j, i)| GridIndex::new(j as usize, i as usize))
}
