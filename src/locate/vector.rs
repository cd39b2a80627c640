//! Batch lookup along a transect.
//!
//! Each point is located independently. A point that cannot be resolved
//! (outside the grid, or on land with no reachable water) becomes `None` in
//! both index sequences instead of aborting the rest of the transect.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::PointLocator;
use crate::error::{Result, SeagridError};
use crate::grid::GridIndex;

/// Column (`i`) and row (`j`) indices of a transect, `None` where a point was not found
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransectIndices {
    pub i: Vec<Option<usize>>,
    pub j: Vec<Option<usize>>,
}

impl TransectIndices {
    pub fn len(&self) -> usize {
        self.i.len()
    }

    pub fn is_empty(&self) -> bool {
        self.i.is_empty()
    }

    /// Number of points that were located
    pub fn found(&self) -> usize {
        self.i.iter().filter(|i| i.is_some()).count()
    }

    /// The located cell of point `k`
    pub fn get(&self, k: usize) -> Option<GridIndex> {
        match (self.j.get(k).copied().flatten(), self.i.get(k).copied().flatten()) {
            (Some(j), Some(i)) => Some(GridIndex::new(j, i)),
            _ => None,
        }
    }

    /// Column indices as floats with NaN for missing points
    pub fn i_as_f64(&self) -> Vec<f64> {
        self.i.iter().map(|v| v.map_or(f64::NAN, |x| x as f64)).collect()
    }

    /// Row indices as floats with NaN for missing points
    pub fn j_as_f64(&self) -> Vec<f64> {
        self.j.iter().map(|v| v.map_or(f64::NAN, |x| x as f64)).collect()
    }

    fn push(&mut self, index: Option<GridIndex>) {
        self.i.push(index.map(|idx| idx.i));
        self.j.push(index.map(|idx| idx.j));
    }
}

impl PointLocator<'_> {
    /// Locate every `(lons[k], lats[k])`, keeping each point's own outcome
    pub fn locate_each(&self, lons: &[f64], lats: &[f64]) -> Result<Vec<Result<Option<GridIndex>>>> {
        check_lengths(lons, lats)?;
        Ok(lons
            .iter()
            .zip(lats)
            .map(|(&lon, &lat)| self.locate(lon, lat))
            .collect())
    }

    /// Locate every point of a transect, in input order.
    ///
    /// Per-point failures are logged and recorded as `None`; only a length
    /// mismatch between `lons` and `lats` fails the whole batch.
    pub fn locate_all(&self, lons: &[f64], lats: &[f64]) -> Result<TransectIndices> {
        let outcomes = self.locate_each(lons, lats)?;

        let mut indices = TransectIndices {
            i: Vec::with_capacity(outcomes.len()),
            j: Vec::with_capacity(outcomes.len()),
        };
        for (k, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(index) => {
                    if index.is_none() {
                        debug!(point = k, lon = lons[k], lat = lats[k], "Transect point outside grid");
                    }
                    indices.push(index);
                }
                Err(e) => {
                    warn!(point = k, lon = lons[k], lat = lats[k], error = %e, "Transect point not located");
                    indices.push(None);
                }
            }
        }

        debug!(points = indices.len(), found = indices.found(), "Transect located");
        Ok(indices)
    }
}

fn check_lengths(lons: &[f64], lats: &[f64]) -> Result<()> {
    if lons.len() != lats.len() {
        return Err(SeagridError::ShapeMismatch {
            message: format!(
                "transect has {} longitudes but {} latitudes",
                lons.len(),
                lats.len()
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ToleranceProfile, ToleranceTable};
    use crate::grid::{Grid, LandMask};
    use crate::locate::find_indices_vector;
    use ndarray::Array2;
    use pretty_assertions::assert_eq;

    fn grid() -> Grid {
        Grid::from_axes(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 2.0])
    }

    #[test]
    fn test_locate_all_mixed_points() {
        let grid = grid();
        let locator = PointLocator::with_tolerance(&grid, ToleranceProfile::new(0.2, 0.2));
        let lons = [0.1, 50.0, 3.0, f64::NAN];
        let lats = [1.9, 50.0, 0.05, 1.0];

        let indices = locator.locate_all(&lons, &lats).unwrap();
        assert_eq!(indices.len(), 4);
        assert_eq!(indices.i, vec![Some(0), None, Some(3), None]);
        assert_eq!(indices.j, vec![Some(2), None, Some(0), None]);
        assert_eq!(indices.found(), 2);
        assert_eq!(indices.get(2), Some(GridIndex::new(0, 3)));
        assert_eq!(indices.get(1), None);

        let i = indices.i_as_f64();
        assert_eq!(i[0], 0.0);
        assert!(i[1].is_nan());
    }

    #[test]
    fn test_land_failure_is_contained() {
        let grid = grid();
        let mask = LandMask::from_bools(Array2::from_elem((3, 4), true));
        let locator = PointLocator::with_tolerance(&grid, ToleranceProfile::new(0.2, 0.2))
            .with_land_mask(&mask)
            .unwrap();

        let outcomes = locator.locate_each(&[1.0, 9.0], &[1.0, 9.0]).unwrap();
        assert!(matches!(outcomes[0], Err(SeagridError::NoWaterPointFound { .. })));
        assert!(matches!(outcomes[1], Ok(None)));

        let indices = locator.locate_all(&[1.0, 9.0], &[1.0, 9.0]).unwrap();
        assert_eq!(indices.i, vec![None, None]);
        assert_eq!(indices.j, vec![None, None]);
    }

    #[test]
    fn test_empty_transect() {
        let grid = grid();
        let locator = PointLocator::with_tolerance(&grid, ToleranceProfile::new(0.2, 0.2));
        let indices = locator.locate_all(&[], &[]).unwrap();
        assert!(indices.is_empty());
    }

    #[test]
    fn test_length_mismatch() {
        let grid = grid();
        let locator = PointLocator::with_tolerance(&grid, ToleranceProfile::new(0.2, 0.2));
        assert!(locator.locate_all(&[0.0, 1.0], &[0.0]).is_err());
    }

    #[test]
    fn test_find_indices_vector_uses_nemo_profile() {
        let lons: Vec<f64> = (0..10).map(|k| k as f64 * 0.25).collect();
        let lats: Vec<f64> = (0..10).map(|k| 60.0 + k as f64 * 0.1).collect();
        let grid = Grid::from_axes(&lons, &lats);

        let indices =
            find_indices_vector(&[0.51, 1.24, 30.0], &[60.2, 60.79, 60.0], &grid, &ToleranceTable::default())
                .unwrap();
        assert_eq!(indices.i, vec![Some(2), Some(5), None]);
        assert_eq!(indices.j, vec![Some(2), Some(8), None]);

        // Without a NEMO profile the lookup is rejected before it starts
        assert!(find_indices_vector(&[0.0], &[60.0], &grid, &ToleranceTable::empty()).is_err());
    }
}
