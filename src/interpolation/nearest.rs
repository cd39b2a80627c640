//! Nearest neighbor interpolation.
//!
//! Each query takes the value of the closest sample in lon/lat space. The
//! samples are bulk-loaded into an R*-tree so lookups stay logarithmic on
//! large source grids.

use rstar::primitives::GeomWithData;
use rstar::RTree;

use super::ScatteredInterpolator;
use crate::error::{Result, SeagridError};
use crate::grid::ScatteredField;

type IndexedSample = GeomWithData<[f64; 2], f64>;

/// Nearest neighbor interpolator
pub struct NearestInterpolator {
    tree: RTree<IndexedSample>,
}

impl NearestInterpolator {
    /// Index the finite samples of `field`; fails when there are none
    pub fn new(field: &ScatteredField) -> Result<Self> {
        let samples: Vec<IndexedSample> = field
            .finite_samples()
            .map(|(position, value)| GeomWithData::new(position, value))
            .collect();

        if samples.is_empty() {
            return Err(SeagridError::Interpolation {
                message: format!(
                    "Nearest-neighbour interpolation needs at least one finite sample, got 0 of {}",
                    field.len()
                ),
            });
        }

        Ok(Self {
            tree: RTree::bulk_load(samples),
        })
    }
}

impl ScatteredInterpolator for NearestInterpolator {
    fn interpolate(&self, lon: f64, lat: f64) -> Option<f64> {
        if !lon.is_finite() || !lat.is_finite() {
            return None;
        }
        self.tree.nearest_neighbor(&[lon, lat]).map(|s| s.data)
    }

    fn name(&self) -> &str {
        "nearest"
    }
}
