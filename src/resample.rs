//! Regridding of 2-D fields between grids.
//!
//! Resampling runs as a two-stage pipeline:
//!
//! 1. linear interpolation of the source samples at every destination point;
//! 2. positions left undefined by stage 1 (outside the convex hull of the
//!    source samples) are filled according to the [`FillPolicy`], either by
//!    nearest-neighbour interpolation or with a constant.
//!
//! Stage 2 only visits the undefined positions, so the output is identical
//! to running both interpolations over the whole grid and merging.

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::{Result, SeagridError};
use crate::grid::{Grid, ScatteredField};
use crate::interpolation::common::undefined_positions;
use crate::interpolation::{LinearInterpolator, NearestInterpolator, ScatteredInterpolator};

/// What to put where linear interpolation is undefined
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FillPolicy {
    /// Take the value of the nearest source sample
    #[default]
    Nearest,
    /// Use a fixed value
    Constant(f64),
}

impl FromStr for FillPolicy {
    type Err = SeagridError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "nearest" => Ok(FillPolicy::Nearest),
            "zero" => Ok(FillPolicy::Constant(0.0)),
            _ => {
                if let Some(value) = lower.strip_prefix("constant:") {
                    let value = value.parse::<f64>().map_err(|_| SeagridError::InvalidParameter {
                        param: "fill_policy".to_string(),
                        message: format!("Invalid fill constant: {}", value),
                    })?;
                    return Ok(FillPolicy::Constant(value));
                }
                Err(SeagridError::InvalidParameter {
                    param: "fill_policy".to_string(),
                    message: format!(
                        "Unknown fill policy '{}'. Use nearest, zero or constant:<value>",
                        s
                    ),
                })
            }
        }
    }
}

impl fmt::Display for FillPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillPolicy::Nearest => write!(f, "nearest"),
            FillPolicy::Constant(value) => write!(f, "constant:{}", value),
        }
    }
}

impl TryFrom<String> for FillPolicy {
    type Error = SeagridError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<FillPolicy> for String {
    fn from(policy: FillPolicy) -> Self {
        policy.to_string()
    }
}

/// Interpolates scattered source samples onto destination coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridResampler {
    fill: FillPolicy,
}

impl GridResampler {
    pub fn new(fill: FillPolicy) -> Self {
        Self { fill }
    }

    pub fn fill_policy(&self) -> FillPolicy {
        self.fill
    }

    /// Resample `source` onto every cell of `dest`
    pub fn resample(&self, source: &ScatteredField, dest: &Grid) -> Result<Array2<f64>> {
        let (lons, lats) = dest.flattened();
        let values = self.resample_points(source, &lons, &lats)?;
        Ok(Array2::from_shape_vec(dest.shape(), values)?)
    }

    /// Resample `source` onto already-flattened destination coordinates
    pub fn resample_points(
        &self,
        source: &ScatteredField,
        dest_lons: &[f64],
        dest_lats: &[f64],
    ) -> Result<Vec<f64>> {
        if dest_lons.len() != dest_lats.len() {
            return Err(SeagridError::ShapeMismatch {
                message: format!(
                    "destination has {} longitudes but {} latitudes",
                    dest_lons.len(),
                    dest_lats.len()
                ),
            });
        }

        // Stage 1: linear
        let linear = LinearInterpolator::new(source)?;
        let mut values = linear.interpolate_many(dest_lons, dest_lats);

        let undefined = undefined_positions(&values);
        debug!(
            destination_points = values.len(),
            undefined = undefined.len(),
            fill = %self.fill,
            "Linear pass complete"
        );
        if undefined.is_empty() {
            return Ok(values);
        }

        // Stage 2: fill only what stage 1 left undefined
        match self.fill {
            FillPolicy::Constant(constant) => {
                for k in undefined {
                    values[k] = constant;
                }
            }
            FillPolicy::Nearest => {
                let nearest = NearestInterpolator::new(source)?;
                for k in undefined {
                    // Non-finite destination coordinates have no neighbour
                    values[k] = nearest
                        .interpolate(dest_lons[k], dest_lats[k])
                        .ok_or_else(|| SeagridError::Interpolation {
                            message: format!(
                                "No nearest sample for destination point {} at ({}, {})",
                                k, dest_lons[k], dest_lats[k]
                            ),
                        })?;
                }
            }
        }

        Ok(values)
    }
}

/// Resample a 2-D source field onto `dest`, filling gaps by nearest neighbour
pub fn interp_np(source: &Grid, values: ndarray::ArrayView2<f64>, dest: &Grid) -> Result<Array2<f64>> {
    let field = ScatteredField::from_grid(source, values)?;
    GridResampler::new(FillPolicy::Nearest).resample(&field, dest)
}

/// Resample a 2-D source field onto `dest`, filling gaps with zero
pub fn interp_np_zero(
    source: &Grid,
    values: ndarray::ArrayView2<f64>,
    dest: &Grid,
) -> Result<Array2<f64>> {
    let field = ScatteredField::from_grid(source, values)?;
    GridResampler::new(FillPolicy::Constant(0.0)).resample(&field, dest)
}
