//! Linear interpolation on a Delaunay triangulation.
//!
//! The samples are triangulated once; a query inside a triangle takes the
//! barycentric blend of the three corner values. Queries outside the convex
//! hull of the samples are undefined.

use spade::{DelaunayTriangulation, FloatTriangulation, HasPosition, Point2, Triangulation};
use tracing::debug;

use super::ScatteredInterpolator;
use crate::error::{Result, SeagridError};
use crate::grid::ScatteredField;

/// A triangulation vertex carrying its sample value
#[derive(Debug, Clone, Copy)]
struct Sample {
    position: Point2<f64>,
    value: f64,
}

impl HasPosition for Sample {
    type Scalar = f64;

    fn position(&self) -> Point2<f64> {
        self.position
    }
}

/// Piecewise-linear interpolator over scattered samples
pub struct LinearInterpolator {
    triangulation: DelaunayTriangulation<Sample>,
}

impl LinearInterpolator {
    /// Triangulate the finite samples of `field`
    pub fn new(field: &ScatteredField) -> Result<Self> {
        let samples: Vec<Sample> = field
            .finite_samples()
            .map(|([lon, lat], value)| Sample {
                position: Point2::new(lon, lat),
                value,
            })
            .collect();
        let sample_count = samples.len();

        let triangulation = DelaunayTriangulation::<Sample>::bulk_load(samples).map_err(|e| {
            SeagridError::Interpolation {
                message: format!("Failed to triangulate source samples: {:?}", e),
            }
        })?;

        debug!(
            samples = sample_count,
            vertices = triangulation.num_vertices(),
            triangles = triangulation.num_inner_faces(),
            "Built Delaunay triangulation"
        );

        Ok(Self { triangulation })
    }
}

impl ScatteredInterpolator for LinearInterpolator {
    fn interpolate(&self, lon: f64, lat: f64) -> Option<f64> {
        if !lon.is_finite() || !lat.is_finite() {
            return None;
        }
        self.triangulation
            .barycentric()
            .interpolate(|v| v.data().value, Point2::new(lon, lat))
    }

    fn name(&self) -> &str {
        "linear"
    }

    fn interpolate_many(&self, lons: &[f64], lats: &[f64]) -> Vec<f64> {
        // Reuse one barycentric helper and its weight buffer for the whole batch
        let barycentric = self.triangulation.barycentric();
        lons.iter()
            .zip(lats)
            .map(|(&lon, &lat)| {
                if !lon.is_finite() || !lat.is_finite() {
                    return f64::NAN;
                }
                barycentric
                    .interpolate(|v| v.data().value, Point2::new(lon, lat))
                    .unwrap_or(f64::NAN)
            })
            .collect()
    }
}
