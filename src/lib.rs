//! # seagrid
//!
//! Coordinate-mapping utilities for preparing regional ocean model forcing.
//!
//! This library maps geographic coordinates onto curvilinear model grids and
//! regrids fields between grids, so that boundary and initial conditions can
//! be sampled from a parent model onto a child domain.
//!
//! ## Key Features
//!
//! - **Closest-point lookup**: tolerance-window search with great-circle tie-breaking
//! - **Land-aware lookup**: spiral search for the nearest water cell when a target lands on land
//! - **Transect lookup**: batch conversion of station/transect coordinates into grid indices
//! - **Regridding**: Delaunay-linear interpolation with nearest-neighbour or constant gap filling
//!
//! ## Architecture
//!
//! - **Geometry**: [`geoutil`] great-circle distance, [`grid`] data model
//! - **Lookup**: [`locate`] point locator, spiral search and transect driver
//! - **Regridding**: [`interpolation`] scattered-data methods, [`resample`] two-stage pipeline
//! - **I/O**: `data_loader` NetCDF grids, masks and fields (feature `netcdf`)

pub mod config;
#[cfg(feature = "netcdf")]
pub mod data_loader;
pub mod error;
pub mod geoutil;
pub mod grid;
pub mod interpolation;
pub mod locate;
pub mod logging;
pub mod resample;

pub use config::{Config, ToleranceProfile, ToleranceTable};
pub use error::{Result, SeagridError};
pub use geoutil::{haversine, haversine_array};
pub use grid::{Grid, GridIndex, LandMask, ScatteredField};
pub use locate::{find_closest_model_point, find_indices_vector, PointLocator, TransectIndices};
pub use logging::{init_tracing, log_error, log_operation_end, log_operation_start, log_timed_operation};
pub use resample::{interp_np, interp_np_zero, FillPolicy, GridResampler};
