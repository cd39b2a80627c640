//! NetCDF loading and writing of grids, masks and fields.
//!
//! Model files often store 2-D horizontal fields inside larger variables
//! (`tmask(t, z, y, x)`, `votemper(time_counter, deptht, y, x)`). Readers
//! here always return the first horizontal slice: the leading dimensions are
//! taken at index 0, which for NEMO files means the first time step and the
//! surface level. Fill values are converted to NaN and `scale_factor` /
//! `add_offset` packing is undone.

use ndarray::{Array2, ArrayView2};
use netcdf::{AttributeValue, Variable};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{Result, SeagridError};
use crate::grid::{Grid, LandMask};

/// Open a NetCDF file, reporting a missing file as an IO error
fn open_file(path: &Path) -> Result<netcdf::File> {
    if !path.exists() {
        return Err(SeagridError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        )));
    }

    let file = netcdf::open(path)?;
    debug!(
        path = %path.display(),
        variables = file.variables().count(),
        dimensions = file.dimensions().count(),
        "Opened NetCDF file"
    );
    Ok(file)
}

fn find_variable<'f>(file: &'f netcdf::File, name: &str) -> Result<Variable<'f>> {
    file.variable(name).ok_or_else(|| SeagridError::DataNotFound {
        message: format!(
            "Variable {} not found (available: {})",
            name,
            file.variables()
                .map(|v| v.name())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    })
}

/// Read a numeric attribute as f64
fn numeric_attribute(var: &Variable, name: &str) -> Result<Option<f64>> {
    let Some(attr) = var.attribute(name) else {
        return Ok(None);
    };
    let value = match attr.value()? {
        AttributeValue::Double(v) => Some(v),
        AttributeValue::Float(v) => Some(v as f64),
        AttributeValue::Int(v) => Some(v as f64),
        AttributeValue::Short(v) => Some(v as f64),
        AttributeValue::Schar(v) => Some(v as f64),
        AttributeValue::Uchar(v) => Some(v as f64),
        AttributeValue::Doubles(v) => v.first().copied(),
        AttributeValue::Floats(v) => v.first().map(|&x| x as f64),
        other => {
            warn!(
                variable = %var.name(),
                attribute = name,
                value = ?other,
                "Ignoring non-numeric attribute"
            );
            None
        }
    };
    Ok(value)
}

/// Read the first horizontal slice of `var` as an f64 array
fn read_horizontal(var: &Variable) -> Result<Array2<f64>> {
    let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
    if shape.len() < 2 {
        return Err(SeagridError::ShapeMismatch {
            message: format!(
                "Variable {} has {} dimension(s); a 2-D horizontal field is required",
                var.name(),
                shape.len()
            ),
        });
    }

    let (rows, cols) = (shape[shape.len() - 2], shape[shape.len() - 1]);
    let leading: usize = shape[..shape.len() - 2].iter().product();
    if leading > 1 {
        debug!(
            variable = %var.name(),
            shape = ?shape,
            "Using the first horizontal slice"
        );
    }

    let mut values: Vec<f64> = var.get_values::<f64, _>(..)?;
    values.truncate(rows * cols);

    let fill_value = match numeric_attribute(var, "_FillValue")? {
        Some(v) => Some(v),
        None => numeric_attribute(var, "missing_value")?,
    };
    let scale = numeric_attribute(var, "scale_factor")?.unwrap_or(1.0);
    let offset = numeric_attribute(var, "add_offset")?.unwrap_or(0.0);

    for v in values.iter_mut() {
        if fill_value.map_or(false, |fill| *v == fill) {
            *v = f64::NAN;
        } else {
            *v = *v * scale + offset;
        }
    }

    Ok(Array2::from_shape_vec((rows, cols), values)?)
}

fn read_axis(var: &Variable) -> Result<Vec<f64>> {
    Ok(var.get_values::<f64, _>(..)?)
}

/// Load a lon/lat grid. 1-D coordinate variables are expanded into a rectilinear grid.
pub fn load_grid(path: &Path, lon_var: &str, lat_var: &str) -> Result<Grid> {
    let file = open_file(path)?;
    let lon = find_variable(&file, lon_var)?;
    let lat = find_variable(&file, lat_var)?;

    let grid = match (lon.dimensions().len(), lat.dimensions().len()) {
        (1, 1) => Grid::from_axes(&read_axis(&lon)?, &read_axis(&lat)?),
        _ => Grid::new(read_horizontal(&lon)?, read_horizontal(&lat)?)?,
    };

    info!(
        path = %path.display(),
        shape = ?grid.shape(),
        "Loaded grid"
    );
    Ok(grid)
}

/// Load a land mask from a variable where positive values mark water
pub fn load_land_mask(path: &Path, mask_var: &str) -> Result<LandMask> {
    let file = open_file(path)?;
    let var = find_variable(&file, mask_var)?;
    let values = read_horizontal(&var)?;
    Ok(LandMask::from_tmask(values.view()))
}

/// Load the first horizontal slice of a field
pub fn load_field(path: &Path, name: &str) -> Result<Array2<f64>> {
    let file = open_file(path)?;
    let var = find_variable(&file, name)?;
    read_horizontal(&var)
}

/// Write `values` on `grid` to a new NetCDF file with `nav_lon`/`nav_lat` coordinates
pub fn write_field(path: &Path, name: &str, grid: &Grid, values: ArrayView2<f64>) -> Result<()> {
    if values.dim() != grid.shape() {
        return Err(SeagridError::ShapeMismatch {
            message: format!(
                "field {:?} does not match output grid {:?}",
                values.dim(),
                grid.shape()
            ),
        });
    }

    let (rows, cols) = grid.shape();
    let (lons, lats) = grid.flattened();
    let data: Vec<f64> = values.iter().copied().collect();

    let mut file = netcdf::create(path)?;
    file.add_dimension("y", rows)?;
    file.add_dimension("x", cols)?;
    file.add_attribute("title", format!("{} regridded by seagrid", name))?;

    {
        let mut var = file.add_variable::<f64>("nav_lon", &["y", "x"])?;
        var.put_attribute("units", "degrees_east")?;
        var.put_values(&lons, ..)?;
    }
    {
        let mut var = file.add_variable::<f64>("nav_lat", &["y", "x"])?;
        var.put_attribute("units", "degrees_north")?;
        var.put_values(&lats, ..)?;
    }
    {
        let mut var = file.add_variable::<f64>(name, &["y", "x"])?;
        var.put_attribute("coordinates", "nav_lon nav_lat")?;
        var.put_values(&data, ..)?;
    }

    info!(path = %path.display(), variable = name, shape = ?(rows, cols), "Wrote field");
    Ok(())
}
