//! End-to-end NetCDF tests: write a source field, regrid it, read it back.

#![cfg(feature = "netcdf")]

mod common;

use common::assertions::{assert_all_finite, assert_approx_eq};
use common::test_data::{analytic_field, curvilinear_grid, integer_grid};
use seagrid::data_loader::{load_field, load_grid, load_land_mask, write_field};
use seagrid::{find_closest_model_point, interp_np, GridIndex, ToleranceTable};
use tempfile::tempdir;

#[test]
fn test_regrid_through_files() {
    let dir = tempdir().unwrap();
    let source_path = dir.path().join("parent.nc");
    let output_path = dir.path().join("child.nc");

    let source = integer_grid(8, 8);
    let values = analytic_field(&source, |lon, lat| 10.0 + lon + 2.0 * lat);
    write_field(&source_path, "votemper", &source, values.view()).unwrap();

    let loaded_grid = load_grid(&source_path, "nav_lon", "nav_lat").unwrap();
    let loaded_values = load_field(&source_path, "votemper").unwrap();
    assert_eq!(loaded_grid.shape(), (8, 8));

    let child = curvilinear_grid(12, 10);
    let out = interp_np(&loaded_grid, loaded_values.view(), &child).unwrap();
    write_field(&output_path, "votemper", &child, out.view()).unwrap();

    let reread = load_field(&output_path, "votemper").unwrap();
    assert_eq!(reread.dim(), (10, 12));
    assert_all_finite(reread.iter());
}

#[test]
fn test_locate_on_loaded_grid_with_mask() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mesh.nc");

    let grid = curvilinear_grid(20, 15);
    // Positive values mark water; the western third is land
    let tmask = analytic_field(&grid, |lon, _| if lon < -79.0 { 0.0 } else { 1.0 });
    write_field(&path, "tmask", &grid, tmask.view()).unwrap();

    let loaded = load_grid(&path, "nav_lon", "nav_lat").unwrap();
    let mask = load_land_mask(&path, "tmask").unwrap();
    mask.check_matches(&loaded).unwrap();

    let target = GridIndex::new(7, 15);
    let (lon, lat) = loaded.coord(target);
    assert_approx_eq(lon, grid.coord(target).0, None);

    let found = find_closest_model_point(
        lon,
        lat,
        &loaded,
        "NEMO",
        &ToleranceTable::default(),
        Some(&mask),
    )
    .unwrap();
    assert_eq!(found, Some(target));
}
