//! Print a summary of a model grid file: shape, coordinate ranges and land coverage.
//!
//! Usage: `inspect_grid <file> [lon_var] [lat_var] [mask_var]`

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use seagrid::data_loader::{load_grid, load_land_mask};
use seagrid::Grid;

fn range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

fn print_grid(grid: &Grid) {
    let (rows, cols) = grid.shape();
    println!("\n=== GRID ===");
    println!("  shape: {} rows (j) x {} columns (i)", rows, cols);
    match range(grid.lons().iter().copied()) {
        Some((lo, hi)) => println!("  longitude: {:.4} .. {:.4}", lo, hi),
        None => println!("  longitude: no finite values"),
    }
    match range(grid.lats().iter().copied()) {
        Some((lo, hi)) => println!("  latitude:  {:.4} .. {:.4}", lo, hi),
        None => println!("  latitude:  no finite values"),
    }
    if !grid.is_empty() {
        let (lon, lat) = grid.coord((0, 0).into());
        println!("  corner (0, 0): ({:.4}, {:.4})", lon, lat);
        let (lon, lat) = grid.coord((rows - 1, cols - 1).into());
        println!("  corner ({}, {}): ({:.4}, {:.4})", rows - 1, cols - 1, lon, lat);
    }
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let Some(path) = args.next().map(PathBuf::from) else {
        bail!("usage: inspect_grid <file> [lon_var] [lat_var] [mask_var]");
    };
    let lon_var = args.next().unwrap_or_else(|| "nav_lon".to_string());
    let lat_var = args.next().unwrap_or_else(|| "nav_lat".to_string());
    let mask_var = args.next();

    println!("Inspecting grid file: {}", path.display());

    let grid = load_grid(&path, &lon_var, &lat_var)
        .with_context(|| format!("reading {}/{} from {}", lon_var, lat_var, path.display()))?;
    print_grid(&grid);

    if let Some(mask_var) = mask_var {
        let mask = load_land_mask(&path, &mask_var)
            .with_context(|| format!("reading mask {} from {}", mask_var, path.display()))?;
        mask.check_matches(&grid)?;
        println!("\n=== MASK ({}) ===", mask_var);
        println!("  land fraction: {:.2}%", mask.land_fraction() * 100.0);
    }

    Ok(())
}
