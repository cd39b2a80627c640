//! seagrid - closest-point lookup and regridding for ocean model grids
//!
//! This is the main entry point for the seagrid command-line tool.

use clap::Parser;
use serde::Deserialize;
use std::time::Instant;
use tracing::{error, info};

use seagrid::config::{Cli, Command, LocateArgs, LookupArgs, ResampleArgs, TransectArgs};
use seagrid::data_loader::{load_field, load_grid, load_land_mask, write_field};
use seagrid::logging::log_grid_stats;
use seagrid::{
    init_tracing, log_operation_end, log_operation_start, log_timed_operation, Config, Grid,
    GridResampler, LandMask, PointLocator, Result, ScatteredField,
};

/// Transect input file
#[derive(Debug, Deserialize)]
struct TransectPoints {
    lons: Vec<f64>,
    lats: Vec<f64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli).map_err(|e| {
        eprintln!("Configuration error: {}", e);
        e
    })?;

    init_tracing(&config.log_level);
    info!("Starting seagrid v{}", env!("CARGO_PKG_VERSION"));

    // Validate configuration
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    let result = match &cli.command {
        Command::Locate(args) => run_locate(&config, args),
        Command::Transect(args) => run_transect(&config, args),
        Command::Resample(args) => run_resample(&config, args),
    };

    if let Err(e) = &result {
        seagrid::log_error(e, "command failed");
    }
    result
}

/// Grid and optional land mask for a lookup command
fn load_lookup_inputs(config: &Config, args: &LookupArgs) -> Result<(Grid, Option<LandMask>)> {
    let grid = load_grid(&args.grid, &config.variables.lon, &config.variables.lat)?;
    let mask = match &args.mask_file {
        Some(path) => Some(load_land_mask(path, &config.variables.mask)?),
        None => None,
    };
    log_grid_stats(
        &args.grid.display().to_string(),
        grid.shape(),
        mask.as_ref().map(LandMask::land_fraction),
    );
    Ok((grid, mask))
}

fn build_locator<'a>(
    config: &Config,
    grid: &'a Grid,
    mask: Option<&'a LandMask>,
) -> Result<PointLocator<'a>> {
    let mut locator = PointLocator::new(grid, &config.locate.grid_type, &config.locate.tolerances)?;
    if let Some(radius) = config.locate.max_search_radius {
        locator = locator.with_max_radius(radius);
    }
    match mask {
        Some(mask) => locator.with_land_mask(mask),
        None => Ok(locator),
    }
}

fn run_locate(config: &Config, args: &LocateArgs) -> Result<()> {
    let (grid, mask) = load_lookup_inputs(config, &args.lookup)?;
    let locator = build_locator(config, &grid, mask.as_ref())?;

    let index = locator.locate(args.lon, args.lat)?;
    match index {
        Some(index) => info!(lon = args.lon, lat = args.lat, j = index.j, i = index.i, "Located point"),
        None => info!(lon = args.lon, lat = args.lat, "Point is outside the grid"),
    }
    println!("{}", serde_json::to_string(&index)?);
    Ok(())
}

fn run_transect(config: &Config, args: &TransectArgs) -> Result<()> {
    let (grid, mask) = load_lookup_inputs(config, &args.lookup)?;
    let locator = build_locator(config, &grid, mask.as_ref())?;

    let content = std::fs::read_to_string(&args.points)?;
    let points: TransectPoints = serde_json::from_str(&content)?;

    let indices = log_timed_operation("transect", || locator.locate_all(&points.lons, &points.lats))?;
    info!(points = indices.len(), found = indices.found(), "Transect complete");
    println!("{}", serde_json::to_string(&indices)?);
    Ok(())
}

fn run_resample(config: &Config, args: &ResampleArgs) -> Result<()> {
    let start = Instant::now();
    log_operation_start(
        "resample",
        Some(&format!(
            "{} from {} onto {}",
            args.variable,
            args.source.display(),
            args.dest.display()
        )),
    );

    let source_lon = args.source_lon_var.as_deref().unwrap_or(&config.variables.lon);
    let source_lat = args.source_lat_var.as_deref().unwrap_or(&config.variables.lat);
    let source_grid = load_grid(&args.source, source_lon, source_lat)?;
    let values = load_field(&args.source, &args.variable)?;
    let field = ScatteredField::from_grid(&source_grid, values.view())?;

    let dest_grid = load_grid(&args.dest, &config.variables.lon, &config.variables.lat)?;

    let resampler = GridResampler::new(config.resample.fill_policy);
    let output = log_timed_operation("interpolate", || resampler.resample(&field, &dest_grid))?;

    write_field(&args.output, &args.variable, &dest_grid, output.view())?;
    log_operation_end("resample", start, true);
    Ok(())
}
