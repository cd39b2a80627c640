//! Configuration management for seagrid.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Result, SeagridError};
use crate::resample::FillPolicy;

/// Grid type used when none is named
pub const DEFAULT_GRID_TYPE: &str = "NEMO";

/// Command-line arguments for seagrid
#[derive(Parser, Debug)]
#[command(name = "seagrid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to JSON configuration file
    #[arg(short, long, env = "SEAGRID_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "SEAGRID_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Name of the longitude variable in grid files
    #[arg(long, env = "SEAGRID_LON_VAR", global = true)]
    pub lon_var: Option<String>,

    /// Name of the latitude variable in grid files
    #[arg(long, env = "SEAGRID_LAT_VAR", global = true)]
    pub lat_var: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find the grid cell closest to a single lon/lat
    Locate(LocateArgs),
    /// Find grid cells for every point of a transect
    Transect(TransectArgs),
    /// Interpolate a field from one grid onto another
    Resample(ResampleArgs),
}

/// Options shared by the lookup commands
#[derive(Args, Debug)]
pub struct LookupArgs {
    /// NetCDF file holding the model lon/lat grid
    #[arg(short, long)]
    pub grid: PathBuf,

    /// NetCDF file holding a land/sea mask; enables the nearest-water search
    #[arg(long)]
    pub mask_file: Option<PathBuf>,

    /// Name of the mask variable (1 = water, 0 = land)
    #[arg(long, env = "SEAGRID_MASK_VAR")]
    pub mask_var: Option<String>,

    /// Tolerance profile to search with (e.g. NEMO, GEM2.5)
    #[arg(long, env = "SEAGRID_GRID_TYPE")]
    pub grid_type: Option<String>,

    /// Largest ring radius, in cells, the nearest-water search may reach
    #[arg(long)]
    pub max_search_radius: Option<usize>,
}

#[derive(Args, Debug)]
pub struct LocateArgs {
    #[command(flatten)]
    pub lookup: LookupArgs,

    /// Target longitude in degrees
    #[arg(allow_negative_numbers = true)]
    pub lon: f64,

    /// Target latitude in degrees
    #[arg(allow_negative_numbers = true)]
    pub lat: f64,
}

#[derive(Args, Debug)]
pub struct TransectArgs {
    #[command(flatten)]
    pub lookup: LookupArgs,

    /// JSON file of the form {"lons": [...], "lats": [...]}
    #[arg(short, long)]
    pub points: PathBuf,
}

#[derive(Args, Debug)]
pub struct ResampleArgs {
    /// NetCDF file holding the source field and its lon/lat grid
    #[arg(short, long)]
    pub source: PathBuf,

    /// Name of the field to resample
    #[arg(long = "var")]
    pub variable: String,

    /// Longitude variable in the source file, if it differs from --lon-var
    #[arg(long)]
    pub source_lon_var: Option<String>,

    /// Latitude variable in the source file, if it differs from --lat-var
    #[arg(long)]
    pub source_lat_var: Option<String>,

    /// NetCDF file holding the destination lon/lat grid
    #[arg(short, long)]
    pub dest: PathBuf,

    /// Output NetCDF file
    #[arg(short, long)]
    pub output: PathBuf,

    /// How to fill positions outside the source hull: nearest, zero, constant:<value>
    #[arg(long, env = "SEAGRID_FILL", value_parser = parse_fill_policy)]
    pub fill: Option<FillPolicy>,
}

fn parse_fill_policy(s: &str) -> std::result::Result<FillPolicy, String> {
    s.parse::<FillPolicy>().map_err(|e| e.to_string())
}

/// Per-axis half-widths of the candidate window around a target point, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToleranceProfile {
    pub tol_lon: f64,
    pub tol_lat: f64,
}

impl ToleranceProfile {
    pub fn new(tol_lon: f64, tol_lat: f64) -> Self {
        Self { tol_lon, tol_lat }
    }
}

/// Tolerance profiles keyed by grid type.
///
/// The default table holds the NEMO and GEM2.5 profiles; callers may add
/// or override entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToleranceTable(BTreeMap<String, ToleranceProfile>);

impl ToleranceTable {
    /// A table with no profiles
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Look up the profile for `grid_type`
    pub fn get(&self, grid_type: &str) -> Result<ToleranceProfile> {
        self.0
            .get(grid_type)
            .copied()
            .ok_or_else(|| SeagridError::UnknownGridType {
                grid_type: grid_type.to_string(),
                known: self.names().join(", "),
            })
    }

    pub fn contains(&self, grid_type: &str) -> bool {
        self.0.contains_key(grid_type)
    }

    /// Add or replace a profile
    pub fn insert(&mut self, grid_type: impl Into<String>, profile: ToleranceProfile) {
        self.0.insert(grid_type.into(), profile);
    }

    /// Add every profile of `other`, replacing entries with the same name
    pub fn extend(&mut self, other: ToleranceTable) {
        self.0.extend(other.0);
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ToleranceProfile)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Default for ToleranceTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.insert("NEMO", ToleranceProfile::new(0.104, 0.0388));
        table.insert("GEM2.5", ToleranceProfile::new(0.016, 0.012));
        table
    }
}

/// Closest-point lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocateConfig {
    /// Tolerance profile used when a command names none
    #[serde(default = "default_grid_type")]
    pub grid_type: String,

    /// Tolerance profiles, merged over the built-in ones
    #[serde(default)]
    pub tolerances: ToleranceTable,

    /// Bound on the nearest-water search (None = whole grid)
    #[serde(default)]
    pub max_search_radius: Option<usize>,
}

/// Resampling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResampleConfig {
    #[serde(default)]
    pub fill_policy: FillPolicy,
}

/// NetCDF variable names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableNames {
    #[serde(default = "default_lon_var")]
    pub lon: String,

    #[serde(default = "default_lat_var")]
    pub lat: String,

    #[serde(default = "default_mask_var")]
    pub mask: String,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub locate: LocateConfig,

    #[serde(default)]
    pub resample: ResampleConfig,

    #[serde(default)]
    pub variables: VariableNames,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load(cli: &Cli) -> Result<Self> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &cli.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments (clap has already folded in the environment)
        if let Some(level) = &cli.log_level {
            config.log_level = level.clone();
        }
        if let Some(lon) = &cli.lon_var {
            config.variables.lon = lon.clone();
        }
        if let Some(lat) = &cli.lat_var {
            config.variables.lat = lat.clone();
        }
        config.apply_command(&cli.command);

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.locate.grid_type = other.locate.grid_type;
        self.locate.tolerances.extend(other.locate.tolerances);
        if other.locate.max_search_radius.is_some() {
            self.locate.max_search_radius = other.locate.max_search_radius;
        }
        self.resample = other.resample;
        self.variables = other.variables;
        self.log_level = other.log_level;
    }

    fn apply_command(&mut self, command: &Command) {
        match command {
            Command::Locate(LocateArgs { lookup, .. })
            | Command::Transect(TransectArgs { lookup, .. }) => {
                if let Some(grid_type) = &lookup.grid_type {
                    self.locate.grid_type = grid_type.clone();
                }
                if lookup.max_search_radius.is_some() {
                    self.locate.max_search_radius = lookup.max_search_radius;
                }
                if let Some(mask) = &lookup.mask_var {
                    self.variables.mask = mask.clone();
                }
            }
            Command::Resample(args) => {
                if let Some(fill) = args.fill {
                    self.resample.fill_policy = fill;
                }
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Validate log level
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(SeagridError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        if !self.locate.tolerances.contains(&self.locate.grid_type) {
            return Err(SeagridError::Config {
                message: format!(
                    "Grid type {} has no tolerance profile. Known grid types: {}",
                    self.locate.grid_type,
                    self.locate.tolerances.names().join(", ")
                ),
            });
        }

        for (name, profile) in self.locate.tolerances.iter() {
            let valid = |t: f64| t.is_finite() && t > 0.0;
            if !valid(profile.tol_lon) || !valid(profile.tol_lat) {
                return Err(SeagridError::Config {
                    message: format!(
                        "Tolerances for {} must be positive and finite (tol_lon={}, tol_lat={})",
                        name, profile.tol_lon, profile.tol_lat
                    ),
                });
            }
        }

        if let FillPolicy::Constant(value) = self.resample.fill_policy {
            if !value.is_finite() {
                return Err(SeagridError::Config {
                    message: format!("Fill constant must be finite, got {}", value),
                });
            }
        }

        for (what, name) in [
            ("lon", &self.variables.lon),
            ("lat", &self.variables.lat),
            ("mask", &self.variables.mask),
        ] {
            if name.is_empty() {
                return Err(SeagridError::Config {
                    message: format!("Variable name for {} cannot be empty", what),
                });
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locate: LocateConfig::default(),
            resample: ResampleConfig::default(),
            variables: VariableNames::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for LocateConfig {
    fn default() -> Self {
        Self {
            grid_type: default_grid_type(),
            tolerances: ToleranceTable::default(),
            max_search_radius: None,
        }
    }
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self {
            fill_policy: FillPolicy::Nearest,
        }
    }
}

impl Default for VariableNames {
    fn default() -> Self {
        Self {
            lon: default_lon_var(),
            lat: default_lat_var(),
            mask: default_mask_var(),
        }
    }
}

// Default value functions for serde
fn default_grid_type() -> String {
    DEFAULT_GRID_TYPE.to_string()
}

fn default_lon_var() -> String {
    "nav_lon".to_string()
}

fn default_lat_var() -> String {
    "nav_lat".to_string()
}

fn default_mask_var() -> String {
    "tmask".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
