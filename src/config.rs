//! Configuration loader for the solver CLI.
//!
//! * Looks for `nurikabe.toml` in the cwd unless overridden by `--config`.
//! * Provides defaults so the file is optional.
//!
//! Extend this struct whenever you add new tunables.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Directory that `--level N` resolves against (`levels/level_N.csv`).
    #[serde(default = "default_levels_dir")]
    pub levels_dir: PathBuf,
    /// Default log level when `--log-level` is not given.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Run the solver to a fixed point after loading a level.
    #[serde(default = "default_use_solver")]
    pub use_solver: bool,
    /// Print clue coordinates alongside their value in the text report.
    #[serde(default)]
    pub include_grid_numbers: bool,
    /// Safety valve on the driver's fixed-point loop (see concurrency notes).
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

fn default_levels_dir() -> PathBuf {
    PathBuf::from("levels")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_use_solver() -> bool {
    true
}

fn default_max_iterations() -> u32 {
    10_000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            levels_dir: default_levels_dir(),
            log_level: default_log_level(),
            use_solver: default_use_solver(),
            include_grid_numbers: false,
            max_iterations: default_max_iterations(),
        }
    }
}

impl Config {
    /// Load from a TOML file; fall back to defaults on any error.
    pub fn load(path: Option<&Path>) -> Self {
        let p = path.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("nurikabe.toml"));
        match fs::read_to_string(&p) {
            Ok(text) => toml::from_str(&text).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }
}
