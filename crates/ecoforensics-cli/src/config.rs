//! Engine configuration loading for the CLI.
//!
//! Lookup order: `--config <path>`, then `~/.ecoforensics/engine.toml` if it
//! exists, then built-in defaults.

use crate::error::Result;
use ecoforensics_correlation::EngineConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default configuration file path, if a home directory is known.
pub fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".ecoforensics").join("engine.toml"))
}

/// Load the effective engine configuration.
pub fn load(explicit: Option<&Path>) -> Result<EngineConfig> {
    load_from(explicit, default_path())
}

/// Load from an explicit path, else from `fallback` if it exists, else defaults.
///
/// An explicit path that does not exist is an error; a missing fallback is not.
pub fn load_from(explicit: Option<&Path>, fallback: Option<PathBuf>) -> Result<EngineConfig> {
    if let Some(path) = explicit {
        debug!("Loading engine config from {}", path.display());
        return Ok(EngineConfig::from_file(path)?);
    }

    match fallback {
        Some(path) if path.exists() => {
            debug!("Loading engine config from {}", path.display());
            Ok(EngineConfig::from_file(&path)?)
        }
        _ => {
            debug!("No engine config file, using defaults");
            Ok(EngineConfig::default())
        }
    }
}
