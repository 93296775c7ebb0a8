//! Config command implementation.

use crate::cli::{ConfigArgs, PresetArg};
use crate::error::Result;
use ecoforensics_correlation::EngineConfig;

/// Execute the config command.
pub fn execute_config(args: ConfigArgs, loaded: &EngineConfig) -> Result<()> {
    let config = match args.preset {
        Some(PresetArg::Default) => EngineConfig::default(),
        Some(PresetArg::Strict) => EngineConfig::strict(),
        Some(PresetArg::Lenient) => EngineConfig::lenient(),
        None => loaded.clone(),
    };
    print!("{}", config.to_toml()?);
    Ok(())
}
