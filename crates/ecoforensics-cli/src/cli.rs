//! CLI command definitions and argument parsing.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use ecoforensics_domain::BoundingBox;
use std::path::PathBuf;

/// Eco-Forensics - Correlate environmental damage with the companies nearby.
#[derive(Debug, Parser)]
#[command(name = "ecoforensics")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Engine configuration file path
    #[arg(short, long, global = true, env = "ECOFORENSICS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (scores and names only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build an evidence dossier from a signal bundle
    Dossier(DossierArgs),

    /// Normalize company names
    Normalize(NormalizeArgs),

    /// Rank candidate names against a query
    Match(MatchArgs),

    /// Print the effective engine configuration
    Config(ConfigArgs),
}

/// Arguments for the dossier command.
#[derive(Debug, Parser)]
pub struct DossierArgs {
    /// Signal bundle (JSON)
    #[arg(short, long)]
    pub signals: PathBuf,

    /// Bounding box as min_lon,min_lat,max_lon,max_lat
    #[arg(short, long, allow_hyphen_values = true)]
    pub bbox: Option<BoundingBox>,

    /// Analysis start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Analysis end date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Region label, overriding the bundle's
    #[arg(short, long)]
    pub region: Option<String>,

    /// Add coverage notes for datasets that do not cover the box
    #[arg(long)]
    pub assess_coverage: bool,
}

/// Arguments for the normalize command.
#[derive(Debug, Parser)]
pub struct NormalizeArgs {
    /// Names to normalize
    #[arg(required = true)]
    pub names: Vec<String>,
}

/// Arguments for the match command.
#[derive(Debug, Parser)]
pub struct MatchArgs {
    /// Name to look up
    pub query: String,

    /// Candidate names (repeatable)
    #[arg(short = 'n', long = "candidate", required = true)]
    pub candidates: Vec<String>,

    /// Minimum similarity (0-100); defaults to the configured threshold
    #[arg(short, long)]
    pub threshold: Option<f64>,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    /// Print a built-in preset instead of the loaded configuration
    #[arg(short, long, value_enum)]
    pub preset: Option<PresetArg>,
}

/// Built-in configuration presets.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum PresetArg {
    /// Default settings
    Default,
    /// 2 km radius, 7-day window, high match threshold
    Strict,
    /// 10 km radius, 30-day window, low match threshold
    Lenient,
}
