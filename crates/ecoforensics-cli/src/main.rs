//! Eco-Forensics CLI - build evidence dossiers from collected signals.

use anyhow::Context;
use clap::Parser;
use ecoforensics_cli::commands;
use ecoforensics_cli::{config, Cli, Command, Formatter, OutputFormat};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Log to stderr so stdout stays machine-readable
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let engine_config = config::load(cli.config.as_deref()).context("loading engine configuration")?;

    let format = cli.format.map(OutputFormat::from).unwrap_or_default();
    let formatter = Formatter::new(format, !cli.no_color);

    match cli.command {
        Command::Dossier(args) => commands::execute_dossier(args, &engine_config, &formatter)?,
        Command::Normalize(args) => commands::execute_normalize(args, &formatter)?,
        Command::Match(args) => commands::execute_match(args, &engine_config, &formatter)?,
        Command::Config(args) => commands::execute_config(args, &engine_config)?,
    }

    Ok(())
}
