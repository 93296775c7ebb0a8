//! Match command implementation.

use crate::cli::MatchArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use ecoforensics_correlation::EngineConfig;
use ecoforensics_resolver::{EntityResolver, NameMatch};

/// Rank the candidates against the query.
pub fn rank_candidates(args: &MatchArgs, config: &EngineConfig) -> Result<Vec<NameMatch>> {
    let threshold = args.threshold.unwrap_or(config.resolver.match_threshold);
    if !(0.0..=100.0).contains(&threshold) {
        return Err(CliError::InvalidInput(
            "Threshold must be between 0 and 100".to_string(),
        ));
    }

    let resolver = EntityResolver::new(config.resolver.clone());
    Ok(resolver.fuzzy_match(&args.query, &args.candidates, threshold))
}

/// Execute the match command.
pub fn execute_match(args: MatchArgs, config: &EngineConfig, formatter: &Formatter) -> Result<()> {
    let matches = rank_candidates(&args, config)?;
    println!("{}", formatter.format_matches(&args.query, &matches)?);
    Ok(())
}
