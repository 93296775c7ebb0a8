//! Normalize command implementation.

use crate::cli::NormalizeArgs;
use crate::error::Result;
use crate::output::Formatter;
use ecoforensics_resolver::normalize;

/// Execute the normalize command.
pub fn execute_normalize(args: NormalizeArgs, formatter: &Formatter) -> Result<()> {
    let pairs: Vec<(String, String)> = args
        .names
        .into_iter()
        .map(|name| {
            let normalized = normalize(&name);
            (name, normalized)
        })
        .collect();

    println!("{}", formatter.format_normalized(&pairs)?);
    Ok(())
}
