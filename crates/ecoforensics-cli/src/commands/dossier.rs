//! Dossier command implementation.

use crate::cli::DossierArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use ecoforensics_correlation::{CorrelationEngine, CoverageCatalog, EngineConfig, SignalCollections};
use ecoforensics_domain::{BoundingBox, Dossier, TimeWindow};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Default analysis window when no dates are given
const DEFAULT_WINDOW_DAYS: i64 = 90;

/// Signal bundle file: the collections plus an optional bounding box
#[derive(Debug, Default, Deserialize)]
pub struct SignalBundle {
    /// Box used when `--bbox` is not given
    #[serde(default)]
    pub bbox: Option<BoundingBox>,

    /// Signal collections
    #[serde(flatten)]
    pub signals: SignalCollections,
}

impl SignalBundle {
    /// Read a bundle from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Resolve `--start`/`--end` into a window ending at `now` by default.
pub fn analysis_window(start: Option<NaiveDate>, end: Option<NaiveDate>, now: DateTime<Utc>) -> Result<TimeWindow> {
    let end = match end {
        Some(date) => date.and_time(NaiveTime::MIN).and_utc() + Duration::days(1) - Duration::seconds(1),
        None => now,
    };
    let start = match start {
        Some(date) => date.and_time(NaiveTime::MIN).and_utc(),
        None => end - Duration::days(DEFAULT_WINDOW_DAYS),
    };
    TimeWindow::new(start, end).map_err(|e| CliError::InvalidInput(e.to_string()))
}

/// Build the dossier described by the arguments.
pub fn run_dossier(args: &DossierArgs, config: &EngineConfig, now: DateTime<Utc>) -> Result<Dossier> {
    let bundle = SignalBundle::from_file(&args.signals)?;
    let bbox = args.bbox.or(bundle.bbox).ok_or_else(|| {
        CliError::InvalidInput("No bounding box: pass --bbox or set \"bbox\" in the bundle".to_string())
    })?;
    let window = analysis_window(args.start, args.end, now)?;

    let mut signals = bundle.signals;
    if let Some(region) = &args.region {
        signals.region = Some(region.clone());
    }
    if args.assess_coverage {
        let notes = CoverageCatalog::default().assess(&bbox);
        debug!("Coverage assessment added {} note(s)", notes.len());
        for note in notes {
            if !signals.coverage_notes.iter().any(|n| n.dataset == note.dataset) {
                signals.coverage_notes.push(note);
            }
        }
    }

    info!("Building dossier from {}", args.signals.display());
    let engine = CorrelationEngine::new(config.clone())?;
    Ok(engine.build_dossier_at(bbox, window, signals, now)?)
}

/// Execute the dossier command.
pub fn execute_dossier(args: DossierArgs, config: &EngineConfig, formatter: &Formatter) -> Result<()> {
    let dossier = run_dossier(&args, config, Utc::now())?;
    println!("{}", formatter.format_dossier(&dossier)?);
    Ok(())
}
