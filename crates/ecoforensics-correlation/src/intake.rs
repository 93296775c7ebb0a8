//! Intake of collaborator-fetched signal collections
//!
//! Collaborators own the network calls. Intake only bounds each one with a
//! timeout and turns failures into [`SourceError`] records plus absence, so a
//! single slow or broken provider never aborts a dossier.

use crate::config::EngineConfig;
use ecoforensics_domain::{CoverageNote, SourceError};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Await a collaborator future under a timeout
///
/// Errors become `FetchError`, elapsed time becomes `Timeout`; both are
/// marked retryable.
pub async fn collect_source<T, E, F>(source: &str, limit: Duration, fetch: F) -> Result<T, SourceError>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    match timeout(limit, fetch).await {
        Ok(Ok(value)) => {
            debug!("Source '{}' delivered", source);
            Ok(value)
        }
        Ok(Err(e)) => {
            warn!("Source '{}' failed: {}", source, e);
            Err(SourceError::new(source, "FetchError", e.to_string(), true))
        }
        Err(_) => {
            warn!("Source '{}' timed out after {:?}", source, limit);
            Err(SourceError::new(
                source,
                "Timeout",
                format!("No response within {} ms", limit.as_millis()),
                true,
            ))
        }
    }
}

/// Accumulates source errors and coverage notes for one request
#[derive(Debug, Default, Clone)]
pub struct SourceLedger {
    limit: Duration,
    errors: Vec<SourceError>,
    notes: Vec<CoverageNote>,
}

impl SourceLedger {
    /// Ledger applying `limit` to every collected source
    pub fn new(limit: Duration) -> Self {
        Self {
            limit,
            errors: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Ledger using the configured per-source timeout
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.source_timeout())
    }

    /// Collect one source, recording any failure; `None` means absent
    pub async fn collect<T, E, F>(&mut self, source: &str, fetch: F) -> Option<T>
    where
        F: Future<Output = Result<T, E>>,
        E: Display,
    {
        match collect_source(source, self.limit, fetch).await {
            Ok(value) => Some(value),
            Err(err) => {
                self.errors.push(err);
                None
            }
        }
    }

    /// Record a failure reported outside of [`SourceLedger::collect`]
    pub fn record_error(&mut self, error: SourceError) {
        self.errors.push(error);
    }

    /// Add coverage notes
    pub fn add_notes(&mut self, notes: impl IntoIterator<Item = CoverageNote>) {
        self.notes.extend(notes);
    }

    /// Recorded errors
    pub fn errors(&self) -> &[SourceError] {
        &self.errors
    }

    /// Recorded notes
    pub fn notes(&self) -> &[CoverageNote] {
        &self.notes
    }

    /// Consume into (errors, notes)
    pub fn into_parts(self) -> (Vec<SourceError>, Vec<CoverageNote>) {
        (self.errors, self.notes)
    }
}
