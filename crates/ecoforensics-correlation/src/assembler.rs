//! Dossier assembly

use crate::{Result, SignalCollections};
use chrono::{DateTime, Utc};
use ecoforensics_domain::{
    BoundingBox, CombinedSentiment, Dossier, DossierId, EvidenceChain, ResolvedSuspect, TimeWindow,
};

/// Composes the immutable [`Dossier`]
///
/// Only [`DossierAssembler::validate`] can fail; it runs before any scoring.
#[derive(Debug, Clone, Default)]
pub struct DossierAssembler;

/// Computed parts of a dossier
#[derive(Debug, Clone)]
pub struct Findings {
    /// Suspects in ranked order
    pub suspects: Vec<ResolvedSuspect>,
    /// Fused sentiment
    pub sentiment: CombinedSentiment,
    /// Evidence chains in ranked order
    pub evidence_chain: Vec<EvidenceChain>,
    /// Overall confidence in [0, 100]
    pub confidence_score: u8,
}

impl DossierAssembler {
    /// Create an assembler
    pub fn new() -> Self {
        Self
    }

    /// Reject inverted, out-of-range or non-finite geometry and time ranges
    pub fn validate(&self, bbox: &BoundingBox, window: &TimeWindow) -> Result<()> {
        bbox.validate()?;
        window.validate()?;
        Ok(())
    }

    /// Compose the dossier from raw collections and computed findings
    pub fn assemble(
        &self,
        bbox: BoundingBox,
        window: TimeWindow,
        signals: SignalCollections,
        findings: Findings,
        generated_at: DateTime<Utc>,
    ) -> Dossier {
        Dossier {
            dossier_id: DossierId::new(),
            region: signals.region,
            bbox,
            generated_at,
            analysis_period_start: window.start,
            analysis_period_end: window.end,
            forest_loss: signals.forest_loss,
            fires: signals.fires,
            optical_alerts: signals.optical_alerts,
            radar_alerts: signals.radar_alerts,
            spectral: signals.spectral,
            nearby_infrastructure: signals.infrastructure,
            suspects: findings.suspects,
            sentiment: findings.sentiment,
            evidence_chain: findings.evidence_chain,
            confidence_score: findings.confidence_score.min(100),
            source_errors: signals.source_errors,
            coverage_notes: signals.coverage_notes,
        }
    }
}
