//! The assembled forensic dossier and its error/coverage records

use crate::{
    BoundingBox, CombinedSentiment, DeforestationAlert, EvidenceChain, FireEvent, ForestLossStats,
    InfrastructureNode, ResolvedSuspect, SpectralEvidence,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Longest error message kept on a [`SourceError`]
pub const MAX_ERROR_MESSAGE_CHARS: usize = 500;

/// Unique dossier identifier (UUIDv7 for time-ordering)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DossierId(Uuid);

impl DossierId {
    /// Generate a new time-ordered identifier
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Wrap an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Inner UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DossierId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DossierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A signal source that failed or timed out upstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceError {
    /// Source (dataset) name
    pub source: String,
    /// Error kind, e.g. "Timeout"
    pub error_type: String,
    /// Message, truncated to [`MAX_ERROR_MESSAGE_CHARS`]
    pub message: String,
    /// Whether a retry might succeed
    pub retryable: bool,
    /// When the failure was recorded
    pub timestamp: DateTime<Utc>,
}

impl SourceError {
    /// Record a failure now
    pub fn new(
        source: impl Into<String>,
        error_type: impl Into<String>,
        message: impl AsRef<str>,
        retryable: bool,
    ) -> Self {
        Self {
            source: source.into(),
            error_type: error_type.into(),
            message: message.as_ref().chars().take(MAX_ERROR_MESSAGE_CHARS).collect(),
            retryable,
            timestamp: Utc::now(),
        }
    }
}

/// Coverage status of a dataset for the requested region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageStatus {
    /// Dataset covers the region
    Available,
    /// Dataset does not cover the region and was not queried
    Skipped,
    /// Dataset covers the region with caveats
    Partial,
}

/// Note about a dataset's coverage limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageNote {
    /// Dataset name
    pub dataset: String,
    /// Coverage status
    pub status: CoverageStatus,
    /// Explanation
    #[serde(default)]
    pub reason: Option<String>,
}

impl CoverageNote {
    /// Create a note
    pub fn new(dataset: impl Into<String>, status: CoverageStatus, reason: Option<String>) -> Self {
        Self {
            dataset: dataset.into(),
            status,
            reason,
        }
    }
}

/// Complete forensic dossier for one region and period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dossier {
    /// Identifier
    pub dossier_id: DossierId,
    /// Optional region label
    pub region: Option<String>,
    /// Region of interest
    pub bbox: BoundingBox,
    /// Generation instant
    pub generated_at: DateTime<Utc>,
    /// Analysis window start
    pub analysis_period_start: DateTime<Utc>,
    /// Analysis window end
    pub analysis_period_end: DateTime<Utc>,

    /// Forest-loss statistics
    pub forest_loss: Option<ForestLossStats>,
    /// Fire detections
    pub fires: Vec<FireEvent>,
    /// Optical deforestation alerts
    pub optical_alerts: Vec<DeforestationAlert>,
    /// Radar deforestation alerts
    pub radar_alerts: Vec<DeforestationAlert>,
    /// Spectral readings
    pub spectral: Option<SpectralEvidence>,
    /// Nearby facilities
    pub nearby_infrastructure: Vec<InfrastructureNode>,

    /// Resolved suspects, in ranked order
    pub suspects: Vec<ResolvedSuspect>,
    /// Fused sentiment
    pub sentiment: CombinedSentiment,
    /// Evidence chains, in ranked order
    pub evidence_chain: Vec<EvidenceChain>,
    /// Overall confidence in [0, 100]
    pub confidence_score: u8,

    /// Upstream failures
    pub source_errors: Vec<SourceError>,
    /// Dataset coverage notes
    pub coverage_notes: Vec<CoverageNote>,
}

impl Dossier {
    /// Highest-ranked chain, if any suspect was found
    pub fn lead_suspect(&self) -> Option<&EvidenceChain> {
        self.evidence_chain.first()
    }
}
