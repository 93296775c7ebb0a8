//! Evidence links and chains

use crate::ResolvedSuspect;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Free-form supporting detail attached to a link
pub type SupportingData = BTreeMap<String, serde_json::Value>;

/// Evidence types, in fixed priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceKind {
    /// Facility close to observed damage
    SpatialProximity,
    /// Fires and alerts close in time
    TemporalCorrelation,
    /// Depressed vegetation index
    SpectralNdvi,
    /// Burn-scar signature
    SpectralNbr,
    /// Burn severity index
    SpectralBurn,
    /// Negative media coverage
    NegativeSentiment,
    /// High alert concentration
    AlertDensity,
}

impl EvidenceKind {
    /// All kinds in priority order
    pub const ALL: [EvidenceKind; 7] = [
        EvidenceKind::SpatialProximity,
        EvidenceKind::TemporalCorrelation,
        EvidenceKind::SpectralNdvi,
        EvidenceKind::SpectralNbr,
        EvidenceKind::SpectralBurn,
        EvidenceKind::NegativeSentiment,
        EvidenceKind::AlertDensity,
    ];

    /// Wire tag
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceKind::SpatialProximity => "spatial_proximity",
            EvidenceKind::TemporalCorrelation => "temporal_correlation",
            EvidenceKind::SpectralNdvi => "spectral_ndvi",
            EvidenceKind::SpectralNbr => "spectral_nbr",
            EvidenceKind::SpectralBurn => "spectral_burn",
            EvidenceKind::NegativeSentiment => "negative_sentiment",
            EvidenceKind::AlertDensity => "alert_density",
        }
    }

    /// Short phrase used in chain summaries
    pub fn summary_phrase(&self) -> &'static str {
        match self {
            EvidenceKind::SpatialProximity => "facility located near observed damage",
            EvidenceKind::TemporalCorrelation => "fires coincide with clearing alerts",
            EvidenceKind::SpectralNdvi => "vegetation loss in satellite imagery",
            EvidenceKind::SpectralNbr => "burn scar signature detected",
            EvidenceKind::SpectralBurn => "elevated burn severity",
            EvidenceKind::NegativeSentiment => "negative media coverage",
            EvidenceKind::AlertDensity => "high concentration of alerts",
        }
    }
}

impl std::fmt::Display for EvidenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scored piece of evidence before weighting
///
/// Scorers emit these; the aggregator decides which become links.
#[derive(Debug, Clone, PartialEq)]
pub struct EvidenceCandidate {
    /// Evidence type
    pub kind: EvidenceKind,
    /// Raw sub-score in [0, 1]
    pub sub_score: f64,
    /// Human-readable description
    pub description: String,
    /// Supporting detail
    pub supporting_data: SupportingData,
}

impl EvidenceCandidate {
    /// Create a candidate with the sub-score clamped to [0, 1]
    pub fn new(kind: EvidenceKind, sub_score: f64, description: impl Into<String>) -> Self {
        let sub_score = if sub_score.is_finite() {
            sub_score.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            kind,
            sub_score,
            description: description.into(),
            supporting_data: SupportingData::new(),
        }
    }

    /// Attach one supporting datum
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.supporting_data.insert(key.into(), value.into());
        self
    }
}

/// One weighted link in an evidence chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceLink {
    /// Evidence type tag
    pub evidence_type: EvidenceKind,
    /// Contribution to total weight, in [0, 1]
    pub weight: f64,
    /// Human-readable description
    pub description: String,
    /// Supporting detail
    #[serde(default)]
    pub supporting_data: SupportingData,
}

/// Everything tying one suspect to the observed damage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceChain {
    /// The suspect
    pub suspect: ResolvedSuspect,
    /// Included links, in priority order
    pub links: Vec<EvidenceLink>,
    /// Sum of link weights, capped at 1.0
    pub total_weight: f64,
    /// Human-readable summary
    pub summary: String,
}

impl EvidenceChain {
    /// Whether any link survived the significance threshold
    pub fn has_links(&self) -> bool {
        !self.links.is_empty()
    }
}
