//! Eco-Forensics Domain Layer
//!
//! This crate contains the value objects shared by every other layer of the
//! evidence correlation engine. It performs no I/O and holds no state; every
//! type here is constructed fresh per request and never mutated afterwards.
//!
//! ## Key Concepts
//!
//! - **Signals**: fire detections, deforestation alerts, spectral readings,
//!   infrastructure nodes and sentiment samples handed in by collaborators
//! - **Suspects**: corporate identities resolved from infrastructure names
//! - **Evidence**: weighted, typed links tying a suspect to observed damage
//! - **Dossier**: the assembled output record for one investigative request
//!
//! ## Absence is not zero
//!
//! Every optional reading is an `Option`. A missing NDVI value is `None`,
//! while `Some(0.0)` is a genuine (and damning) reading. No layer may collapse
//! one into the other.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod company;
pub mod dossier;
pub mod error;
pub mod evidence;
pub mod geo;
pub mod sentiment;
pub mod signals;
pub mod traits;

// Re-exports for convenience
pub use company::{CorporateCandidate, ResolvedSuspect};
pub use dossier::{CoverageNote, CoverageStatus, Dossier, DossierId, SourceError};
pub use error::ValidationError;
pub use evidence::{EvidenceCandidate, EvidenceChain, EvidenceKind, EvidenceLink, SupportingData};
pub use geo::{BoundingBox, GeoPoint, TimeWindow};
pub use sentiment::{CombinedSentiment, SentimentChannel, SentimentSample};
pub use signals::{
    AlertSource, DamageEvent, DamageKind, DeforestationAlert, FireEvent, ForestLossStats,
    InfrastructureNode, SpectralEvidence,
};
pub use traits::SimilarityMetric;
