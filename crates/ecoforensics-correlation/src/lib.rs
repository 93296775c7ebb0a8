//! Eco-Forensics Correlation
//!
//! Correlates environmental-damage signals with nearby facilities and the
//! companies behind them, producing a ranked, explainable [`Dossier`](ecoforensics_domain::Dossier).
//!
//! ```text
//! SignalCollections ──► scorers ──┐
//!                                 ├──► EvidenceAggregator ──► DossierAssembler ──► Dossier
//!        facilities ──► resolver ─┘
//! ```
//!
//! Missing or failed sources never abort a run: they are carried as
//! [`SourceError`](ecoforensics_domain::SourceError) records and lower the
//! confidence ceiling. Only malformed geometry or time ranges are rejected.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use ecoforensics_correlation::{build_dossier_at, SignalCollections};
//! use ecoforensics_domain::{BoundingBox, TimeWindow};
//!
//! let bbox = BoundingBox::new(101.0, 0.0, 101.5, 0.5).unwrap();
//! let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
//! let window = TimeWindow::new(now - chrono::Duration::days(90), now).unwrap();
//!
//! let dossier = build_dossier_at(bbox, window, SignalCollections::default(), now).unwrap();
//! assert!(dossier.suspects.is_empty());
//! assert_eq!(dossier.confidence_score, 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aggregator;
pub mod assembler;
pub mod config;
pub mod coverage;
pub mod engine;
pub mod error;
pub mod intake;

pub use aggregator::{completeness_factor, confidence_score, rank_chains, Aggregation, EvidenceAggregator};
pub use assembler::{DossierAssembler, Findings};
pub use config::{default_expected_sources, EngineConfig, WeightTable};
pub use coverage::{CoverageCatalog, CoverageClass, DatasetCoverage};
pub use engine::{build_dossier, build_dossier_at, CorrelationEngine, SignalCollections};
pub use error::{ConfigError, CorrelationError, Result};
pub use intake::{collect_source, SourceLedger};
