//! Eco-Forensics Scorers
//!
//! Pure, stateless scoring functions that turn raw signal collections into
//! sub-scores in [0, 1]. Each scorer is deterministic and safe to call in
//! parallel; none of them ever fails on empty input.
//!
//! | Scorer | Input | Output |
//! |--------|-------|--------|
//! | [`GeospatialProximityScorer`] | facilities + damage events | score + close pairs |
//! | [`TemporalCorrelationScorer`] | fires + clearing alerts | score + day gaps |
//! | [`SpectralDamageScorer`] | optional index readings | three sub-scores |
//! | [`AlertDensityScorer`] | alert count + bounding box | score + class |
//! | [`SentimentFusion`] | channel samples | [`CombinedSentiment`](ecoforensics_domain::CombinedSentiment) |
//!
//! Degenerate divisors (zero radius, zero window, zero area, zero saturation)
//! produce a score of 0 rather than an error.
//!
//! # Example
//!
//! ```
//! use ecoforensics_scoring::{ScoringConfig, SpectralDamageScorer};
//! use ecoforensics_domain::SpectralEvidence;
//!
//! let scorer = SpectralDamageScorer::from_config(&ScoringConfig::default());
//! let scores = scorer.score(Some(&SpectralEvidence { ndvi: Some(0.1), ..Default::default() }));
//! assert!(scores.ndvi_score > 0.5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod density;
pub mod proximity;
pub mod sentiment;
pub mod spectral;
pub mod temporal;

pub use config::{ChannelWeights, ScoringConfig};
pub use density::{AlertDensityScorer, DensityClass, DensityScore};
pub use proximity::{GeospatialProximityScorer, ProximityDetail, ProximityScore};
pub use sentiment::{sentiment_candidate, SentimentFusion};
pub use spectral::{SpectralDamageScorer, SpectralScores};
pub use temporal::{TemporalCorrelationScorer, TemporalDetail, TemporalScore};

/// `min(1, total / saturation_count)`, or 0 when the count is 0
pub(crate) fn saturate(total: f64, saturation_count: u32) -> f64 {
    if saturation_count == 0 {
        tracing::debug!("Degenerate saturation_count 0, score is 0");
        return 0.0;
    }
    if !total.is_finite() || total <= 0.0 {
        return 0.0;
    }
    (total / f64::from(saturation_count)).min(1.0)
}
