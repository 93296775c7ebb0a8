//! Vegetation and burn severity from index readings

use crate::ScoringConfig;
use ecoforensics_domain::{EvidenceCandidate, EvidenceKind, SpectralEvidence};

/// The three independent spectral sub-scores
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpectralScores {
    /// Vegetation loss score in [0, 1]
    pub ndvi_score: f64,
    /// Burn-scar score in [0, 1]
    pub nbr_score: f64,
    /// Burn severity score in [0, 1]
    pub burn_score: f64,
    readings: SpectralEvidence,
}

impl SpectralScores {
    /// One evidence candidate per sub-score, NDVI first
    pub fn candidates(&self) -> Vec<EvidenceCandidate> {
        let ndvi = match self.readings.ndvi {
            Some(v) => EvidenceCandidate::new(
                EvidenceKind::SpectralNdvi,
                self.ndvi_score,
                format!("NDVI {:.2} indicates vegetation loss", v),
            )
            .with_data("ndvi", v),
            None => EvidenceCandidate::new(EvidenceKind::SpectralNdvi, 0.0, "NDVI reading not available"),
        };

        let nbr = match self.readings.nbr {
            Some(v) => EvidenceCandidate::new(
                EvidenceKind::SpectralNbr,
                self.nbr_score,
                if v < 0.0 {
                    format!("Negative NBR {:.2} indicates a burn scar", v)
                } else {
                    format!("NBR {:.2} below burn threshold", v)
                },
            )
            .with_data("nbr", v),
            None => EvidenceCandidate::new(EvidenceKind::SpectralNbr, 0.0, "NBR reading not available"),
        };

        let burn = match self.readings.burn_index {
            Some(v) => EvidenceCandidate::new(
                EvidenceKind::SpectralBurn,
                self.burn_score,
                format!("Burn index {:.2}", v),
            )
            .with_data("burn_index", v),
            None => EvidenceCandidate::new(EvidenceKind::SpectralBurn, 0.0, "Burn index not available"),
        };

        let mut out = vec![ndvi, nbr, burn];
        if let Some(at) = self.readings.acquired_at {
            for candidate in &mut out {
                candidate
                    .supporting_data
                    .insert("acquired_at".to_string(), at.to_rfc3339().into());
            }
        }
        out
    }
}

/// Scores index readings against fixed healthy/burn baselines
#[derive(Debug, Clone)]
pub struct SpectralDamageScorer {
    healthy_ndvi: f64,
    nbr_threshold: f64,
    burn_max: f64,
}

impl SpectralDamageScorer {
    /// Create a scorer from the shared configuration
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self {
            healthy_ndvi: config.healthy_ndvi,
            nbr_threshold: config.nbr_threshold,
            burn_max: config.burn_max,
        }
    }

    /// NDVI sub-score; lower NDVI scores higher
    pub fn ndvi_score(&self, ndvi: Option<f64>) -> f64 {
        match finite(ndvi) {
            Some(v) if self.healthy_ndvi > 0.0 => ((self.healthy_ndvi - v) / self.healthy_ndvi).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    /// NBR sub-score; negative NBR is a burn scar
    pub fn nbr_score(&self, nbr: Option<f64>) -> f64 {
        match finite(nbr) {
            Some(v) if v < 0.0 => (-v).clamp(0.0, 1.0),
            Some(v) if self.nbr_threshold > 0.0 => ((self.nbr_threshold - v) / self.nbr_threshold).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    /// Burn index sub-score
    pub fn burn_score(&self, burn_index: Option<f64>) -> f64 {
        match finite(burn_index) {
            Some(v) if self.burn_max > 0.0 => (v / self.burn_max).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    /// Score optional readings; absent readings score 0
    pub fn score(&self, evidence: Option<&SpectralEvidence>) -> SpectralScores {
        let Some(evidence) = evidence else {
            return SpectralScores::default();
        };
        SpectralScores {
            ndvi_score: self.ndvi_score(evidence.ndvi),
            nbr_score: self.nbr_score(evidence.nbr),
            burn_score: self.burn_score(evidence.burn_index),
            readings: evidence.clone(),
        }
    }
}

impl Default for SpectralDamageScorer {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_ndvi(ndvi: Option<f64>) -> SpectralEvidence {
        SpectralEvidence {
            ndvi,
            ..Default::default()
        }
    }

    #[test]
    fn test_low_ndvi_scores_high() {
        let scorer = SpectralDamageScorer::default();
        let scores = scorer.score(Some(&with_ndvi(Some(0.1))));
        assert!(scores.ndvi_score > 0.5);
    }

    #[test]
    fn test_healthy_ndvi_scores_low() {
        let scorer = SpectralDamageScorer::default();
        let scores = scorer.score(Some(&with_ndvi(Some(0.8))));
        assert!(scores.ndvi_score < 0.3);
        assert_eq!(scores.ndvi_score, 0.0);
    }

    #[test]
    fn test_absent_is_not_zero_reading() {
        let scorer = SpectralDamageScorer::default();
        assert_eq!(scorer.score(Some(&with_ndvi(None))).ndvi_score, 0.0);
        assert_eq!(scorer.score(Some(&with_ndvi(Some(0.0)))).ndvi_score, 1.0);
    }

    #[test]
    fn test_no_evidence_all_zero() {
        let scores = SpectralDamageScorer::default().score(None);
        assert_eq!(scores.ndvi_score, 0.0);
        assert_eq!(scores.nbr_score, 0.0);
        assert_eq!(scores.burn_score, 0.0);
        assert!(scores.candidates().iter().all(|c| c.sub_score == 0.0));
    }

    #[test]
    fn test_nbr_branches() {
        let scorer = SpectralDamageScorer::default();
        assert!((scorer.nbr_score(Some(-0.4)) - 0.4).abs() < 1e-12);
        assert_eq!(scorer.nbr_score(Some(-2.0)), 1.0);
        assert_eq!(scorer.nbr_score(Some(0.0)), 1.0);
        assert!((scorer.nbr_score(Some(0.15)) - 0.5).abs() < 1e-12);
        assert_eq!(scorer.nbr_score(Some(0.5)), 0.0);
    }

    #[test]
    fn test_burn_score() {
        let scorer = SpectralDamageScorer::default();
        assert!((scorer.burn_score(Some(0.25)) - 0.5).abs() < 1e-12);
        assert_eq!(scorer.burn_score(Some(0.9)), 1.0);
        assert_eq!(scorer.burn_score(Some(-0.1)), 0.0);
    }

    #[test]
    fn test_non_finite_treated_as_absent() {
        let scorer = SpectralDamageScorer::default();
        assert_eq!(scorer.ndvi_score(Some(f64::NAN)), 0.0);
    }

    #[test]
    fn test_candidates_order_and_data() {
        let evidence = SpectralEvidence {
            ndvi: Some(0.2),
            nbr: Some(-0.3),
            burn_index: None,
            ..Default::default()
        };
        let candidates = SpectralDamageScorer::default().score(Some(&evidence)).candidates();
        let kinds: Vec<EvidenceKind> = candidates.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![EvidenceKind::SpectralNdvi, EvidenceKind::SpectralNbr, EvidenceKind::SpectralBurn]
        );
        assert!(candidates[1].description.contains("burn scar"));
        assert_eq!(candidates[2].sub_score, 0.0);
    }
}
