//! Evidence aggregation: scorer outputs to ranked, weighted chains

use crate::{EngineConfig, WeightTable};
use ecoforensics_domain::{
    CoverageNote, CoverageStatus, EvidenceCandidate, EvidenceChain, EvidenceKind, EvidenceLink,
    ResolvedSuspect, SourceError,
};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Maximum evidence types named in a chain summary
const SUMMARY_TOP_N: usize = 3;

/// Output of one aggregation run
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    /// Chains in ranked order
    pub chains: Vec<EvidenceChain>,
    /// Fraction of expected sources available, in (0, 1]
    pub completeness: f64,
    /// Overall confidence in [0, 100]
    pub confidence_score: u8,
}

/// Combines scorer outputs per suspect into evidence chains
#[derive(Debug, Clone)]
pub struct EvidenceAggregator {
    weights: WeightTable,
    min_significance: f64,
}

impl EvidenceAggregator {
    /// Create an aggregator with an explicit weight table and threshold
    pub fn new(weights: WeightTable, min_significance: f64) -> Self {
        Self {
            weights,
            min_significance,
        }
    }

    /// Create an aggregator from the engine configuration
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.weights.clone(), config.min_significance)
    }

    /// Build one suspect's chain
    ///
    /// Links follow evidence priority order. Only the first candidate of each
    /// kind is considered; sub-scores at or below the significance threshold
    /// are dropped.
    pub fn build_chain(&self, suspect: ResolvedSuspect, candidates: &[EvidenceCandidate]) -> EvidenceChain {
        let links: Vec<EvidenceLink> = EvidenceKind::ALL
            .iter()
            .filter_map(|kind| candidates.iter().find(|c| c.kind == *kind))
            .filter(|c| c.sub_score > self.min_significance)
            .map(|c| EvidenceLink {
                evidence_type: c.kind,
                weight: (self.weights.weight(c.kind) * c.sub_score).clamp(0.0, 1.0),
                description: c.description.clone(),
                supporting_data: c.supporting_data.clone(),
            })
            .collect();

        let total_weight = links.iter().map(|l| l.weight).sum::<f64>().min(1.0);
        let summary = summarize(suspect.display_name(), &links);

        EvidenceChain {
            suspect,
            links,
            total_weight,
            summary,
        }
    }

    /// Build, rank and score every chain
    ///
    /// `regional` evidence applies to every suspect; each suspect's own
    /// candidates come first.
    pub fn aggregate(
        &self,
        suspects: Vec<(ResolvedSuspect, Vec<EvidenceCandidate>)>,
        regional: &[EvidenceCandidate],
        expected_sources: &[String],
        source_errors: &[SourceError],
        coverage_notes: &[CoverageNote],
    ) -> Aggregation {
        let mut chains: Vec<EvidenceChain> = suspects
            .into_iter()
            .map(|(suspect, mut candidates)| {
                candidates.extend(regional.iter().cloned());
                self.build_chain(suspect, &candidates)
            })
            .collect();
        rank_chains(&mut chains);

        let completeness = completeness_factor(expected_sources, source_errors, coverage_notes);
        let confidence_score = confidence_score(&chains, completeness);

        Aggregation {
            chains,
            completeness,
            confidence_score,
        }
    }
}

impl Default for EvidenceAggregator {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

/// Linked suspects first, then heavier chains, then name
pub fn rank_chains(chains: &mut [EvidenceChain]) {
    chains.sort_by(|a, b| {
        b.has_links()
            .cmp(&a.has_links())
            .then_with(|| b.total_weight.partial_cmp(&a.total_weight).unwrap_or(Ordering::Equal))
            .then_with(|| a.suspect.normalized_name.cmp(&b.suspect.normalized_name))
    });
}

/// `(expected − unavailable + 1) / (expected + 1)`
///
/// A source is unavailable if it has a source error or a `skipped` note; a
/// `partial` note counts as half.
pub fn completeness_factor(
    expected_sources: &[String],
    source_errors: &[SourceError],
    coverage_notes: &[CoverageNote],
) -> f64 {
    let expected: BTreeSet<&str> = expected_sources.iter().map(String::as_str).collect();
    let failed: BTreeSet<&str> = source_errors
        .iter()
        .map(|e| e.source.as_str())
        .chain(
            coverage_notes
                .iter()
                .filter(|n| n.status == CoverageStatus::Skipped)
                .map(|n| n.dataset.as_str()),
        )
        .collect();
    let partial: BTreeSet<&str> = coverage_notes
        .iter()
        .filter(|n| n.status == CoverageStatus::Partial)
        .map(|n| n.dataset.as_str())
        .collect();

    let unavailable: f64 = expected
        .iter()
        .map(|source| {
            if failed.contains(source) {
                1.0
            } else if partial.contains(source) {
                0.5
            } else {
                0.0
            }
        })
        .sum();

    let n = expected.len() as f64;
    ((n - unavailable + 1.0) / (n + 1.0)).clamp(0.0, 1.0)
}

/// `round(100 × max total_weight × completeness)`, 0 with no chains
pub fn confidence_score(chains: &[EvidenceChain], completeness: f64) -> u8 {
    let max_weight = chains.iter().map(|c| c.total_weight).fold(0.0_f64, f64::max);
    let raw = (100.0 * max_weight * completeness).round();
    if raw.is_finite() {
        raw.clamp(0.0, 100.0) as u8
    } else {
        0
    }
}

fn summarize(name: &str, links: &[EvidenceLink]) -> String {
    if links.is_empty() {
        return format!("Limited evidence linking {} to observed damage", name);
    }

    let mut top: Vec<&EvidenceLink> = links.iter().collect();
    top.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(Ordering::Equal)
            .then(a.evidence_type.cmp(&b.evidence_type))
    });
    top.truncate(SUMMARY_TOP_N);
    top.sort_by_key(|l| l.evidence_type);

    let phrases: Vec<&str> = top.iter().map(|l| l.evidence_type.summary_phrase()).collect();
    format!("{}: {}", name, phrases.join("; "))
}
