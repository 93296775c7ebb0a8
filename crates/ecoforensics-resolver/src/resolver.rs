//! Entity resolution: from facility names to corporate suspects

use crate::{normalize, ResolverConfig, TokenSortRatio};
use ecoforensics_domain::{CorporateCandidate, InfrastructureNode, ResolvedSuspect, SimilarityMetric};
use std::collections::HashSet;
use tracing::{debug, warn};

/// One candidate that passed the match threshold
#[derive(Debug, Clone, PartialEq)]
pub struct NameMatch {
    /// Position of the candidate in the input slice
    pub index: usize,
    /// Candidate name as supplied
    pub name: String,
    /// Similarity in [0, 100]
    pub score: f64,
}

/// Normalizes and fuzzy-matches company names
///
/// Stateless apart from its configuration; safe to share across threads.
#[derive(Debug, Clone)]
pub struct EntityResolver<M: SimilarityMetric = TokenSortRatio> {
    config: ResolverConfig,
    metric: M,
}

impl EntityResolver<TokenSortRatio> {
    /// Create a resolver with the default token-sort metric
    pub fn new(config: ResolverConfig) -> Self {
        Self::with_metric(config, TokenSortRatio::default())
    }

    /// Create a resolver with the default configuration
    pub fn default_config() -> Self {
        Self::new(ResolverConfig::default())
    }
}

impl<M: SimilarityMetric> EntityResolver<M> {
    /// Create a resolver with a custom similarity metric
    pub fn with_metric(config: ResolverConfig, metric: M) -> Self {
        Self { config, metric }
    }

    /// Active configuration
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Normalize a company name
    pub fn normalize(&self, name: &str) -> String {
        normalize(name)
    }

    /// Similarity (0-100) between two names after normalization
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        let score = self.metric.similarity(&normalize(a), &normalize(b));
        if score.is_finite() {
            score.clamp(0.0, 100.0)
        } else {
            0.0
        }
    }

    /// Candidates scoring at least `threshold`, best first
    ///
    /// Equal scores keep their input order.
    pub fn fuzzy_match<S: AsRef<str>>(&self, query: &str, candidates: &[S], threshold: f64) -> Vec<NameMatch> {
        let mut matches: Vec<NameMatch> = candidates
            .iter()
            .enumerate()
            .filter_map(|(index, candidate)| {
                let score = self.similarity(query, candidate.as_ref());
                (score >= threshold).then(|| NameMatch {
                    index,
                    name: candidate.as_ref().to_string(),
                    score,
                })
            })
            .collect();

        // Stable: ties keep input order
        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches
    }

    /// Confidence (0-100) that `query` refers to `matched`
    ///
    /// A known legal identifier adds the configured bonus, capped at 100.
    pub fn match_confidence(&self, query: &str, matched: &str, identifier_found: bool) -> f64 {
        let base = self.similarity(query, matched);
        if identifier_found {
            (base + self.config.identifier_bonus).min(100.0)
        } else {
            base
        }
    }

    /// One suspect per distinct normalized name, in first-encounter order
    ///
    /// Names come from facility names and tags first, then from corporate
    /// candidates that no facility name already matched as best.
    pub fn resolve_suspects(
        &self,
        infrastructure: &[InfrastructureNode],
        candidates: &[CorporateCandidate],
    ) -> Vec<ResolvedSuspect> {
        let candidate_names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
        let mut seen: HashSet<String> = HashSet::new();
        let mut matched_best: HashSet<usize> = HashSet::new();
        let mut suspects = Vec::new();

        let facility_names = infrastructure.iter().flat_map(|node| node.candidate_names());
        for name in facility_names {
            let normalized = normalize(name);
            if normalized.is_empty() || !seen.insert(normalized.clone()) {
                continue;
            }
            let (suspect, best_index) = self.resolve_one(normalized, candidates, &candidate_names);
            if let Some(index) = best_index {
                matched_best.insert(index);
            }
            suspects.push(suspect);
        }

        for (index, candidate) in candidates.iter().enumerate() {
            if matched_best.contains(&index) {
                continue;
            }
            let normalized = normalize(&candidate.name);
            if normalized.is_empty() || !seen.insert(normalized.clone()) {
                continue;
            }
            let (suspect, _) = self.resolve_one(normalized, candidates, &candidate_names);
            suspects.push(suspect);
        }

        debug!(
            "Resolved {} suspect(s) from {} facilities and {} candidates",
            suspects.len(),
            infrastructure.len(),
            candidates.len()
        );
        suspects
    }

    fn resolve_one(
        &self,
        normalized: String,
        candidates: &[CorporateCandidate],
        candidate_names: &[&str],
    ) -> (ResolvedSuspect, Option<usize>) {
        let matches = self.fuzzy_match(&normalized, candidate_names, self.config.match_threshold);
        let Some(best) = matches.first() else {
            let unmatched = ResolvedSuspect {
                normalized_name: normalized,
                candidate: None,
                match_score: 0.0,
                tied_with: Vec::new(),
            };
            return (unmatched, None);
        };

        let tied_with: Vec<String> = matches[1..]
            .iter()
            .take_while(|m| m.score == best.score)
            .map(|m| m.name.clone())
            .collect();
        if !tied_with.is_empty() {
            warn!(
                "Ambiguous match for '{}': '{}' tied with {:?} at {:.1}; keeping '{}'",
                normalized, best.name, tied_with, best.score, best.name
            );
        }

        let candidate = candidates[best.index].clone();
        let match_score = self.match_confidence(&normalized, &candidate.name, candidate.has_identifier());

        let suspect = ResolvedSuspect {
            normalized_name: normalized,
            candidate: Some(candidate),
            match_score,
            tied_with,
        };
        (suspect, Some(best.index))
    }
}

impl Default for EntityResolver<TokenSortRatio> {
    fn default() -> Self {
        Self::default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LevenshteinRatio;
    use ecoforensics_domain::GeoPoint;
    use std::collections::BTreeMap;

    fn facility(id: i64, name: Option<&str>, operator: Option<&str>) -> InfrastructureNode {
        let mut tags = BTreeMap::new();
        if let Some(op) = operator {
            tags.insert("operator".to_string(), op.to_string());
        }
        InfrastructureNode {
            id,
            name: name.map(String::from),
            node_type: "factory".to_string(),
            location: GeoPoint {
                latitude: 0.0,
                longitude: 0.0,
            },
            distance_m: None,
            tags,
        }
    }

    #[test]
    fn test_fuzzy_match_empty_candidates() {
        let resolver = EntityResolver::default_config();
        let none: [&str; 0] = [];
        assert!(resolver.fuzzy_match("Acme", &none, 0.0).is_empty());
    }

    #[test]
    fn test_fuzzy_match_sorted_and_stable() {
        let resolver = EntityResolver::default_config();
        let candidates = ["Acme Ltd", "Zenith Pulp", "ACME Corp", "Acmee Inc"];
        let matches = resolver.fuzzy_match("Acme", &candidates, 60.0);
        let order: Vec<usize> = matches.iter().map(|m| m.index).collect();
        assert_eq!(order, vec![0, 2, 3]);
        assert_eq!(matches[0].score, 100.0);
        assert_eq!(matches[1].score, 100.0);
    }

    #[test]
    fn test_fuzzy_match_threshold() {
        let resolver = EntityResolver::default_config();
        let candidates = ["Zenith Pulp"];
        assert!(resolver.fuzzy_match("Acme", &candidates, 60.0).is_empty());
        assert_eq!(resolver.fuzzy_match("Acme", &candidates, 0.0).len(), 1);
    }

    #[test]
    fn test_match_confidence_identifier_bonus() {
        let resolver = EntityResolver::default_config();
        assert!(resolver.match_confidence("Acme Inc", "ACME", true) >= 95.0);

        let without = resolver.match_confidence("Acme Pulp", "Acme Paper", false);
        let with = resolver.match_confidence("Acme Pulp", "Acme Paper", true);
        assert!(without < 100.0);
        assert!(with > without);
        assert!(with <= 100.0);
    }

    #[test]
    fn test_resolve_suspects_from_facilities() {
        let resolver = EntityResolver::default_config();
        let nodes = vec![
            facility(1, Some("Riau Pulp Mill"), Some("PT Riau Pulp Tbk")),
            facility(2, Some("Riau Pulp Mill"), None),
        ];
        let candidates = vec![
            CorporateCandidate::named("PT Riau Pulp").with_identifier("LEI123"),
            CorporateCandidate::named("Unrelated Mining Corp"),
        ];

        let suspects = resolver.resolve_suspects(&nodes, &candidates);
        let names: Vec<&str> = suspects.iter().map(|s| s.normalized_name.as_str()).collect();
        assert_eq!(names, vec!["RIAU PULP MILL", "PT RIAU PULP", "UNRELATED MINING"]);

        let operator = &suspects[1];
        assert_eq!(operator.candidate.as_ref().unwrap().name, "PT Riau Pulp");
        assert_eq!(operator.match_score, 100.0);

        let unrelated = &suspects[2];
        assert_eq!(unrelated.candidate.as_ref().unwrap().name, "Unrelated Mining Corp");
    }

    #[test]
    fn test_resolve_records_ties() {
        let resolver = EntityResolver::default_config();
        let nodes = vec![facility(1, Some("Acme"), None)];
        let candidates = vec![CorporateCandidate::named("Acme Ltd"), CorporateCandidate::named("ACME Inc")];

        let suspects = resolver.resolve_suspects(&nodes, &candidates);
        assert_eq!(suspects.len(), 1);
        assert_eq!(suspects[0].candidate.as_ref().unwrap().name, "Acme Ltd");
        assert_eq!(suspects[0].tied_with, vec!["ACME Inc".to_string()]);
    }

    #[test]
    fn test_resolve_unmatched_facility() {
        let resolver = EntityResolver::new(ResolverConfig::strict());
        let nodes = vec![facility(1, Some("Sungai Mill"), None)];
        let suspects = resolver.resolve_suspects(&nodes, &[]);
        assert_eq!(suspects.len(), 1);
        assert!(suspects[0].candidate.is_none());
        assert_eq!(suspects[0].match_score, 0.0);
    }

    #[test]
    fn test_unnamed_facilities_yield_nothing() {
        let resolver = EntityResolver::default_config();
        let suspects = resolver.resolve_suspects(&[facility(9, None, None)], &[]);
        assert!(suspects.is_empty());
    }

    #[test]
    fn test_custom_metric() {
        let resolver = EntityResolver::with_metric(ResolverConfig::default(), LevenshteinRatio);
        assert!(resolver.similarity("Pulp Riau", "Riau Pulp") < 100.0);
    }
}
