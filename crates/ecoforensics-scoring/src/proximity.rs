//! Spatial closeness between facilities and observed damage

use crate::{saturate, ScoringConfig};
use ecoforensics_domain::{
    DamageEvent, DamageKind, EvidenceCandidate, EvidenceKind, InfrastructureNode,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

/// One facility/event pair inside the proximity radius
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProximityDetail {
    /// Facility name, or `OSM:<id>`
    pub infrastructure: String,
    /// Facility type tag
    pub infrastructure_type: String,
    /// Great-circle distance, rounded to 0.1 m
    pub distance_m: f64,
    /// Kind of damage event
    pub event_kind: DamageKind,
    /// Contribution in [0, 1]
    pub contribution: f64,
}

/// Result of a proximity scoring run
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProximityScore {
    /// Score in [0, 1]
    pub score: f64,
    /// Qualifying pairs, in input order
    pub details: Vec<ProximityDetail>,
}

impl ProximityScore {
    /// Closest qualifying pair
    pub fn nearest(&self) -> Option<&ProximityDetail> {
        self.details
            .iter()
            .min_by(|a, b| a.distance_m.total_cmp(&b.distance_m))
    }

    /// Evidence candidate for the aggregator
    pub fn candidate(&self, max_distance_m: f64) -> EvidenceCandidate {
        let description = match self.nearest() {
            Some(nearest) => format!(
                "{} damage event(s) within {:.0} m of infrastructure; nearest is {} at {:.1} m",
                self.details.len(),
                max_distance_m,
                nearest.infrastructure,
                nearest.distance_m
            ),
            None => format!("No damage events within {:.0} m of infrastructure", max_distance_m),
        };

        let pairs: Vec<serde_json::Value> = self
            .details
            .iter()
            .map(|d| {
                json!({
                    "infrastructure": d.infrastructure,
                    "infrastructure_type": d.infrastructure_type,
                    "distance_m": d.distance_m,
                    "event_kind": d.event_kind.as_str(),
                    "contribution": d.contribution,
                })
            })
            .collect();

        EvidenceCandidate::new(EvidenceKind::SpatialProximity, self.score, description)
            .with_data("close_events", self.details.len())
            .with_data("max_distance_m", max_distance_m)
            .with_data("pairs", pairs)
    }
}

/// Scores how close facilities sit to observed damage
#[derive(Debug, Clone)]
pub struct GeospatialProximityScorer {
    max_distance_m: f64,
    saturation_count: u32,
}

impl GeospatialProximityScorer {
    /// Create a scorer with an explicit radius and saturation count
    pub fn new(max_distance_m: f64, saturation_count: u32) -> Self {
        Self {
            max_distance_m,
            saturation_count,
        }
    }

    /// Create a scorer from the shared configuration
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(config.max_distance_m, config.saturation_count)
    }

    /// Radius in meters
    pub fn max_distance_m(&self) -> f64 {
        self.max_distance_m
    }

    /// Contribution of a single pair at `distance_m`, or `None` if outside the radius
    pub fn contribution(&self, distance_m: f64) -> Option<f64> {
        if !(self.max_distance_m.is_finite() && self.max_distance_m > 0.0) || !distance_m.is_finite() {
            return None;
        }
        if distance_m > self.max_distance_m {
            return None;
        }
        Some((1.0 - distance_m / self.max_distance_m).clamp(0.0, 1.0))
    }

    /// Score every facility/event pair
    pub fn score(&self, infrastructure: &[InfrastructureNode], events: &[DamageEvent]) -> ProximityScore {
        if !(self.max_distance_m.is_finite() && self.max_distance_m > 0.0) {
            debug!("Degenerate max_distance_m {}, proximity score is 0", self.max_distance_m);
            return ProximityScore::default();
        }

        let mut details = Vec::new();
        let mut total = 0.0;

        for node in infrastructure {
            let label = node.display_name();
            for event in events {
                let distance = node.location.haversine_distance_m(event.location());
                if let Some(contribution) = self.contribution(distance) {
                    total += contribution;
                    details.push(ProximityDetail {
                        infrastructure: label.clone(),
                        infrastructure_type: node.node_type.clone(),
                        distance_m: (distance * 10.0).round() / 10.0,
                        event_kind: event.kind(),
                        contribution,
                    });
                }
            }
        }

        ProximityScore {
            score: saturate(total, self.saturation_count),
            details,
        }
    }
}

impl Default for GeospatialProximityScorer {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: contribution strictly decreases with distance inside the radius
        #[test]
        fn test_contribution_monotonic(
            max in 1.0f64..50_000.0,
            a in 0.0f64..1.0,
            b in 0.0f64..1.0,
        ) {
            prop_assume!((a - b).abs() > 1e-9);
            let scorer = GeospatialProximityScorer::new(max, 3);
            let (near, far) = if a < b { (a * max, b * max) } else { (b * max, a * max) };
            let c_near = scorer.contribution(near).unwrap();
            let c_far = scorer.contribution(far).unwrap();
            prop_assert!(c_near > c_far);
            prop_assert!((0.0..=1.0).contains(&c_near));
        }

        /// Property: anything beyond the radius is excluded
        #[test]
        fn test_beyond_radius_excluded(max in 1.0f64..50_000.0, extra in 0.001f64..1e6) {
            let scorer = GeospatialProximityScorer::new(max, 3);
            prop_assert!(scorer.contribution(max + extra).is_none());
        }
    }
}
