//! Fires and clearing alerts that happen close together in time

use crate::{saturate, ScoringConfig};
use chrono::{DateTime, Utc};
use ecoforensics_domain::{DeforestationAlert, EvidenceCandidate, EvidenceKind, FireEvent};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

/// One fire/alert pair inside the correlation window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalDetail {
    /// Fire acquisition instant
    pub fire_at: DateTime<Utc>,
    /// Alert detection instant
    pub alert_at: DateTime<Utc>,
    /// Whole days between the two, truncated toward zero
    pub days_apart: i64,
    /// Contribution in [0, 1]
    pub contribution: f64,
}

/// Result of a temporal scoring run
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TemporalScore {
    /// Score in [0, 1]
    pub score: f64,
    /// Qualifying pairs, in input order
    pub details: Vec<TemporalDetail>,
}

impl TemporalScore {
    /// Evidence candidate for the aggregator
    pub fn candidate(&self, window_days: i64) -> EvidenceCandidate {
        let closest = self.details.iter().map(|d| d.days_apart).min();
        let description = match closest {
            Some(days) => format!(
                "{} fire/alert pair(s) within {} days; closest {} day(s) apart",
                self.details.len(),
                window_days,
                days
            ),
            None => format!("No fires within {} days of a clearing alert", window_days),
        };

        let pairs: Vec<serde_json::Value> = self
            .details
            .iter()
            .map(|d| {
                json!({
                    "fire_at": d.fire_at.to_rfc3339(),
                    "alert_at": d.alert_at.to_rfc3339(),
                    "days_apart": d.days_apart,
                    "contribution": d.contribution,
                })
            })
            .collect();

        EvidenceCandidate::new(EvidenceKind::TemporalCorrelation, self.score, description)
            .with_data("correlated_pairs", self.details.len())
            .with_data("window_days", window_days)
            .with_data("pairs", pairs)
    }
}

/// Scores fires that occur shortly before or after a clearing alert
#[derive(Debug, Clone)]
pub struct TemporalCorrelationScorer {
    window_days: i64,
    saturation_count: u32,
}

impl TemporalCorrelationScorer {
    /// Create a scorer with an explicit window and saturation count
    pub fn new(window_days: i64, saturation_count: u32) -> Self {
        Self {
            window_days,
            saturation_count,
        }
    }

    /// Create a scorer from the shared configuration
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(config.window_days, config.saturation_count)
    }

    /// Window in days
    pub fn window_days(&self) -> i64 {
        self.window_days
    }

    /// Contribution of a pair `days_apart` days apart, or `None` outside the window
    pub fn contribution(&self, days_apart: i64) -> Option<f64> {
        if self.window_days <= 0 {
            return None;
        }
        let gap = days_apart.abs();
        if gap > self.window_days {
            return None;
        }
        Some(1.0 - gap as f64 / self.window_days as f64)
    }

    /// Score every fire/alert pair
    pub fn score(&self, fires: &[FireEvent], alerts: &[DeforestationAlert]) -> TemporalScore {
        if self.window_days <= 0 {
            debug!("Degenerate window_days {}, temporal score is 0", self.window_days);
            return TemporalScore::default();
        }

        let mut details = Vec::new();
        let mut total = 0.0;

        for fire in fires {
            for alert in alerts {
                let days_apart = (fire.acquired_at - alert.detected_at).num_days().abs();
                if let Some(contribution) = self.contribution(days_apart) {
                    total += contribution;
                    details.push(TemporalDetail {
                        fire_at: fire.acquired_at,
                        alert_at: alert.detected_at,
                        days_apart,
                        contribution,
                    });
                }
            }
        }

        TemporalScore {
            score: saturate(total, self.saturation_count),
            details,
        }
    }
}

impl Default for TemporalCorrelationScorer {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: contribution strictly decreases with the day gap inside the window
        #[test]
        fn test_contribution_monotonic(a in 0i64..200, step in 1i64..100, slack in 0i64..100) {
            let b = a + step;
            let window = b + slack;
            let scorer = TemporalCorrelationScorer::new(window, 3);
            prop_assert!(scorer.contribution(a).unwrap() > scorer.contribution(b).unwrap());
        }

        /// Property: gaps beyond the window are excluded
        #[test]
        fn test_beyond_window_excluded(window in 1i64..365, extra in 1i64..1000) {
            let scorer = TemporalCorrelationScorer::new(window, 3);
            prop_assert!(scorer.contribution(window + extra).is_none());
        }
    }
}
