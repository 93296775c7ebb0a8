//! Alert concentration per unit area

use crate::ScoringConfig;
use ecoforensics_domain::{BoundingBox, EvidenceCandidate, EvidenceKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Textual density classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DensityClass {
    /// No alerts at all
    None,
    /// Below the low band
    Low,
    /// Between the bands
    Moderate,
    /// At or above the high band
    High,
    /// Area could not be computed
    Indeterminate,
}

impl DensityClass {
    /// Wire tag
    pub fn as_str(&self) -> &'static str {
        match self {
            DensityClass::None => "none",
            DensityClass::Low => "low",
            DensityClass::Moderate => "moderate",
            DensityClass::High => "high",
            DensityClass::Indeterminate => "indeterminate",
        }
    }
}

impl std::fmt::Display for DensityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a density scoring run
#[derive(Debug, Clone, PartialEq)]
pub struct DensityScore {
    /// Score in [0, 1]
    pub score: f64,
    /// Classification
    pub class: DensityClass,
    /// Alerts counted
    pub alert_count: usize,
    /// Box area in km²
    pub area_km2: f64,
    /// Alerts per km² (0 when the area is degenerate)
    pub density_per_km2: f64,
}

impl DensityScore {
    /// Evidence candidate for the aggregator
    pub fn candidate(&self) -> EvidenceCandidate {
        let description = match self.class {
            DensityClass::Indeterminate => "Alert density indeterminate: region has no area".to_string(),
            DensityClass::None => "No alerts detected in region".to_string(),
            class => format!(
                "{} alerts over {:.1} km² ({:.4}/km², {} density)",
                self.alert_count, self.area_km2, self.density_per_km2, class
            ),
        };
        EvidenceCandidate::new(EvidenceKind::AlertDensity, self.score, description)
            .with_data("alert_count", self.alert_count)
            .with_data("area_km2", self.area_km2)
            .with_data("density_per_km2", self.density_per_km2)
            .with_data("class", self.class.as_str())
    }
}

/// Maps alert counts per km² through fixed bands
#[derive(Debug, Clone)]
pub struct AlertDensityScorer {
    low_per_km2: f64,
    high_per_km2: f64,
    low_band_score: f64,
}

impl AlertDensityScorer {
    /// Create a scorer from the shared configuration
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self {
            low_per_km2: config.density_low_per_km2,
            high_per_km2: config.density_high_per_km2,
            low_band_score: config.density_low_band_score,
        }
    }

    /// Banded, monotone mapping of density into [0, 1]
    pub fn band_score(&self, density: f64) -> f64 {
        if !density.is_finite() || density <= 0.0 || self.low_per_km2 <= 0.0 {
            return 0.0;
        }
        if density >= self.high_per_km2 {
            return 1.0;
        }
        if density < self.low_per_km2 {
            return self.low_band_score * density / self.low_per_km2;
        }
        let span = self.high_per_km2 - self.low_per_km2;
        if span <= 0.0 {
            return 1.0;
        }
        let t = (density - self.low_per_km2) / span;
        (self.low_band_score + (1.0 - self.low_band_score) * t).clamp(0.0, 1.0)
    }

    fn classify(&self, alert_count: usize, density: f64) -> DensityClass {
        if alert_count == 0 {
            DensityClass::None
        } else if density >= self.high_per_km2 {
            DensityClass::High
        } else if density >= self.low_per_km2 {
            DensityClass::Moderate
        } else {
            DensityClass::Low
        }
    }

    /// Score `alert_count` alerts spread over `bbox`
    pub fn score(&self, alert_count: usize, bbox: &BoundingBox) -> DensityScore {
        let area_km2 = bbox.area_km2();
        if area_km2 <= 0.0 {
            debug!("Degenerate area for {:?}, density score is 0", bbox.to_array());
            return DensityScore {
                score: 0.0,
                class: DensityClass::Indeterminate,
                alert_count,
                area_km2: 0.0,
                density_per_km2: 0.0,
            };
        }

        let density = alert_count as f64 / area_km2;
        DensityScore {
            score: self.band_score(density),
            class: self.classify(alert_count, density),
            alert_count,
            area_km2,
            density_per_km2: density,
        }
    }
}

impl Default for AlertDensityScorer {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}
