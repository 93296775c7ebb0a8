//! Raw signal collections handed in by collaborators

use crate::GeoPoint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Active fire detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireEvent {
    /// Detection location
    #[serde(flatten)]
    pub location: GeoPoint,
    /// Acquisition instant
    pub acquired_at: DateTime<Utc>,
    /// Detection confidence percentage (0-100)
    #[serde(default)]
    pub confidence: Option<u8>,
    /// Brightness temperature in Kelvin
    #[serde(default)]
    pub brightness: Option<f64>,
    /// Fire radiative power in MW
    #[serde(default)]
    pub frp: Option<f64>,
    /// Sensor or satellite name
    #[serde(default)]
    pub satellite: String,
}

/// Sensor family that produced a deforestation alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlertSource {
    /// Optical imagery (cloud-limited)
    #[default]
    Optical,
    /// Synthetic aperture radar
    Radar,
}

/// Deforestation alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeforestationAlert {
    /// Alert location
    #[serde(flatten)]
    pub location: GeoPoint,
    /// Detection instant
    pub detected_at: DateTime<Utc>,
    /// Confidence percentage (0-100)
    #[serde(default)]
    pub confidence: Option<u8>,
    /// Affected area in hectares
    #[serde(default)]
    pub area_ha: Option<f64>,
    /// Which sensor family raised the alert
    #[serde(default)]
    pub source: AlertSource,
}

/// Kind tag of a damage event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DamageKind {
    /// Active fire detection
    Fire,
    /// Optical deforestation alert
    OpticalAlert,
    /// Radar deforestation alert
    RadarAlert,
}

impl DamageKind {
    /// Wire tag
    pub fn as_str(&self) -> &'static str {
        match self {
            DamageKind::Fire => "fire",
            DamageKind::OpticalAlert => "optical-alert",
            DamageKind::RadarAlert => "radar-alert",
        }
    }
}

impl std::fmt::Display for DamageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any observed damage: a fire or a deforestation alert
#[derive(Debug, Clone, PartialEq)]
pub enum DamageEvent {
    /// Fire detection
    Fire(FireEvent),
    /// Deforestation alert
    Alert(DeforestationAlert),
}

impl DamageEvent {
    /// Where the damage was observed
    pub fn location(&self) -> &GeoPoint {
        match self {
            DamageEvent::Fire(f) => &f.location,
            DamageEvent::Alert(a) => &a.location,
        }
    }

    /// When the damage was observed
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            DamageEvent::Fire(f) => f.acquired_at,
            DamageEvent::Alert(a) => a.detected_at,
        }
    }

    /// Confidence percentage, if reported
    pub fn confidence(&self) -> Option<u8> {
        match self {
            DamageEvent::Fire(f) => f.confidence,
            DamageEvent::Alert(a) => a.confidence,
        }
    }

    /// Kind tag
    pub fn kind(&self) -> DamageKind {
        match self {
            DamageEvent::Fire(_) => DamageKind::Fire,
            DamageEvent::Alert(a) => match a.source {
                AlertSource::Optical => DamageKind::OpticalAlert,
                AlertSource::Radar => DamageKind::RadarAlert,
            },
        }
    }
}

impl From<FireEvent> for DamageEvent {
    fn from(fire: FireEvent) -> Self {
        DamageEvent::Fire(fire)
    }
}

impl From<DeforestationAlert> for DamageEvent {
    fn from(alert: DeforestationAlert) -> Self {
        DamageEvent::Alert(alert)
    }
}

/// Industrial facility near the region of interest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfrastructureNode {
    /// Map element identifier
    pub id: i64,
    /// Facility name
    #[serde(default)]
    pub name: Option<String>,
    /// Type tag (factory, mine, industrial, ...)
    #[serde(default)]
    pub node_type: String,
    /// Facility location
    #[serde(flatten)]
    pub location: GeoPoint,
    /// Distance from the region center in meters
    #[serde(default)]
    pub distance_m: Option<f64>,
    /// Free-form tags
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl InfrastructureNode {
    /// Company names this facility could belong to
    ///
    /// `name`, then the `operator` tag, then the `company` tag. Blank values
    /// and exact duplicates are skipped.
    pub fn candidate_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        let sources = [
            self.name.as_deref(),
            self.tags.get("operator").map(String::as_str),
            self.tags.get("company").map(String::as_str),
        ];
        for name in sources.into_iter().flatten() {
            let trimmed = name.trim();
            if !trimmed.is_empty() && !names.contains(&trimmed) {
                names.push(trimmed);
            }
        }
        names
    }

    /// Human-readable label: the name, or `OSM:<id>` when unnamed
    pub fn display_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("OSM:{}", self.id),
        }
    }
}

/// Vegetation and burn index readings for the region
///
/// Every reading is optional. `None` means "not measured", which is not the
/// same as a reading of zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpectralEvidence {
    /// Normalized Difference Vegetation Index (-1..1)
    #[serde(default)]
    pub ndvi: Option<f64>,
    /// NDVI change against baseline
    #[serde(default)]
    pub ndvi_change: Option<f64>,
    /// Normalized Burn Ratio (-1..1)
    #[serde(default)]
    pub nbr: Option<f64>,
    /// NBR change against baseline (negative means burn damage)
    #[serde(default)]
    pub nbr_change: Option<f64>,
    /// Burn severity index
    #[serde(default)]
    pub burn_index: Option<f64>,
    /// Scene acquisition instant
    #[serde(default)]
    pub acquired_at: Option<DateTime<Utc>>,
    /// Cloud coverage percentage
    #[serde(default)]
    pub cloud_coverage: Option<f64>,
}

impl SpectralEvidence {
    /// True when no index reading is present at all
    pub fn is_empty(&self) -> bool {
        self.ndvi.is_none() && self.nbr.is_none() && self.burn_index.is_none()
    }
}

/// Regional forest-loss statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForestLossStats {
    /// Total loss in hectares
    pub total_loss_ha: f64,
    /// Loss per calendar year in hectares
    #[serde(default)]
    pub loss_by_year: BTreeMap<i32, f64>,
    /// Tree cover in 2000 in hectares
    #[serde(default)]
    pub tree_cover_2000_ha: Option<f64>,
    /// Tree cover percentage
    #[serde(default)]
    pub tree_cover_percent: Option<f64>,
}
