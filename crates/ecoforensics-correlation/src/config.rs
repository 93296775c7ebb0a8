//! Engine configuration: scorer settings, resolver settings, weight table
//!
//! Loaded from TOML. Every section is optional and falls back to defaults.
//!
//! ```toml
//! min_significance = 0.05
//!
//! [scoring]
//! max_distance_m = 5000.0
//! window_days = 14
//!
//! [resolver]
//! match_threshold = 60.0
//!
//! [weights]
//! spatial_proximity = 0.20
//! ```

use crate::ConfigError;
use ecoforensics_domain::EvidenceKind;
use ecoforensics_resolver::ResolverConfig;
use ecoforensics_scoring::ScoringConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Base weight per evidence type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightTable {
    /// Facility near damage
    pub spatial_proximity: f64,
    /// Fires coinciding with alerts
    pub temporal_correlation: f64,
    /// Vegetation index drop
    pub spectral_ndvi: f64,
    /// Burn ratio
    pub spectral_nbr: f64,
    /// Burn index
    pub spectral_burn: f64,
    /// Negative media sentiment
    pub negative_sentiment: f64,
    /// Alert concentration
    pub alert_density: f64,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            spatial_proximity: 0.20,
            temporal_correlation: 0.15,
            spectral_ndvi: 0.12,
            spectral_nbr: 0.10,
            spectral_burn: 0.08,
            negative_sentiment: 0.08,
            alert_density: 0.07,
        }
    }
}

impl WeightTable {
    /// Base weight of an evidence type
    pub fn weight(&self, kind: EvidenceKind) -> f64 {
        match kind {
            EvidenceKind::SpatialProximity => self.spatial_proximity,
            EvidenceKind::TemporalCorrelation => self.temporal_correlation,
            EvidenceKind::SpectralNdvi => self.spectral_ndvi,
            EvidenceKind::SpectralNbr => self.spectral_nbr,
            EvidenceKind::SpectralBurn => self.spectral_burn,
            EvidenceKind::NegativeSentiment => self.negative_sentiment,
            EvidenceKind::AlertDensity => self.alert_density,
        }
    }

    /// Validate the table
    pub fn validate(&self) -> Result<(), String> {
        for kind in EvidenceKind::ALL {
            let w = self.weight(kind);
            if !(0.0..=1.0).contains(&w) {
                return Err(format!("weight for {} must be within [0, 1]", kind));
            }
        }
        Ok(())
    }
}

/// Datasets a complete request draws on
pub fn default_expected_sources() -> Vec<String> {
    [
        "forest_loss",
        "fires",
        "optical_alerts",
        "radar_alerts",
        "spectral",
        "infrastructure",
        "registry",
        "news",
        "knowledge_graph",
        "community",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Configuration for the [`CorrelationEngine`](crate::CorrelationEngine)
///
/// # Examples
///
/// ```
/// use ecoforensics_correlation::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.min_significance, 0.05);
/// assert_eq!(config.expected_sources.len(), 10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Sub-scores at or below this are dropped from chains
    /// Default: 0.05
    pub min_significance: f64,

    /// Sources whose absence lowers the completeness factor
    pub expected_sources: Vec<String>,

    /// Per-source timeout used by intake (seconds)
    /// Default: 30
    pub source_timeout_secs: u64,

    /// Scorer settings
    pub scoring: ScoringConfig,

    /// Resolver settings
    pub resolver: ResolverConfig,

    /// Evidence base weights
    pub weights: WeightTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_significance: 0.05,
            expected_sources: default_expected_sources(),
            source_timeout_secs: 30,
            scoring: ScoringConfig::default(),
            resolver: ResolverConfig::default(),
            weights: WeightTable::default(),
        }
    }
}

impl EngineConfig {
    /// Tighter radius/window and stricter name matching
    pub fn strict() -> Self {
        Self {
            scoring: ScoringConfig::strict(),
            resolver: ResolverConfig::strict(),
            ..Self::default()
        }
    }

    /// Wider radius/window and looser name matching
    pub fn lenient() -> Self {
        Self {
            scoring: ScoringConfig::lenient(),
            resolver: ResolverConfig::lenient(),
            ..Self::default()
        }
    }

    /// Per-source timeout as Duration
    pub fn source_timeout(&self) -> Duration {
        Duration::from_secs(self.source_timeout_secs)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.min_significance) {
            return Err(ConfigError::Invalid(
                "min_significance must be within [0, 1)".to_string(),
            ));
        }
        if self.source_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "source_timeout_secs must be greater than 0".to_string(),
            ));
        }
        self.scoring
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("scoring: {}", e)))?;
        self.resolver
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("resolver: {}", e)))?;
        self.weights
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("weights: {}", e)))?;
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load and validate configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_weights() {
        let weights = WeightTable::default();
        assert_eq!(weights.weight(EvidenceKind::SpatialProximity), 0.20);
        assert_eq!(weights.weight(EvidenceKind::AlertDensity), 0.07);
        let total: f64 = EvidenceKind::ALL.iter().map(|k| weights.weight(*k)).sum();
        assert!((total - 0.80).abs() < 1e-9);
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(EngineConfig::default().validate().is_ok());
        assert!(EngineConfig::strict().validate().is_ok());
        assert!(EngineConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_invalid_weight() {
        let mut config = EngineConfig::default();
        config.weights.spectral_nbr = 1.5;
        match config.validate() {
            Err(ConfigError::Invalid(msg)) => assert!(msg.contains("spectral_nbr")),
            other => panic!("Expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_nested_scoring() {
        let mut config = EngineConfig::default();
        config.scoring.window_days = 0;
        match config.validate() {
            Err(ConfigError::Invalid(msg)) => assert!(msg.starts_with("scoring:")),
            other => panic!("Expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_partial_toml() {
        let config = EngineConfig::from_toml(
            r#"
            min_significance = 0.1

            [scoring]
            max_distance_m = 2500.0

            [weights]
            spatial_proximity = 0.3
            "#,
        )
        .unwrap();
        assert_eq!(config.min_significance, 0.1);
        assert_eq!(config.scoring.max_distance_m, 2500.0);
        assert_eq!(config.scoring.window_days, 14);
        assert_eq!(config.weights.spatial_proximity, 0.3);
        assert_eq!(config.weights.temporal_correlation, 0.15);
        assert_eq!(config.resolver, ResolverConfig::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig::strict();
        let parsed = EngineConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[resolver]\nmatch_threshold = 75.0").unwrap();
        let config = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.resolver.match_threshold, 75.0);
    }

    #[test]
    fn test_from_file_missing() {
        let result = EngineConfig::from_file("/nonexistent/engine.toml");
        assert!(matches!(result, Err(ConfigError::FileRead(_))));
    }

    #[test]
    fn test_from_file_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "min_significance = 2.0").unwrap();
        assert!(matches!(
            EngineConfig::from_file(file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }
}
