//! Configuration for the scorers
//!
//! Every constant the scorers use lives here so that none is embedded as a
//! literal in scoring logic.

use ecoforensics_domain::SentimentChannel;
use serde::{Deserialize, Serialize};

/// Base weights of the sentiment channels
///
/// Renormalized over the channels actually present, so they need not sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelWeights {
    /// Primary news weight
    pub primary_news: f64,
    /// Knowledge graph weight
    pub knowledge_graph: f64,
    /// Community weight
    pub community: f64,
}

impl ChannelWeights {
    /// Base weight of a channel
    pub fn weight(&self, channel: SentimentChannel) -> f64 {
        match channel {
            SentimentChannel::PrimaryNews => self.primary_news,
            SentimentChannel::KnowledgeGraph => self.knowledge_graph,
            SentimentChannel::Community => self.community,
        }
    }
}

impl Default for ChannelWeights {
    fn default() -> Self {
        Self {
            primary_news: 0.5,
            knowledge_graph: 0.3,
            community: 0.2,
        }
    }
}

/// Configuration shared by all scorers
///
/// # Examples
///
/// ```
/// use ecoforensics_scoring::ScoringConfig;
///
/// let config = ScoringConfig::default();
/// assert_eq!(config.max_distance_m, 5_000.0);
/// assert_eq!(config.window_days, 14);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Maximum facility-to-damage distance that counts as proximity (meters)
    /// Default: 5000
    pub max_distance_m: f64,

    /// Number of close pairs after which proximity/temporal evidence is maximal
    /// Default: 3
    pub saturation_count: u32,

    /// Maximum fire/alert gap that counts as correlated (days)
    /// Default: 14
    pub window_days: i64,

    /// NDVI of healthy vegetation
    /// Default: 0.6
    pub healthy_ndvi: f64,

    /// NBR at or above which no burn damage is assumed
    /// Default: 0.3
    pub nbr_threshold: f64,

    /// Burn index treated as maximal severity
    /// Default: 0.5
    pub burn_max: f64,

    /// Density (alerts/km²) where the low band ends
    /// Default: 0.01
    pub density_low_per_km2: f64,

    /// Density (alerts/km²) where the high band starts
    /// Default: 0.1
    pub density_high_per_km2: f64,

    /// Density score reached at the top of the low band
    /// Default: 0.3
    pub density_low_band_score: f64,

    /// Total sample count at which sentiment sample saturation reaches 1
    /// Default: 50
    pub sentiment_sample_saturation: u32,

    /// Sentiment channel base weights
    pub channel_weights: ChannelWeights,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_distance_m: 5_000.0,
            saturation_count: 3,
            window_days: 14,
            healthy_ndvi: 0.6,
            nbr_threshold: 0.3,
            burn_max: 0.5,
            density_low_per_km2: 0.01,
            density_high_per_km2: 0.1,
            density_low_band_score: 0.3,
            sentiment_sample_saturation: 50,
            channel_weights: ChannelWeights::default(),
        }
    }
}

impl ScoringConfig {
    /// Wider search radius and window, for sparse rural regions
    ///
    /// - max distance: 10 km
    /// - window: 30 days
    pub fn lenient() -> Self {
        Self {
            max_distance_m: 10_000.0,
            window_days: 30,
            ..Self::default()
        }
    }

    /// Tighter radius and window, for dense industrial regions
    ///
    /// - max distance: 2 km
    /// - window: 7 days
    pub fn strict() -> Self {
        Self {
            max_distance_m: 2_000.0,
            window_days: 7,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.max_distance_m.is_finite() && self.max_distance_m > 0.0) {
            return Err("max_distance_m must be a positive number".to_string());
        }
        if self.saturation_count == 0 {
            return Err("saturation_count must be greater than 0".to_string());
        }
        if self.window_days <= 0 {
            return Err("window_days must be greater than 0".to_string());
        }
        for (name, value) in [
            ("healthy_ndvi", self.healthy_ndvi),
            ("nbr_threshold", self.nbr_threshold),
            ("burn_max", self.burn_max),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{} must be a positive number", name));
            }
        }
        if !(self.density_low_per_km2.is_finite() && self.density_low_per_km2 > 0.0) {
            return Err("density_low_per_km2 must be a positive number".to_string());
        }
        if !(self.density_high_per_km2.is_finite() && self.density_high_per_km2 > self.density_low_per_km2) {
            return Err("density_high_per_km2 must exceed density_low_per_km2".to_string());
        }
        if !(0.0..=1.0).contains(&self.density_low_band_score) {
            return Err("density_low_band_score must be within [0, 1]".to_string());
        }
        for channel in SentimentChannel::ALL {
            let w = self.channel_weights.weight(channel);
            if !(w.is_finite() && w > 0.0) {
                return Err(format!("channel weight for {} must be a positive number", channel));
            }
        }
        if self.sentiment_sample_saturation == 0 {
            return Err("sentiment_sample_saturation must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ScoringConfig::default().validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(ScoringConfig::lenient().validate().is_ok());
        assert!(ScoringConfig::strict().validate().is_ok());
        assert!(ScoringConfig::strict().max_distance_m < ScoringConfig::default().max_distance_m);
        assert!(ScoringConfig::lenient().window_days > ScoringConfig::default().window_days);
    }

    #[test]
    fn test_invalid_max_distance() {
        let mut config = ScoringConfig::default();
        config.max_distance_m = 0.0;
        assert!(config.validate().is_err());
        config.max_distance_m = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_density_bands() {
        let mut config = ScoringConfig::default();
        config.density_high_per_km2 = config.density_low_per_km2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_channel_weight() {
        let mut config = ScoringConfig::default();
        config.channel_weights.community = 0.0;
        let err = config.validate().unwrap_err();
        assert!(err.contains("community"));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ScoringConfig::strict();
        let toml_str = config.to_toml().unwrap();
        let parsed = ScoringConfig::from_toml(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let parsed = ScoringConfig::from_toml("window_days = 21").unwrap();
        assert_eq!(parsed.window_days, 21);
        assert_eq!(parsed.max_distance_m, 5_000.0);
        assert_eq!(parsed.channel_weights, ChannelWeights::default());
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        let err = ScoringConfig::from_toml("max_distance_m = \"far\"").unwrap_err();
        assert!(err.contains("Failed to parse TOML"));
    }
}
