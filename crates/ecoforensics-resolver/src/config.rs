//! Configuration for entity resolution

use serde::{Deserialize, Serialize};

/// Configuration for the [`EntityResolver`](crate::EntityResolver)
///
/// # Examples
///
/// ```
/// use ecoforensics_resolver::ResolverConfig;
///
/// assert_eq!(ResolverConfig::default().match_threshold, 60.0);
/// assert_eq!(ResolverConfig::strict().match_threshold, 85.0);
/// assert_eq!(ResolverConfig::lenient().match_threshold, 50.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Minimum similarity (0-100) for a candidate to count as a match
    /// Default: 60
    pub match_threshold: f64,

    /// Confidence bonus when the matched record carries a legal identifier
    /// Default: 10
    pub identifier_bonus: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            match_threshold: 60.0,
            identifier_bonus: 10.0,
        }
    }
}

impl ResolverConfig {
    /// Strict matching: only near-identical names
    pub fn strict() -> Self {
        Self {
            match_threshold: 85.0,
            ..Self::default()
        }
    }

    /// Lenient matching: tolerate abbreviations and typos
    pub fn lenient() -> Self {
        Self {
            match_threshold: 50.0,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=100.0).contains(&self.match_threshold) {
            return Err("match_threshold must be within [0, 100]".to_string());
        }
        if !(self.identifier_bonus > 0.0 && self.identifier_bonus <= 100.0) {
            return Err("identifier_bonus must be within (0, 100]".to_string());
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
