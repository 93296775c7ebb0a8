//! Corporate identities and resolved suspects

use serde::{Deserialize, Serialize};

/// A legal entity that might be responsible for observed damage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorporateCandidate {
    /// Registered name as supplied
    pub name: String,
    /// Legal entity identifier
    #[serde(default)]
    pub legal_identifier: Option<String>,
    /// Country code
    #[serde(default)]
    pub country: Option<String>,
    /// Registration jurisdiction
    #[serde(default)]
    pub jurisdiction: Option<String>,
    /// Parent company name
    #[serde(default)]
    pub parent_name: Option<String>,
    /// Registry status (active/inactive)
    #[serde(default)]
    pub status: Option<String>,
    /// Where this record came from
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_source() -> String {
    "registry".to_string()
}

impl CorporateCandidate {
    /// Candidate with only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            legal_identifier: None,
            country: None,
            jurisdiction: None,
            parent_name: None,
            status: None,
            source: default_source(),
        }
    }

    /// Attach a legal identifier
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.legal_identifier = Some(identifier.into());
        self
    }

    /// Whether a non-blank legal identifier is known
    pub fn has_identifier(&self) -> bool {
        self.legal_identifier
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty())
    }
}

/// A suspect identity after normalization and matching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSuspect {
    /// Normalized name the suspect is keyed on
    pub normalized_name: String,
    /// Best-matching corporate record, if any passed the threshold
    pub candidate: Option<CorporateCandidate>,
    /// Match confidence in [0, 100]
    pub match_score: f64,
    /// Other candidates that scored equal to the best match
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tied_with: Vec<String>,
}

impl ResolvedSuspect {
    /// Best label for display: the matched record's name, or the normalized name
    pub fn display_name(&self) -> &str {
        self.candidate
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or(&self.normalized_name)
    }

    /// Whether several candidates tied for the best match
    pub fn is_ambiguous(&self) -> bool {
        !self.tied_with.is_empty()
    }
}
