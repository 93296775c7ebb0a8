//! Eco-Forensics Entity Resolver
//!
//! Turns raw facility and company names into resolved suspects:
//!
//! 1. [`normalize`] uppercases, collapses whitespace and strips legal suffixes
//! 2. [`EntityResolver::fuzzy_match`] ranks candidates by similarity
//! 3. [`EntityResolver::match_confidence`] adds an identifier bonus
//! 4. [`EntityResolver::resolve_suspects`] produces one suspect per distinct name
//!
//! Similarity is pluggable through [`SimilarityMetric`](ecoforensics_domain::SimilarityMetric);
//! [`TokenSortRatio`] over [`LevenshteinRatio`] is the default.
//!
//! # Example
//!
//! ```
//! use ecoforensics_resolver::EntityResolver;
//!
//! let resolver = EntityResolver::default_config();
//! let matches = resolver.fuzzy_match("Acme Corp", &["ACME Inc.", "Zenith Pulp"], 60.0);
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].score, 100.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod normalize;
pub mod resolver;
pub mod similarity;

pub use config::ResolverConfig;
pub use normalize::{normalize, LEGAL_SUFFIXES};
pub use resolver::{EntityResolver, NameMatch};
pub use similarity::{levenshtein_distance, LevenshteinRatio, TokenSortRatio};
