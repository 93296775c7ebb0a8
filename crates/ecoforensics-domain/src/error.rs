//! Validation errors for structurally invalid input

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Structural problems with geometry or time ranges
///
/// These are the only conditions that reject a dossier request outright.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Latitude outside [-90, 90]
    #[error("Latitude {0} is outside [-90, 90]")]
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180]
    #[error("Longitude {0} is outside [-180, 180]")]
    InvalidLongitude(f64),

    /// NaN or infinite coordinate
    #[error("Non-finite value in {0}")]
    NonFinite(String),

    /// Bounding box with min >= max on an axis
    #[error("Bounding box {axis} bounds inverted: min {min} must be less than max {max}")]
    InvertedBounds {
        /// Axis name ("longitude" or "latitude")
        axis: String,
        /// Lower bound as supplied
        min: f64,
        /// Upper bound as supplied
        max: f64,
    },

    /// Time window whose start is after its end
    #[error("Time window start {start} is after end {end}")]
    InvertedTimeWindow {
        /// Window start
        start: DateTime<Utc>,
        /// Window end
        end: DateTime<Utc>,
    },

    /// Unparseable textual input
    #[error("Parse error: {0}")]
    Parse(String),
}
