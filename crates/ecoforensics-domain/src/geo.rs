//! Geometry and time primitives: points, bounding boxes, analysis windows

use crate::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Mean Earth radius in meters (haversine model)
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Kilometers per degree of latitude (equirectangular approximation)
pub const KM_PER_DEGREE: f64 = 111.32;

/// A WGS84 coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude [-90, 90]
    pub latitude: f64,
    /// Longitude [-180, 180]
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a validated point
    ///
    /// # Examples
    ///
    /// ```
    /// use ecoforensics_domain::GeoPoint;
    ///
    /// assert!(GeoPoint::new(-0.5, 101.4).is_ok());
    /// assert!(GeoPoint::new(91.0, 0.0).is_err());
    /// ```
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        let point = Self { latitude, longitude };
        point.validate()?;
        Ok(point)
    }

    /// Check the coordinate ranges
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(ValidationError::NonFinite("point".to_string()));
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ValidationError::InvalidLatitude(self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ValidationError::InvalidLongitude(self.longitude));
        }
        Ok(())
    }

    /// Great-circle distance to another point in meters
    pub fn haversine_distance_m(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = lat2 - lat1;
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_M * c
    }
}

/// Rectangular extent in EPSG:4326
///
/// Serialized as four floats: `min_lon`, `min_lat`, `max_lon`, `max_lat`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Western edge
    pub min_lon: f64,
    /// Southern edge
    pub min_lat: f64,
    /// Eastern edge
    pub max_lon: f64,
    /// Northern edge
    pub max_lat: f64,
}

impl BoundingBox {
    /// Create a validated bounding box
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Result<Self, ValidationError> {
        let bbox = Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        };
        bbox.validate()?;
        Ok(bbox)
    }

    /// Check ranges and strict min < max ordering on both axes
    ///
    /// Deserialized boxes bypass [`BoundingBox::new`], so callers accepting
    /// external input must run this before using the box.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let values = [self.min_lon, self.min_lat, self.max_lon, self.max_lat];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ValidationError::NonFinite("bounding box".to_string()));
        }
        for lon in [self.min_lon, self.max_lon] {
            if !(-180.0..=180.0).contains(&lon) {
                return Err(ValidationError::InvalidLongitude(lon));
            }
        }
        for lat in [self.min_lat, self.max_lat] {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(ValidationError::InvalidLatitude(lat));
            }
        }
        if self.min_lon >= self.max_lon {
            return Err(ValidationError::InvertedBounds {
                axis: "longitude".to_string(),
                min: self.min_lon,
                max: self.max_lon,
            });
        }
        if self.min_lat >= self.max_lat {
            return Err(ValidationError::InvertedBounds {
                axis: "latitude".to_string(),
                min: self.min_lat,
                max: self.max_lat,
            });
        }
        Ok(())
    }

    /// Center of the box
    pub fn centroid(&self) -> GeoPoint {
        GeoPoint {
            latitude: (self.min_lat + self.max_lat) / 2.0,
            longitude: (self.min_lon + self.max_lon) / 2.0,
        }
    }

    /// Approximate area in km² using an equirectangular projection
    ///
    /// Returns 0.0 for degenerate or inverted boxes rather than a negative area.
    pub fn area_km2(&self) -> f64 {
        let mid_lat = ((self.min_lat + self.max_lat) / 2.0).to_radians();
        let width_km = (self.max_lon - self.min_lon) * KM_PER_DEGREE * mid_lat.cos().abs();
        let height_km = (self.max_lat - self.min_lat) * KM_PER_DEGREE;
        let area = width_km * height_km;
        if area.is_finite() && area > 0.0 {
            area
        } else {
            0.0
        }
    }

    /// Whether the point lies inside the box (edges inclusive)
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.longitude >= self.min_lon
            && point.longitude <= self.max_lon
            && point.latitude >= self.min_lat
            && point.latitude <= self.max_lat
    }

    /// The four bounds in `min_lon, min_lat, max_lon, max_lat` order
    pub fn to_array(&self) -> [f64; 4] {
        [self.min_lon, self.min_lat, self.max_lon, self.max_lat]
    }
}

impl FromStr for BoundingBox {
    type Err = ValidationError;

    /// Parse `"minLon,minLat,maxLon,maxLat"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|p| {
                p.trim()
                    .parse::<f64>()
                    .map_err(|e| ValidationError::Parse(format!("Invalid bbox component '{}': {}", p.trim(), e)))
            })
            .collect::<Result<Vec<f64>, _>>()?;

        if parts.len() != 4 {
            return Err(ValidationError::Parse(format!(
                "BBox must have exactly 4 comma-separated values, got {}",
                parts.len()
            )));
        }

        BoundingBox::new(parts[0], parts[1], parts[2], parts[3])
    }
}

/// Analysis period `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Inclusive start
    pub start: DateTime<Utc>,
    /// Inclusive end
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Create a validated window (start <= end)
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ValidationError> {
        let window = Self { start, end };
        window.validate()?;
        Ok(window)
    }

    /// Check ordering
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.start > self.end {
            return Err(ValidationError::InvertedTimeWindow {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Whole days covered by the window
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Whether the instant falls inside the window (inclusive)
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        *instant >= self.start && *instant <= self.end
    }
}
