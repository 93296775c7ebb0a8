//! Dataset coverage catalog
//!
//! Some alert products only cover part of the globe. Querying them outside
//! their coverage returns nothing, which must not be mistaken for "no damage".

use ecoforensics_domain::{BoundingBox, CoverageNote, CoverageStatus};
use serde::{Deserialize, Serialize};

/// Geographic coverage class of a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageClass {
    /// Whole globe
    Global,
    /// Tropical belt only
    TropicalBelt,
    /// Primary humid tropical forest only
    HumidTropics,
    /// Not tied to geography (registries, media)
    Unrestricted,
}

/// Coverage of one dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetCoverage {
    /// Dataset name, matching the expected-source names
    pub dataset: String,
    /// Coverage class
    pub class: CoverageClass,
    /// Latitude range covered, if restricted
    pub lat_range: Option<(f64, f64)>,
}

impl DatasetCoverage {
    fn new(dataset: &str, class: CoverageClass, lat_range: Option<(f64, f64)>) -> Self {
        Self {
            dataset: dataset.to_string(),
            class,
            lat_range,
        }
    }

    fn intersects(&self, bbox: &BoundingBox) -> bool {
        match self.lat_range {
            Some((min, max)) => bbox.min_lat <= max && bbox.max_lat >= min,
            None => true,
        }
    }
}

/// Catalog of dataset coverage
#[derive(Debug, Clone)]
pub struct CoverageCatalog {
    entries: Vec<DatasetCoverage>,
}

impl Default for CoverageCatalog {
    fn default() -> Self {
        use CoverageClass::*;
        Self {
            entries: vec![
                DatasetCoverage::new("forest_loss", Global, Some((-90.0, 90.0))),
                DatasetCoverage::new("fires", Global, Some((-90.0, 90.0))),
                DatasetCoverage::new("optical_alerts", TropicalBelt, Some((-30.0, 30.0))),
                DatasetCoverage::new("radar_alerts", HumidTropics, Some((-30.0, 30.0))),
                DatasetCoverage::new("spectral", Global, Some((-90.0, 90.0))),
                DatasetCoverage::new("infrastructure", Global, Some((-90.0, 90.0))),
                DatasetCoverage::new("registry", Unrestricted, None),
                DatasetCoverage::new("news", Unrestricted, None),
                DatasetCoverage::new("knowledge_graph", Unrestricted, None),
                DatasetCoverage::new("community", Unrestricted, None),
            ],
        }
    }
}

impl CoverageCatalog {
    /// Catalog with custom entries
    pub fn new(entries: Vec<DatasetCoverage>) -> Self {
        Self { entries }
    }

    /// Known datasets
    pub fn entries(&self) -> &[DatasetCoverage] {
        &self.entries
    }

    /// Coverage notes for a region
    ///
    /// `skipped` for datasets whose latitude range misses the box, `partial`
    /// when the box only overlaps that range or the dataset is humid-tropics
    /// only. Fully covered datasets get no note.
    pub fn assess(&self, bbox: &BoundingBox) -> Vec<CoverageNote> {
        self.entries
            .iter()
            .filter_map(|entry| {
                if !entry.intersects(bbox) {
                    let reason = match entry.lat_range {
                        Some((min, max)) => format!("Region outside dataset coverage (latitudes {} to {})", min, max),
                        None => "Region outside dataset coverage".to_string(),
                    };
                    return Some(CoverageNote::new(&entry.dataset, CoverageStatus::Skipped, Some(reason)));
                }
                if let Some((min, max)) = entry.lat_range {
                    if bbox.min_lat < min || bbox.max_lat > max {
                        return Some(CoverageNote::new(
                            &entry.dataset,
                            CoverageStatus::Partial,
                            Some(format!("Region extends beyond dataset coverage (latitudes {} to {})", min, max)),
                        ));
                    }
                }
                if entry.class == CoverageClass::HumidTropics {
                    return Some(CoverageNote::new(
                        &entry.dataset,
                        CoverageStatus::Partial,
                        Some("Coverage limited to primary humid tropical forest".to_string()),
                    ));
                }
                None
            })
            .collect()
    }
}
