//! End-to-end dossier tests
//!
//! Drive `build_dossier_at` and the public scorers with hand-built signal
//! collections.

use chrono::{DateTime, Duration, TimeZone, Utc};
use ecoforensics_correlation::{
    build_dossier, build_dossier_at, CorrelationEngine, CorrelationError, CoverageCatalog, EngineConfig,
    SignalCollections,
};
use ecoforensics_domain::{
    AlertSource, BoundingBox, CoverageStatus, DamageEvent, DamageKind, DeforestationAlert, EvidenceKind, FireEvent,
    GeoPoint, InfrastructureNode, SentimentChannel, SentimentSample, SourceError, SpectralEvidence,
    TimeWindow, ValidationError,
};
use ecoforensics_scoring::{
    GeospatialProximityScorer, ScoringConfig, SentimentFusion, SpectralDamageScorer, TemporalCorrelationScorer,
};
use std::collections::BTreeMap;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 8, 15, 6, 0, 0).unwrap()
}

fn window() -> TimeWindow {
    TimeWindow::new(t0() - Duration::days(90), t0()).unwrap()
}

fn riau() -> BoundingBox {
    BoundingBox::new(101.0, 0.0, 101.5, 0.5).unwrap()
}

fn point(lat: f64, lon: f64) -> GeoPoint {
    GeoPoint {
        latitude: lat,
        longitude: lon,
    }
}

fn facility(id: i64, name: &str, lat: f64, lon: f64) -> InfrastructureNode {
    InfrastructureNode {
        id,
        name: Some(name.to_string()),
        node_type: "works".to_string(),
        location: point(lat, lon),
        distance_m: None,
        tags: BTreeMap::new(),
    }
}

fn fire(lat: f64, lon: f64, at: DateTime<Utc>) -> FireEvent {
    FireEvent {
        location: point(lat, lon),
        acquired_at: at,
        confidence: Some(90),
        brightness: Some(330.5),
        frp: Some(12.0),
        satellite: "VIIRS".to_string(),
    }
}

fn alert(lat: f64, lon: f64, at: DateTime<Utc>, source: AlertSource) -> DeforestationAlert {
    DeforestationAlert {
        location: point(lat, lon),
        detected_at: at,
        confidence: Some(85),
        area_ha: Some(1.5),
        source,
    }
}

fn sample(channel: SentimentChannel, count: u32, score: f64, keywords: &[&str]) -> SentimentSample {
    SentimentSample {
        channel,
        count,
        score,
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        sample_titles: vec![],
    }
}

/// A mill surrounded by recent fires and clearing, plus a distant warehouse
fn hotspot_signals() -> SignalCollections {
    SignalCollections {
        region: Some("Riau, Indonesia".to_string()),
        infrastructure: vec![
            facility(1, "PT Kampar Palm Oil", 0.25, 101.25),
            facility(2, "Siak Logistics Ltd", 0.45, 101.45),
        ],
        fires: vec![
            fire(0.251, 101.251, t0() - Duration::days(10)),
            fire(0.252, 101.249, t0() - Duration::days(9)),
        ],
        optical_alerts: vec![alert(0.249, 101.252, t0() - Duration::days(14), AlertSource::Optical)],
        radar_alerts: vec![alert(0.253, 101.25, t0() - Duration::days(12), AlertSource::Radar)],
        spectral: Some(SpectralEvidence {
            ndvi: Some(0.15),
            nbr: Some(-0.2),
            burn_index: Some(0.7),
            ..Default::default()
        }),
        sentiment: vec![
            sample(SentimentChannel::PrimaryNews, 30, -0.6, &["haze", "palm oil"]),
            sample(SentimentChannel::Community, 20, -0.4, &["haze"]),
        ],
        ..Default::default()
    }
}

// Scenario A
#[test]
fn test_nearby_event_scores_proximity() {
    let scorer = GeospatialProximityScorer::new(5000.0, 3);
    let nodes = vec![facility(1, "Mill", 0.0, 0.0)];
    let events = vec![DamageEvent::from(fire(0.001, 0.001, t0()))];

    let result = scorer.score(&nodes, &events);
    assert!(result.score > 0.0);
    assert_eq!(result.details.len(), 1);
    assert!((result.details[0].distance_m - 157.0).abs() < 1.0);
}

// Scenario B
#[test]
fn test_distant_event_scores_zero() {
    let scorer = GeospatialProximityScorer::new(5000.0, 3);
    let nodes = vec![facility(1, "Mill", 0.0, 0.0)];
    let events = vec![DamageEvent::from(fire(10.0, 10.0, t0()))];

    let result = scorer.score(&nodes, &events);
    assert_eq!(result.score, 0.0);
    assert!(result.details.is_empty());
}

// Scenarios C and D
#[test]
fn test_temporal_window() {
    let scorer = TemporalCorrelationScorer::new(14, 3);
    let fires = vec![fire(0.0, 0.0, t0())];

    let close = scorer.score(&fires, &[alert(0.0, 0.0, t0() - Duration::days(5), AlertSource::Optical)]);
    assert!(close.score > 0.0);
    assert_eq!(close.details.len(), 1);
    assert_eq!(close.details[0].days_apart, 5);

    let far = scorer.score(&fires, &[alert(0.0, 0.0, t0() - Duration::days(30), AlertSource::Optical)]);
    assert_eq!(far.score, 0.0);
    assert!(far.details.is_empty());
}

// Scenario E and absence vs zero
#[test]
fn test_spectral_scores() {
    let scorer = SpectralDamageScorer::from_config(&ScoringConfig::default());

    let low = scorer.score(Some(&SpectralEvidence {
        ndvi: Some(0.1),
        ..Default::default()
    }));
    assert!(low.ndvi_score > 0.5);

    let healthy = scorer.score(Some(&SpectralEvidence {
        ndvi: Some(0.8),
        ..Default::default()
    }));
    assert!(healthy.ndvi_score < 0.3);

    let absent = scorer.score(Some(&SpectralEvidence {
        ndvi: None,
        ..Default::default()
    }));
    assert_eq!(absent.ndvi_score, 0.0);

    let bare = scorer.score(Some(&SpectralEvidence {
        ndvi: Some(0.0),
        ..Default::default()
    }));
    assert_eq!(bare.ndvi_score, 1.0);
}

// Scenario F
#[test]
fn test_three_negative_channels() {
    let fusion = SentimentFusion::from_config(&ScoringConfig::default());
    let combined = fusion.fuse(&[
        sample(SentimentChannel::PrimaryNews, 40, -0.7, &["haze", "palm oil"]),
        sample(SentimentChannel::KnowledgeGraph, 5, -0.3, &["haze", "lawsuit"]),
        sample(SentimentChannel::Community, 25, -0.5, &["haze", "fires"]),
    ]);

    assert!(combined.final_score < 0.0);
    assert!(combined.confidence > 0.5);
    assert_eq!(combined.dominant_narrative.as_deref(), Some("haze"));
}

#[test]
fn test_hotspot_dossier() {
    let dossier = build_dossier_at(riau(), window(), hotspot_signals(), t0()).unwrap();

    assert_eq!(dossier.region.as_deref(), Some("Riau, Indonesia"));
    assert_eq!(dossier.generated_at, t0());
    assert_eq!(dossier.fires.len(), 2);
    assert_eq!(dossier.nearby_infrastructure.len(), 2);
    assert_eq!(dossier.suspects.len(), 2);

    let lead = dossier.lead_suspect().unwrap();
    assert_eq!(lead.suspect.normalized_name, "PT KAMPAR PALM OIL");
    assert_eq!(lead.links[0].evidence_type, EvidenceKind::SpatialProximity);
    assert!(lead
        .links
        .iter()
        .any(|l| l.evidence_type == EvidenceKind::TemporalCorrelation));
    assert!(lead.total_weight > 0.0 && lead.total_weight <= 1.0);
    assert!(lead.summary.starts_with("PT KAMPAR PALM OIL: facility located near observed damage"));

    // Links follow evidence priority order
    let kinds: Vec<EvidenceKind> = lead.links.iter().map(|l| l.evidence_type).collect();
    let mut sorted = kinds.clone();
    sorted.sort();
    assert_eq!(kinds, sorted);

    assert!(dossier.confidence_score > 0);
    assert!(dossier.confidence_score <= 100);
    assert!(dossier.sentiment.final_score < 0.0);
}

#[test]
fn test_source_error_never_raises_confidence() {
    let baseline = build_dossier_at(riau(), window(), hotspot_signals(), t0()).unwrap();

    let mut degraded_signals = hotspot_signals();
    degraded_signals
        .source_errors
        .push(SourceError::new("news", "Timeout", "No response within 30000 ms", true));
    let degraded = build_dossier_at(riau(), window(), degraded_signals, t0()).unwrap();

    assert!(degraded.confidence_score <= baseline.confidence_score);
    assert_eq!(degraded.source_errors.len(), 1);
}

#[test]
fn test_skipped_coverage_lowers_confidence() {
    let baseline = build_dossier_at(riau(), window(), hotspot_signals(), t0()).unwrap();

    let mut signals = hotspot_signals();
    let boreal = BoundingBox::new(10.0, 58.0, 12.0, 60.0).unwrap();
    signals.coverage_notes = CoverageCatalog::default().assess(&boreal);
    assert!(signals
        .coverage_notes
        .iter()
        .any(|n| n.status == CoverageStatus::Skipped));

    let reduced = build_dossier_at(riau(), window(), signals, t0()).unwrap();
    assert!(reduced.confidence_score <= baseline.confidence_score);
}

#[test]
fn test_degenerate_bbox_rejected() {
    let flat = BoundingBox {
        min_lon: 101.0,
        min_lat: 0.5,
        max_lon: 101.5,
        max_lat: 0.5,
    };
    let result = build_dossier(flat, window(), hotspot_signals());
    assert!(matches!(
        result,
        Err(CorrelationError::MalformedInput(ValidationError::InvertedBounds { .. }))
    ));
}

#[test]
fn test_out_of_range_bbox_rejected() {
    let bad = BoundingBox {
        min_lon: 101.0,
        min_lat: 0.0,
        max_lon: 101.5,
        max_lat: 95.0,
    };
    assert!(matches!(
        build_dossier(bad, window(), SignalCollections::default()),
        Err(CorrelationError::MalformedInput(_))
    ));
}

#[test]
fn test_empty_collections() {
    let dossier = build_dossier_at(riau(), window(), SignalCollections::default(), t0()).unwrap();

    assert!(dossier.suspects.is_empty());
    assert!(dossier.evidence_chain.is_empty());
    assert_eq!(dossier.confidence_score, 0);
    assert_eq!(dossier.sentiment.final_score, 0.0);
    assert_eq!(dossier.sentiment.confidence, 0.0);
    assert!(dossier.forest_loss.is_none());
}

#[test]
fn test_deterministic_output() {
    let first = build_dossier_at(riau(), window(), hotspot_signals(), t0()).unwrap();
    let second = build_dossier_at(riau(), window(), hotspot_signals(), t0()).unwrap();

    assert_ne!(first.dossier_id, second.dossier_id);
    assert_eq!(first.suspects, second.suspects);
    assert_eq!(first.evidence_chain, second.evidence_chain);
    assert_eq!(first.sentiment, second.sentiment);
    assert_eq!(first.confidence_score, second.confidence_score);
}

#[test]
fn test_strict_config_narrows_radius() {
    let mut signals = hotspot_signals();
    // About 3.3 km from the mill: inside the default radius, outside strict
    signals.fires = vec![fire(0.28, 101.25, t0() - Duration::days(10))];
    signals.optical_alerts.clear();
    signals.radar_alerts.clear();

    let default_engine = CorrelationEngine::new(EngineConfig::default()).unwrap();
    let strict_engine = CorrelationEngine::new(EngineConfig::strict()).unwrap();

    let has_proximity = |engine: &CorrelationEngine| {
        let dossier = engine
            .build_dossier_at(riau(), window(), signals.clone(), t0())
            .unwrap();
        dossier
            .evidence_chain
            .iter()
            .find(|c| c.suspect.normalized_name == "PT KAMPAR PALM OIL")
            .map(|c| c.links.iter().any(|l| l.evidence_type == EvidenceKind::SpatialProximity))
            .unwrap_or(false)
    };

    assert!(has_proximity(&default_engine));
    assert!(!has_proximity(&strict_engine));
}

#[test]
fn test_dossier_wire_format() {
    let dossier = build_dossier_at(riau(), window(), hotspot_signals(), t0()).unwrap();
    let json = serde_json::to_value(&dossier).unwrap();

    for key in [
        "dossier_id",
        "region",
        "bbox",
        "generated_at",
        "analysis_period_start",
        "analysis_period_end",
        "forest_loss",
        "fires",
        "optical_alerts",
        "radar_alerts",
        "spectral",
        "nearby_infrastructure",
        "suspects",
        "sentiment",
        "evidence_chain",
        "confidence_score",
        "source_errors",
        "coverage_notes",
    ] {
        assert!(json.get(key).is_some(), "missing key {}", key);
    }
    assert_eq!(json["bbox"]["min_lon"], 101.0);
    assert!(json["confidence_score"].is_u64());
    assert_eq!(json["evidence_chain"][0]["links"][0]["evidence_type"], "spatial_proximity");
}

#[test]
fn test_signal_collections_partial_json() {
    let signals: SignalCollections = serde_json::from_str(
        r#"{
            "region": "Test",
            "fires": [
                {"latitude": 0.25, "longitude": 101.25, "acquired_at": "2024-08-01T00:00:00Z", "satellite": "MODIS"}
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(signals.fires.len(), 1);
    assert!(signals.spectral.is_none());
    assert!(signals.infrastructure.is_empty());
}

#[test]
fn test_untagged_radar_alert_counts_as_radar() {
    let signals: SignalCollections = serde_json::from_str(
        r#"{
            "radar_alerts": [
                {"latitude": 0.25, "longitude": 101.25, "detected_at": "2024-08-01T00:00:00Z"}
            ]
        }"#,
    )
    .unwrap();
    let kinds: Vec<DamageKind> = signals.damage_events().iter().map(|e| e.kind()).collect();
    assert_eq!(kinds, vec![DamageKind::RadarAlert]);

    let dossier = build_dossier_at(riau(), window(), signals, t0()).unwrap();
    assert_eq!(dossier.radar_alerts[0].source, AlertSource::Radar);
}
