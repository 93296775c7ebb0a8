//! Correlation engine: signal collections in, dossier out

use crate::{DossierAssembler, EngineConfig, EvidenceAggregator, Findings, Result};
use chrono::{DateTime, Utc};
use ecoforensics_domain::{
    AlertSource, BoundingBox, CorporateCandidate, CoverageNote, DamageEvent, DeforestationAlert, Dossier,
    EvidenceCandidate, FireEvent, ForestLossStats, InfrastructureNode, ResolvedSuspect,
    SentimentSample, SimilarityMetric, SourceError, SpectralEvidence, TimeWindow,
};
use ecoforensics_resolver::{EntityResolver, TokenSortRatio};
use ecoforensics_scoring::{
    sentiment_candidate, AlertDensityScorer, GeospatialProximityScorer, SentimentFusion,
    SpectralDamageScorer, TemporalCorrelationScorer,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Raw inputs gathered by collaborators for one request
///
/// Every field defaults to empty/absent, so partial bundles deserialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalCollections {
    /// Free-form region label
    pub region: Option<String>,
    /// Annual forest-loss statistics
    pub forest_loss: Option<ForestLossStats>,
    /// Thermal anomalies
    pub fires: Vec<FireEvent>,
    /// Optical clearing alerts
    pub optical_alerts: Vec<DeforestationAlert>,
    /// Radar clearing alerts
    pub radar_alerts: Vec<DeforestationAlert>,
    /// Spectral index readings
    pub spectral: Option<SpectralEvidence>,
    /// Facilities in or near the region
    pub infrastructure: Vec<InfrastructureNode>,
    /// Registry candidates
    pub candidates: Vec<CorporateCandidate>,
    /// Per-channel sentiment samples
    pub sentiment: Vec<SentimentSample>,
    /// Upstream fetch failures
    pub source_errors: Vec<SourceError>,
    /// Dataset coverage notes
    pub coverage_notes: Vec<CoverageNote>,
}

impl SignalCollections {
    /// Fires, optical alerts and radar alerts as damage events
    pub fn damage_events(&self) -> Vec<DamageEvent> {
        self.fires
            .iter()
            .cloned()
            .map(DamageEvent::from)
            .chain(self.all_alerts().into_iter().map(DamageEvent::from))
            .collect()
    }

    /// Optical and radar alerts together, tagged by the list they came from
    pub fn all_alerts(&self) -> Vec<DeforestationAlert> {
        let tagged = |alerts: &[DeforestationAlert], source: AlertSource| {
            alerts
                .iter()
                .cloned()
                .map(move |alert| DeforestationAlert { source, ..alert })
                .collect::<Vec<_>>()
        };
        let mut alerts = tagged(&self.optical_alerts, AlertSource::Optical);
        alerts.extend(tagged(&self.radar_alerts, AlertSource::Radar));
        alerts
    }

    /// Set each alert's source to match the list holding it
    pub fn tag_alert_sources(&mut self) {
        for alert in &mut self.optical_alerts {
            alert.source = AlertSource::Optical;
        }
        for alert in &mut self.radar_alerts {
            alert.source = AlertSource::Radar;
        }
    }
}

/// Runs every scorer, resolves suspects and aggregates evidence
///
/// Stateless between calls; one engine can serve concurrent requests.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use ecoforensics_correlation::{CorrelationEngine, EngineConfig, SignalCollections};
/// use ecoforensics_domain::{BoundingBox, TimeWindow};
///
/// let engine = CorrelationEngine::new(EngineConfig::default()).unwrap();
/// let bbox = BoundingBox::new(100.0, -1.0, 101.0, 0.0).unwrap();
/// let window = TimeWindow::new(
///     Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
/// )
/// .unwrap();
///
/// let dossier = engine.build_dossier(bbox, window, SignalCollections::default()).unwrap();
/// assert_eq!(dossier.confidence_score, 0);
/// ```
#[derive(Debug, Clone)]
pub struct CorrelationEngine<M: SimilarityMetric = TokenSortRatio> {
    config: EngineConfig,
    resolver: EntityResolver<M>,
    proximity: GeospatialProximityScorer,
    temporal: TemporalCorrelationScorer,
    spectral: SpectralDamageScorer,
    density: AlertDensityScorer,
    fusion: SentimentFusion,
    aggregator: EvidenceAggregator,
    assembler: DossierAssembler,
}

impl CorrelationEngine<TokenSortRatio> {
    /// Validate the configuration and build an engine with the default metric
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_metric(config, TokenSortRatio::default())
    }
}

impl<M: SimilarityMetric> CorrelationEngine<M> {
    /// Validate the configuration and build an engine with a custom metric
    pub fn with_metric(config: EngineConfig, metric: M) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            resolver: EntityResolver::with_metric(config.resolver.clone(), metric),
            proximity: GeospatialProximityScorer::from_config(&config.scoring),
            temporal: TemporalCorrelationScorer::from_config(&config.scoring),
            spectral: SpectralDamageScorer::from_config(&config.scoring),
            density: AlertDensityScorer::from_config(&config.scoring),
            fusion: SentimentFusion::from_config(&config.scoring),
            aggregator: EvidenceAggregator::from_config(&config),
            assembler: DossierAssembler::new(),
            config,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build a dossier stamped with the current time
    pub fn build_dossier(&self, bbox: BoundingBox, window: TimeWindow, signals: SignalCollections) -> Result<Dossier> {
        self.build_dossier_at(bbox, window, signals, Utc::now())
    }

    /// Build a dossier stamped with `generated_at`
    ///
    /// Identical inputs give identical dossiers apart from `dossier_id`.
    pub fn build_dossier_at(
        &self,
        bbox: BoundingBox,
        window: TimeWindow,
        mut signals: SignalCollections,
        generated_at: DateTime<Utc>,
    ) -> Result<Dossier> {
        self.assembler.validate(&bbox, &window)?;
        signals.tag_alert_sources();

        info!(
            "Correlating {} fires, {} alerts, {} facilities over {:?}",
            signals.fires.len(),
            signals.optical_alerts.len() + signals.radar_alerts.len(),
            signals.infrastructure.len(),
            bbox.to_array()
        );

        let events = signals.damage_events();
        let alerts = signals.all_alerts();
        let sentiment = self.fusion.fuse(&signals.sentiment);

        let mut regional = self.spectral.score(signals.spectral.as_ref()).candidates();
        regional.push(sentiment_candidate(&sentiment));
        regional.push(self.density.score(events.len(), &bbox).candidate());

        let suspects = self
            .resolver
            .resolve_suspects(&signals.infrastructure, &signals.candidates);
        let per_suspect: Vec<(ResolvedSuspect, Vec<EvidenceCandidate>)> = suspects
            .into_iter()
            .map(|suspect| {
                let evidence = self.attributed_evidence(&suspect, &signals, &events, &alerts);
                (suspect, evidence)
            })
            .collect();

        let aggregation = self.aggregator.aggregate(
            per_suspect,
            &regional,
            &self.config.expected_sources,
            &signals.source_errors,
            &signals.coverage_notes,
        );

        info!(
            "Correlation complete: {} suspect(s), confidence {} (completeness {:.2})",
            aggregation.chains.len(),
            aggregation.confidence_score,
            aggregation.completeness
        );

        let findings = Findings {
            suspects: aggregation.chains.iter().map(|c| c.suspect.clone()).collect(),
            sentiment,
            evidence_chain: aggregation.chains,
            confidence_score: aggregation.confidence_score,
        };
        Ok(self
            .assembler
            .assemble(bbox, window, signals, findings, generated_at))
    }

    /// Spatial and temporal evidence from the facilities carrying the suspect's name
    fn attributed_evidence(
        &self,
        suspect: &ResolvedSuspect,
        signals: &SignalCollections,
        events: &[DamageEvent],
        alerts: &[DeforestationAlert],
    ) -> Vec<EvidenceCandidate> {
        let nodes: Vec<InfrastructureNode> = signals
            .infrastructure
            .iter()
            .filter(|node| {
                node.candidate_names()
                    .iter()
                    .any(|name| self.resolver.normalize(name) == suspect.normalized_name)
            })
            .cloned()
            .collect();
        if nodes.is_empty() {
            debug!("No facilities attributed to '{}'", suspect.normalized_name);
            return Vec::new();
        }

        let max_distance = self.proximity.max_distance_m();
        let proximity = self.proximity.score(&nodes, events);

        let nearby_fires: Vec<FireEvent> = signals
            .fires
            .iter()
            .filter(|fire| {
                nodes
                    .iter()
                    .any(|node| node.location.haversine_distance_m(&fire.location) <= max_distance)
            })
            .cloned()
            .collect();
        let temporal = self.temporal.score(&nearby_fires, alerts);

        debug!(
            "'{}': {} facilities, {} nearby fires, proximity {:.3}, temporal {:.3}",
            suspect.normalized_name,
            nodes.len(),
            nearby_fires.len(),
            proximity.score,
            temporal.score
        );

        vec![
            proximity.candidate(max_distance),
            temporal.candidate(self.temporal.window_days()),
        ]
    }
}

/// Build a dossier with the default configuration
pub fn build_dossier(bbox: BoundingBox, window: TimeWindow, signals: SignalCollections) -> Result<Dossier> {
    CorrelationEngine::new(EngineConfig::default())?.build_dossier(bbox, window, signals)
}

/// Build a dossier with the default configuration and a fixed generation instant
pub fn build_dossier_at(
    bbox: BoundingBox,
    window: TimeWindow,
    signals: SignalCollections,
    generated_at: DateTime<Utc>,
) -> Result<Dossier> {
    CorrelationEngine::new(EngineConfig::default())?.build_dossier_at(bbox, window, signals, generated_at)
}
