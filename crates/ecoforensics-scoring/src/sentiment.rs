//! Fusing per-channel sentiment into one signal

use crate::{ChannelWeights, ScoringConfig};
use ecoforensics_domain::{
    CombinedSentiment, EvidenceCandidate, EvidenceKind, SentimentChannel, SentimentSample,
};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Combines up to three channel samples with renormalized base weights
#[derive(Debug, Clone)]
pub struct SentimentFusion {
    weights: ChannelWeights,
    sample_saturation: u32,
}

impl SentimentFusion {
    /// Create a fusion step from the shared configuration
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self {
            weights: config.channel_weights.clone(),
            sample_saturation: config.sentiment_sample_saturation,
        }
    }

    /// Fuse channel samples
    ///
    /// The first sample per channel wins; zero-count samples are kept on the
    /// output for transparency but carry no weight.
    pub fn fuse(&self, samples: &[SentimentSample]) -> CombinedSentiment {
        let mut combined = CombinedSentiment::default();
        for sample in samples {
            let slot = match sample.channel {
                SentimentChannel::PrimaryNews => &mut combined.primary_news,
                SentimentChannel::KnowledgeGraph => &mut combined.knowledge_graph,
                SentimentChannel::Community => &mut combined.community,
            };
            if slot.is_some() {
                debug!("Duplicate sentiment sample for {}, keeping the first", sample.channel);
                continue;
            }
            *slot = Some(sample.clone());
        }

        let present: Vec<&SentimentSample> = SentimentChannel::ALL
            .iter()
            .filter_map(|c| combined.channel(*c))
            .filter(|s| s.is_present())
            .collect();

        let final_score = self.final_score(&present);
        let confidence = self.confidence(&present);
        let narrative = dominant_narrative(&present);

        combined.final_score = final_score;
        combined.confidence = confidence;
        combined.dominant_narrative = narrative;
        combined
    }

    fn final_score(&self, present: &[&SentimentSample]) -> f64 {
        let total_weight: f64 = present.iter().map(|s| self.weights.weight(s.channel)).sum();
        if present.is_empty() || !(total_weight > 0.0) {
            return 0.0;
        }
        present
            .iter()
            .map(|s| (self.weights.weight(s.channel) / total_weight) * s.score.clamp(-1.0, 1.0))
            .sum::<f64>()
            .clamp(-1.0, 1.0)
    }

    fn confidence(&self, present: &[&SentimentSample]) -> f64 {
        if present.is_empty() {
            return 0.0;
        }
        let diversity = present.len() as f64 / SentimentChannel::ALL.len() as f64;
        let total_samples: u64 = present.iter().map(|s| u64::from(s.count)).sum();
        let saturation = if self.sample_saturation == 0 {
            1.0
        } else {
            (total_samples as f64 / f64::from(self.sample_saturation)).min(1.0)
        };
        (diversity * (0.5 + 0.5 * saturation)).clamp(0.0, 1.0)
    }
}

impl Default for SentimentFusion {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}

/// Most frequent keyword across present channels
///
/// Ties go to the channel where the keyword first appears (priority order),
/// then alphabetical order.
fn dominant_narrative(present: &[&SentimentSample]) -> Option<String> {
    // keyword -> (count, first channel priority)
    let mut tally: HashMap<&str, (usize, usize)> = HashMap::new();
    for sample in present {
        let mut seen: HashSet<&str> = HashSet::new();
        for keyword in &sample.keywords {
            let keyword = keyword.trim();
            if keyword.is_empty() || !seen.insert(keyword) {
                continue;
            }
            let entry = tally.entry(keyword).or_insert((0, sample.channel.priority()));
            entry.0 += 1;
            entry.1 = entry.1.min(sample.channel.priority());
        }
    }

    tally
        .into_iter()
        .min_by(|(ka, (ca, pa)), (kb, (cb, pb))| cb.cmp(ca).then(pa.cmp(pb)).then(ka.cmp(kb)))
        .map(|(keyword, _)| keyword.to_string())
}

/// Negative-sentiment evidence candidate; positive or neutral sentiment scores 0
pub fn sentiment_candidate(sentiment: &CombinedSentiment) -> EvidenceCandidate {
    let sub_score = if sentiment.final_score < 0.0 {
        (-sentiment.final_score).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let channels = sentiment.channels_present();
    let mut description = if channels == 0 {
        "No media sentiment available".to_string()
    } else {
        format!(
            "Media sentiment {:.2} across {} channel(s)",
            sentiment.final_score, channels
        )
    };
    if let Some(narrative) = &sentiment.dominant_narrative {
        description.push_str(&format!("; dominant narrative: {}", narrative));
    }

    let mut candidate = EvidenceCandidate::new(EvidenceKind::NegativeSentiment, sub_score, description)
        .with_data("final_score", sentiment.final_score)
        .with_data("confidence", sentiment.confidence)
        .with_data("channels", channels);
    if let Some(narrative) = &sentiment.dominant_narrative {
        candidate = candidate.with_data("dominant_narrative", narrative.as_str());
    }
    candidate
}
