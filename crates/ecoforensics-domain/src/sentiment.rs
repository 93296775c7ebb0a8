//! Media sentiment samples and their fused form

use serde::{Deserialize, Serialize};

/// Fixed sentiment channels in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SentimentChannel {
    /// Primary news search
    PrimaryNews,
    /// Global event knowledge graph
    KnowledgeGraph,
    /// Community discussion forums
    Community,
}

impl SentimentChannel {
    /// All channels, highest priority first
    pub const ALL: [SentimentChannel; 3] = [
        SentimentChannel::PrimaryNews,
        SentimentChannel::KnowledgeGraph,
        SentimentChannel::Community,
    ];

    /// Position in priority order (0 = highest)
    pub fn priority(&self) -> usize {
        match self {
            SentimentChannel::PrimaryNews => 0,
            SentimentChannel::KnowledgeGraph => 1,
            SentimentChannel::Community => 2,
        }
    }

    /// Wire tag
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentChannel::PrimaryNews => "primary-news",
            SentimentChannel::KnowledgeGraph => "knowledge-graph",
            SentimentChannel::Community => "community",
        }
    }
}

impl std::fmt::Display for SentimentChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sentiment measured on one channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSample {
    /// Channel the sample came from
    pub channel: SentimentChannel,
    /// Number of articles or posts analyzed
    pub count: u32,
    /// Mean sentiment in [-1, 1]
    pub score: f64,
    /// Keywords, most relevant first
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Sample headlines
    #[serde(default)]
    pub sample_titles: Vec<String>,
}

impl SentimentSample {
    /// A sample with no analyzed items carries no signal
    pub fn is_present(&self) -> bool {
        self.count > 0 && self.score.is_finite()
    }
}

/// Sentiment fused across all channels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CombinedSentiment {
    /// Primary news sample, if collected
    pub primary_news: Option<SentimentSample>,
    /// Knowledge graph sample, if collected
    pub knowledge_graph: Option<SentimentSample>,
    /// Community sample, if collected
    pub community: Option<SentimentSample>,
    /// Weighted score in [-1, 1]
    pub final_score: f64,
    /// Confidence in [0, 1]
    pub confidence: f64,
    /// Most frequent keyword across channels
    pub dominant_narrative: Option<String>,
}

impl CombinedSentiment {
    /// Sample for a channel
    pub fn channel(&self, channel: SentimentChannel) -> Option<&SentimentSample> {
        match channel {
            SentimentChannel::PrimaryNews => self.primary_news.as_ref(),
            SentimentChannel::KnowledgeGraph => self.knowledge_graph.as_ref(),
            SentimentChannel::Community => self.community.as_ref(),
        }
    }

    /// Number of channels that carried a usable sample
    pub fn channels_present(&self) -> usize {
        SentimentChannel::ALL
            .iter()
            .filter(|c| self.channel(**c).is_some_and(SentimentSample::is_present))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_wire_tags() {
        let json = serde_json::to_string(&SentimentChannel::KnowledgeGraph).unwrap();
        assert_eq!(json, "\"knowledge-graph\"");
        let parsed: SentimentChannel = serde_json::from_str("\"primary-news\"").unwrap();
        assert_eq!(parsed, SentimentChannel::PrimaryNews);
    }

    #[test]
    fn test_priority_matches_all_order() {
        for (i, channel) in SentimentChannel::ALL.iter().enumerate() {
            assert_eq!(channel.priority(), i);
        }
    }

    #[test]
    fn test_zero_count_is_not_present() {
        let sample = SentimentSample {
            channel: SentimentChannel::Community,
            count: 0,
            score: -0.9,
            keywords: vec![],
            sample_titles: vec![],
        };
        assert!(!sample.is_present());

        let combined = CombinedSentiment {
            community: Some(sample),
            ..Default::default()
        };
        assert_eq!(combined.channels_present(), 0);
    }
}
