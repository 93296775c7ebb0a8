//! Output formatting for the CLI.

use crate::cli::CliFormat;
use crate::error::Result;
use colored::*;
use ecoforensics_domain::{CoverageStatus, Dossier};
use ecoforensics_resolver::NameMatch;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Maximum summary width in table cells
const SUMMARY_WIDTH: usize = 80;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => OutputFormat::Table,
            CliFormat::Json => OutputFormat::Json,
            CliFormat::Quiet => OutputFormat::Quiet,
        }
    }
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a dossier.
    pub fn format_dossier(&self, dossier: &Dossier) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(dossier)?),
            OutputFormat::Table => Ok(self.format_dossier_table(dossier)),
            OutputFormat::Quiet => Ok(dossier.confidence_score.to_string()),
        }
    }

    fn format_dossier_table(&self, dossier: &Dossier) -> String {
        let mut out = Vec::new();

        out.push(self.colorize(&format!("Dossier {}", dossier.dossier_id), "cyan"));
        if let Some(region) = &dossier.region {
            out.push(format!("Region:     {}", region));
        }
        let [min_lon, min_lat, max_lon, max_lat] = dossier.bbox.to_array();
        out.push(format!(
            "BBox:       {:.4}, {:.4}, {:.4}, {:.4}",
            min_lon, min_lat, max_lon, max_lat
        ));
        out.push(format!(
            "Period:     {} to {}",
            dossier.analysis_period_start.format("%Y-%m-%d"),
            dossier.analysis_period_end.format("%Y-%m-%d")
        ));
        out.push(format!(
            "Signals:    {} fires, {} optical alerts, {} radar alerts, {} facilities",
            dossier.fires.len(),
            dossier.optical_alerts.len(),
            dossier.radar_alerts.len(),
            dossier.nearby_infrastructure.len()
        ));
        out.push(format!(
            "Confidence: {}",
            self.colorize(&format!("{}/100", dossier.confidence_score), confidence_color(dossier.confidence_score))
        ));
        out.push(String::new());

        if dossier.evidence_chain.is_empty() {
            out.push(self.colorize("No suspects found.", "yellow"));
        } else {
            let mut builder = Builder::default();
            builder.push_record(["#", "Suspect", "Registry Match", "Weight", "Evidence", "Summary"]);

            for (rank, chain) in dossier.evidence_chain.iter().enumerate() {
                let registry = match &chain.suspect.candidate {
                    Some(candidate) => format!("{} ({:.0})", candidate.name, chain.suspect.match_score),
                    None => "-".to_string(),
                };
                let evidence: Vec<&str> = chain.links.iter().map(|l| l.evidence_type.as_str()).collect();
                builder.push_record([
                    (rank + 1).to_string(),
                    chain.suspect.normalized_name.clone(),
                    registry,
                    format!("{:.3}", chain.total_weight),
                    evidence.join(", "),
                    truncate(&chain.summary, SUMMARY_WIDTH),
                ]);
            }

            let mut table = builder.build();
            table
                .with(Style::rounded())
                .with(Modify::new(Rows::first()).with(Alignment::center()));
            out.push(table.to_string());

            for chain in dossier.evidence_chain.iter().filter(|c| c.suspect.is_ambiguous()) {
                out.push(self.warning(&format!(
                    "Ambiguous registry match for {}: tied with {}",
                    chain.suspect.normalized_name,
                    chain.suspect.tied_with.join(", ")
                )));
            }
        }

        let sentiment = &dossier.sentiment;
        if sentiment.channels_present() > 0 {
            out.push(String::new());
            out.push(format!(
                "Sentiment:  {:+.2} (confidence {:.2}, {} channel(s){})",
                sentiment.final_score,
                sentiment.confidence,
                sentiment.channels_present(),
                sentiment
                    .dominant_narrative
                    .as_ref()
                    .map(|n| format!(", narrative \"{}\"", n))
                    .unwrap_or_default()
            ));
        }

        if !dossier.source_errors.is_empty() || !dossier.coverage_notes.is_empty() {
            out.push(String::new());
        }
        for error in &dossier.source_errors {
            out.push(self.warning(&format!("{} unavailable ({}): {}", error.source, error.error_type, error.message)));
        }
        for note in &dossier.coverage_notes {
            let status = match note.status {
                CoverageStatus::Available => "available",
                CoverageStatus::Skipped => "skipped",
                CoverageStatus::Partial => "partial",
            };
            let reason = note.reason.as_deref().unwrap_or("no reason given");
            out.push(self.info(&format!("{} coverage {}: {}", note.dataset, status, reason)));
        }

        out.join("\n")
    }

    /// Format normalized names as (input, normalized) pairs.
    pub fn format_normalized(&self, pairs: &[(String, String)]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = pairs
                    .iter()
                    .map(|(input, normalized)| serde_json::json!({ "input": input, "normalized": normalized }))
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Input", "Normalized"]);
                for (input, normalized) in pairs {
                    builder.push_record([input.as_str(), normalized.as_str()]);
                }
                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
            OutputFormat::Quiet => Ok(pairs
                .iter()
                .map(|(_, normalized)| normalized.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format ranked name matches.
    pub fn format_matches(&self, query: &str, matches: &[NameMatch]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = matches
                    .iter()
                    .map(|m| serde_json::json!({ "index": m.index, "name": m.name, "score": m.score }))
                    .collect();
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "query": query,
                    "matches": json,
                }))?)
            }
            OutputFormat::Table => {
                if matches.is_empty() {
                    return Ok(self.colorize(&format!("No candidates matched '{}'.", query), "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Rank", "Candidate", "Score"]);
                for (rank, m) in matches.iter().enumerate() {
                    builder.push_record([(rank + 1).to_string(), m.name.clone(), format!("{:.1}", m.score)]);
                }
                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
            OutputFormat::Quiet => Ok(matches.iter().map(|m| m.name.as_str()).collect::<Vec<_>>().join("\n")),
        }
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn confidence_color(score: u8) -> &'static str {
    match score {
        60..=u8::MAX => "red",
        30..=59 => "yellow",
        _ => "green",
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use ecoforensics_correlation::{build_dossier_at, SignalCollections};
    use ecoforensics_domain::{BoundingBox, CoverageNote, SourceError, TimeWindow};

    fn empty_dossier() -> Dossier {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let window = TimeWindow::new(now - chrono::Duration::days(90), now).unwrap();
        let signals = SignalCollections {
            region: Some("Rondonia".to_string()),
            source_errors: vec![SourceError::new("news", "Timeout", "No response", true)],
            coverage_notes: vec![CoverageNote::new(
                "radar_alerts",
                CoverageStatus::Partial,
                Some("Primary humid tropical forest only".to_string()),
            )],
            ..Default::default()
        };
        build_dossier_at(BoundingBox::new(-62.5, -10.2, -61.5, -9.2).unwrap(), window, signals, now).unwrap()
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_dossier(&empty_dossier()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["region"], "Rondonia");
        assert_eq!(value["confidence_score"], 0);
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(formatter.format_dossier(&empty_dossier()).unwrap(), "0");
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_dossier(&empty_dossier()).unwrap();
        assert!(output.contains("Region:     Rondonia"));
        assert!(output.contains("Confidence: 0/100"));
        assert!(output.contains("No suspects found."));
        assert!(output.contains("⚠ news unavailable (Timeout)"));
        assert!(output.contains("radar_alerts coverage partial"));
    }

    #[test]
    fn test_matches_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let matches = vec![NameMatch {
            index: 0,
            name: "ACME Inc".to_string(),
            score: 100.0,
        }];
        let output = formatter.format_matches("Acme", &matches).unwrap();
        assert!(output.contains("Candidate"));
        assert!(output.contains("ACME Inc"));

        let empty = formatter.format_matches("Acme", &[]).unwrap();
        assert!(empty.contains("No candidates matched"));
    }

    #[test]
    fn test_normalized_quiet() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let pairs = vec![
            ("Acme Corp".to_string(), "ACME".to_string()),
            ("Zenith Ltd".to_string(), "ZENITH".to_string()),
        ];
        assert_eq!(formatter.format_normalized(&pairs).unwrap(), "ACME\nZENITH");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.warning("slow"), "⚠ slow");
        assert_eq!(formatter.info("ok"), "ℹ ok");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
