//! Per-run pipeline report.
//!
//! One immutable [`Report`] is produced per invocation for the caller's
//! logging and telemetry. It records how the run ended, the block count
//! at each stage boundary, the top-scored blocks for diagnostics, and
//! the effective configuration.

use serde::Serialize;

use crate::config::OptimizeConfig;
use crate::score::Scored;

/// How many top-scored blocks the report keeps for diagnostics.
const TOP_BLOCKS: usize = 10;
/// Preview length for diagnostic block text, in characters.
const PREVIEW_CHARS: usize = 80;

/// How an optimization run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The pipeline ran and produced a reduced document.
    Optimized,
    /// Configuration bypassed the pipeline; input returned unchanged.
    Disabled,
    /// Nothing extractable; input returned unchanged.
    NoContentBlocks,
    /// An unexpected failure; input returned unchanged.
    Failed,
}

/// Block counts at each stage boundary.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StageCounts {
    /// Blocks emitted by the structural extractor.
    pub candidates: usize,
    /// Blocks surviving cleaning.
    pub cleaned: usize,
    /// Blocks surviving the quality filter.
    pub quality_passed: usize,
    /// Blocks surviving retention selection.
    pub retained: usize,
    /// Blocks surviving diversity selection.
    pub diversified: usize,
}

/// One diagnostic entry for a top-scored block.
#[derive(Debug, Clone, Serialize)]
pub struct TopBlock {
    /// Originating tag.
    pub tag: String,
    /// Composite score.
    pub score: f64,
    /// Leading characters of the block text.
    pub preview: String,
}

/// Immutable summary of one optimization run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// How the run ended.
    pub optimization: Outcome,
    /// The page URL, when the caller supplied one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Stage-boundary block counts.
    pub counts: StageCounts,
    /// Top-scored blocks, for diagnostics.
    pub top_blocks: Vec<TopBlock>,
    /// Effective configuration for the run.
    pub config: OptimizeConfig,
    /// Error description, only for the `failed` outcome.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Report {
    /// Report for a configuration-bypassed run.
    pub fn disabled(config: OptimizeConfig, url: Option<&str>) -> Self {
        Self {
            optimization: Outcome::Disabled,
            url: url.map(String::from),
            counts: StageCounts::default(),
            top_blocks: Vec::new(),
            config,
            error: None,
        }
    }

    /// Report for a run that found nothing extractable.
    pub fn no_content(config: OptimizeConfig, url: Option<&str>, counts: StageCounts) -> Self {
        Self {
            optimization: Outcome::NoContentBlocks,
            url: url.map(String::from),
            counts,
            top_blocks: Vec::new(),
            config,
            error: None,
        }
    }

    /// Report for a run degraded by an unexpected failure.
    pub fn failed(config: OptimizeConfig, url: Option<&str>, error: String) -> Self {
        Self {
            optimization: Outcome::Failed,
            url: url.map(String::from),
            counts: StageCounts::default(),
            top_blocks: Vec::new(),
            config,
            error: Some(error),
        }
    }

    /// Report for a completed run.
    ///
    /// `scored` is the full score-sorted block list; the report keeps
    /// previews of the leading entries.
    pub fn optimized(config: OptimizeConfig, url: Option<&str>, counts: StageCounts, scored: &[Scored]) -> Self {
        let top_blocks = scored
            .iter()
            .take(TOP_BLOCKS)
            .map(|s| TopBlock {
                tag: s.block.tag.clone(),
                score: s.total_score,
                preview: s.block.text.chars().take(PREVIEW_CHARS).collect(),
            })
            .collect();

        Self {
            optimization: Outcome::Optimized,
            url: url.map(String::from),
            counts,
            top_blocks,
            config,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_report_serialization() {
        let report = Report::disabled(OptimizeConfig::default(), None);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["optimization"], "disabled");
        assert!(json.get("error").is_none());
        assert_eq!(json["counts"]["candidates"], 0);
    }

    #[test]
    fn test_failed_report_carries_error() {
        let report = Report::failed(OptimizeConfig::default(), Some("https://example.com"), "boom".to_string());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["optimization"], "failed");
        assert_eq!(json["error"], "boom");
        assert_eq!(json["url"], "https://example.com");
    }

    #[test]
    fn test_no_content_outcome_name() {
        let report = Report::no_content(OptimizeConfig::default(), None, StageCounts::default());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["optimization"], "no_content_blocks");
    }

    #[test]
    fn test_config_snapshot_embedded() {
        let config = OptimizeConfig::builder().min_keep_k(7).build();
        let report = Report::disabled(config, None);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["config"]["min_keep_k"], 7);
    }
}
