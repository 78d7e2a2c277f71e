//! Pipeline configuration.
//!
//! One [`OptimizeConfig`] value is constructed by the caller, passed
//! into the pipeline entry point, and never mutated mid-run. Nothing in
//! the crate reads process environment; every knob lives here.

use serde::Serialize;

/// Configuration for the pre-filtering pipeline.
///
/// # Example
///
/// ```rust
/// use cribro_core::OptimizeConfig;
///
/// let config = OptimizeConfig::builder()
///     .min_text_length(60)
///     .content_ratio(0.3)
///     .build();
/// assert_eq!(config.min_text_length, 60);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct OptimizeConfig {
    /// Bypass the entire pipeline when false.
    pub enabled: bool,
    /// Block length floor, in characters.
    pub min_text_length: usize,
    /// Vector-space vocabulary cap.
    pub max_features: usize,
    /// Vocabulary document-frequency floor.
    pub min_df: usize,
    /// Vocabulary document-frequency ceiling, as a fraction of documents.
    pub max_df: f64,
    /// Minimum score for percentile-based retention.
    pub score_floor: f64,
    /// Fraction of blocks retained by rank.
    pub content_ratio: f64,
    /// Absolute floor on rank-based retention.
    pub min_keep_k: usize,
    /// Percentile used for score-based retention.
    pub percentile_threshold: f64,
    /// Quality-filter link density ceiling.
    pub max_link_density: f64,
    /// Quality-filter alphanumeric ratio floor.
    pub min_alphanumeric_ratio: f64,
    /// Toggles the injected segmenter vs. the bigram fallback.
    pub enable_cjk_segmentation: bool,
}

impl Default for OptimizeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_text_length: 80,
            max_features: 10_000,
            min_df: 2,
            max_df: 0.8,
            score_floor: 0.06,
            content_ratio: 0.2,
            min_keep_k: 80,
            percentile_threshold: 0.80,
            max_link_density: 0.3,
            min_alphanumeric_ratio: 0.5,
            enable_cjk_segmentation: true,
        }
    }
}

impl OptimizeConfig {
    /// Creates a new builder with default values.
    pub fn builder() -> OptimizeConfigBuilder {
        OptimizeConfigBuilder::new()
    }
}

/// Builder for [`OptimizeConfig`].
pub struct OptimizeConfigBuilder {
    config: OptimizeConfig,
}

impl OptimizeConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: OptimizeConfig::default() }
    }

    /// Enables or bypasses the pipeline.
    pub fn enabled(mut self, value: bool) -> Self {
        self.config.enabled = value;
        self
    }

    /// Sets the block length floor.
    pub fn min_text_length(mut self, value: usize) -> Self {
        self.config.min_text_length = value;
        self
    }

    /// Sets the vocabulary cap.
    pub fn max_features(mut self, value: usize) -> Self {
        self.config.max_features = value;
        self
    }

    /// Sets the document-frequency floor.
    pub fn min_df(mut self, value: usize) -> Self {
        self.config.min_df = value;
        self
    }

    /// Sets the document-frequency ceiling.
    pub fn max_df(mut self, value: f64) -> Self {
        self.config.max_df = value;
        self
    }

    /// Sets the retention score floor.
    pub fn score_floor(mut self, value: f64) -> Self {
        self.config.score_floor = value;
        self
    }

    /// Sets the rank-retained fraction.
    pub fn content_ratio(mut self, value: f64) -> Self {
        self.config.content_ratio = value;
        self
    }

    /// Sets the absolute rank-retention floor.
    pub fn min_keep_k(mut self, value: usize) -> Self {
        self.config.min_keep_k = value;
        self
    }

    /// Sets the retention percentile.
    pub fn percentile_threshold(mut self, value: f64) -> Self {
        self.config.percentile_threshold = value;
        self
    }

    /// Sets the link density ceiling.
    pub fn max_link_density(mut self, value: f64) -> Self {
        self.config.max_link_density = value;
        self
    }

    /// Sets the alphanumeric ratio floor.
    pub fn min_alphanumeric_ratio(mut self, value: f64) -> Self {
        self.config.min_alphanumeric_ratio = value;
        self
    }

    /// Toggles CJK segmentation.
    pub fn enable_cjk_segmentation(mut self, value: bool) -> Self {
        self.config.enable_cjk_segmentation = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> OptimizeConfig {
        self.config
    }
}

impl Default for OptimizeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = OptimizeConfig::default();

        assert!(config.enabled);
        assert_eq!(config.min_text_length, 80);
        assert_eq!(config.max_features, 10_000);
        assert_eq!(config.min_df, 2);
        assert_eq!(config.max_df, 0.8);
        assert_eq!(config.score_floor, 0.06);
        assert_eq!(config.content_ratio, 0.2);
        assert_eq!(config.min_keep_k, 80);
        assert_eq!(config.percentile_threshold, 0.80);
        assert_eq!(config.max_link_density, 0.3);
        assert_eq!(config.min_alphanumeric_ratio, 0.5);
        assert!(config.enable_cjk_segmentation);
    }

    #[test]
    fn test_builder_overrides() {
        let config = OptimizeConfig::builder()
            .enabled(false)
            .min_keep_k(5)
            .max_link_density(0.5)
            .build();

        assert!(!config.enabled);
        assert_eq!(config.min_keep_k, 5);
        assert_eq!(config.max_link_density, 0.5);
        assert_eq!(config.min_text_length, 80);
    }
}
