//! Pipeline entry point.
//!
//! [`Optimizer`] wires the stages into one synchronous pass: noise
//! removal, block extraction, cleaning, scoring, quality filtering,
//! retention, diversity selection, and reassembly. Each invocation owns
//! its working tree and block collection outright, so concurrent calls
//! never share state.
//!
//! The public contract never fails: whatever happens inside, the caller
//! gets back a usable `(String, Report)` pair. Degraded paths return
//! the input unchanged with the outcome recorded in the report.
//!
//! # Example
//!
//! ```rust
//! use cribro_core::Optimizer;
//!
//! let optimizer = Optimizer::new();
//! let (html, report) = optimizer.optimize("<html><body><p>Hello</p></body></html>");
//! println!("{:?}: {} candidates", report.optimization, report.counts.candidates);
//! # let _ = html;
//! ```

use crate::clean::clean_blocks;
use crate::config::OptimizeConfig;
use crate::diversity::diversify;
use crate::extract::extract_blocks;
use crate::parse::Document;
use crate::preprocess::strip_noise;
use crate::quality::quality_filter;
use crate::reassemble::reassemble;
use crate::report::{Report, StageCounts};
use crate::retain::retain_blocks;
use crate::score::score_blocks;
use crate::tokenize::Segmenter;
use crate::Result;

/// Downstream boilerplate-removal capability.
///
/// The reassembled document is handed to an external general-purpose
/// extractor; its heuristics and configuration are its own business.
/// Tests substitute stub implementations.
pub trait ContentExtractor: Send + Sync {
    /// Extracts final plain text from markup.
    fn extract(&self, html: &str) -> Result<String>;
}

/// Optional per-request context for an optimization run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestMeta<'a> {
    /// Source URL, echoed into the report.
    pub url: Option<&'a str>,
    /// Page title; folded into the query when one is supplied.
    pub title: Option<&'a str>,
    /// Caller intent text. When present, blocks are scored against it
    /// instead of the corpus centroid.
    pub query: Option<&'a str>,
}

/// The pre-filtering pipeline.
///
/// Holds one immutable configuration and an optionally injected
/// [`Segmenter`]. Construction is cheap; a single value can serve any
/// number of concurrent calls.
pub struct Optimizer {
    config: OptimizeConfig,
    segmenter: Option<Box<dyn Segmenter>>,
}

impl Optimizer {
    /// Creates an optimizer with default settings and no segmenter.
    pub fn new() -> Self {
        Self { config: OptimizeConfig::default(), segmenter: None }
    }

    /// Creates an optimizer with a custom configuration.
    pub fn with_config(config: OptimizeConfig) -> Self {
        Self { config, segmenter: None }
    }

    /// Creates an optimizer with a configuration and a CJK segmenter.
    pub fn with_config_and_segmenter(config: OptimizeConfig, segmenter: Box<dyn Segmenter>) -> Self {
        Self { config, segmenter: Some(segmenter) }
    }

    /// The active configuration.
    pub fn config(&self) -> &OptimizeConfig {
        &self.config
    }

    /// Optimizes markup with no request context.
    pub fn optimize(&self, html: &str) -> (String, Report) {
        self.optimize_with(html, &RequestMeta::default())
    }

    /// Optimizes markup, returning the reduced document and the run
    /// report.
    ///
    /// Never fails: a disabled configuration, an empty document, or an
    /// internal error all return the input unchanged with the outcome
    /// recorded in the report.
    pub fn optimize_with(&self, html: &str, meta: &RequestMeta<'_>) -> (String, Report) {
        if !self.config.enabled {
            return (html.to_string(), Report::disabled(self.config.clone(), meta.url));
        }

        match self.run(html, meta) {
            Ok(result) => result,
            Err(err) => (html.to_string(), Report::failed(self.config.clone(), meta.url, err.to_string())),
        }
    }

    /// Optimizes markup and drives the downstream extractor over it.
    ///
    /// On a degraded outcome the extractor receives the original markup
    /// instead, so pre-filtering can only ever narrow its input, never
    /// lose the page.
    pub fn optimize_and_extract(
        &self, html: &str, meta: &RequestMeta<'_>, extractor: &dyn ContentExtractor,
    ) -> Result<(String, Report)> {
        let (optimized, report) = self.optimize_with(html, meta);

        let source = if report.optimization == crate::report::Outcome::Optimized { optimized.as_str() } else { html };
        let text = extractor.extract(source)?;

        Ok((text, report))
    }

    fn run(&self, html: &str, meta: &RequestMeta<'_>) -> Result<(String, Report)> {
        let mut counts = StageCounts::default();

        let working = strip_noise(html);
        let doc = Document::parse(&working)?;

        let blocks = extract_blocks(&doc, self.config.min_text_length);
        counts.candidates = blocks.len();
        if blocks.is_empty() {
            return Ok((html.to_string(), Report::no_content(self.config.clone(), meta.url, counts)));
        }

        let blocks = clean_blocks(blocks);
        counts.cleaned = blocks.len();
        if blocks.is_empty() {
            return Ok((html.to_string(), Report::no_content(self.config.clone(), meta.url, counts)));
        }

        let query = combine_query(meta);
        let scored = score_blocks(blocks, query.as_deref(), self.segmenter.as_deref(), &self.config);
        let top_snapshot: Vec<_> = scored.iter().take(10).cloned().collect();

        let passed = quality_filter(scored, &self.config);
        counts.quality_passed = passed.len();
        if passed.is_empty() {
            return Ok((html.to_string(), Report::no_content(self.config.clone(), meta.url, counts)));
        }

        let retained = retain_blocks(passed, &self.config);
        counts.retained = retained.len();

        let selected = diversify(retained);
        counts.diversified = selected.len();

        let reduced = reassemble(&selected);
        let report = Report::optimized(self.config.clone(), meta.url, counts, &top_snapshot);

        Ok((reduced, report))
    }
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Optimizes markup with the default configuration.
pub fn optimize(html: &str) -> (String, Report) {
    Optimizer::new().optimize(html)
}

/// Builds the scoring query from the request context.
///
/// A supplied query switches scoring away from coverage-priority mode;
/// the title is folded in alongside it. A title alone does not: scoring
/// a page against nothing but its own title defeats coverage-priority
/// ranking.
fn combine_query(meta: &RequestMeta<'_>) -> Option<String> {
    match (meta.title, meta.query) {
        (Some(title), Some(query)) => Some(format!("{} {}", title, query)),
        (None, Some(query)) => Some(query.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Outcome;

    fn article_html() -> String {
        let mut body = String::new();
        body.push_str("<h1>Observations on compiler diagnostics</h1>");
        for i in 0..12 {
            body.push_str(&format!(
                "<p>Paragraph number {i} discusses compiler diagnostics, error spans, and the \
                 way suggestion engines shape how newcomers learn a language over time.</p>"
            ));
        }
        format!("<html><head><title>Diagnostics</title></head><body>{body}</body></html>")
    }

    #[test]
    fn test_optimize_produces_reduced_document() {
        let html = article_html();
        let (out, report) = Optimizer::new().optimize(&html);

        assert_eq!(report.optimization, Outcome::Optimized);
        assert!(report.counts.candidates > 0);
        assert!(report.counts.diversified > 0);
        assert!(out.contains("<p>"));
        assert!(!out.contains("<head>"));
    }

    #[test]
    fn test_disabled_returns_input_unchanged() {
        let html = article_html();
        let config = OptimizeConfig::builder().enabled(false).build();
        let (out, report) = Optimizer::with_config(config).optimize(&html);

        assert_eq!(out, html);
        assert_eq!(report.optimization, Outcome::Disabled);
    }

    #[test]
    fn test_tiny_document_reports_no_content() {
        let html = "<html><body><p>Sixty characters of text is not enough.</p></body></html>";
        let (out, report) = Optimizer::new().optimize(html);

        assert_eq!(out, html);
        assert_eq!(report.optimization, Outcome::NoContentBlocks);
        assert_eq!(report.counts.candidates, 0);
    }

    #[test]
    fn test_url_echoed_into_report() {
        let html = article_html();
        let meta = RequestMeta { url: Some("https://example.com/post"), ..Default::default() };
        let (_, report) = Optimizer::new().optimize_with(&html, &meta);

        assert_eq!(report.url.as_deref(), Some("https://example.com/post"));
    }

    #[test]
    fn test_top_blocks_populated() {
        let (_, report) = Optimizer::new().optimize(&article_html());

        assert!(!report.top_blocks.is_empty());
        assert!(report.top_blocks.len() <= 10);
        assert!(report.top_blocks[0].preview.chars().count() <= 80);
    }

    struct StubExtractor;

    impl ContentExtractor for StubExtractor {
        fn extract(&self, html: &str) -> crate::Result<String> {
            Ok(format!("extracted:{}", html.len()))
        }
    }

    struct FailingExtractor;

    impl ContentExtractor for FailingExtractor {
        fn extract(&self, _html: &str) -> crate::Result<String> {
            Err(crate::CribroError::ExtractionFailed("stub failure".to_string()))
        }
    }

    #[test]
    fn test_optimize_and_extract_uses_reduced_markup() {
        let html = article_html();
        let (text, report) = Optimizer::new()
            .optimize_and_extract(&html, &RequestMeta::default(), &StubExtractor)
            .unwrap();

        assert_eq!(report.optimization, Outcome::Optimized);
        assert!(text.starts_with("extracted:"));
    }

    #[test]
    fn test_optimize_and_extract_falls_back_to_original() {
        let html = "<html><body><p>short</p></body></html>";
        let (text, report) = Optimizer::new()
            .optimize_and_extract(html, &RequestMeta::default(), &StubExtractor)
            .unwrap();

        assert_eq!(report.optimization, Outcome::NoContentBlocks);
        assert_eq!(text, format!("extracted:{}", html.len()));
    }

    #[test]
    fn test_extractor_errors_surface() {
        let result = Optimizer::new().optimize_and_extract(
            &article_html(),
            &RequestMeta::default(),
            &FailingExtractor,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_free_function() {
        let (out, report) = optimize("<html><body></body></html>");

        assert_eq!(report.optimization, Outcome::NoContentBlocks);
        assert!(out.contains("body"));
    }
}
