//! Error types for cribro operations.
//!
//! This module defines the main error type [`CribroError`]. Errors here
//! circulate inside the pipeline only: the public [`crate::Optimizer`]
//! contract converts every failure into a degraded `(input, Report)`
//! pair, so callers never see a `Result` from `optimize`.

use thiserror::Error;

/// Main error type for pre-filtering operations.
///
/// # Example
///
/// ```rust
/// use cribro_core::CribroError;
///
/// let err = CribroError::HtmlParseError("bad selector".to_string());
/// assert!(err.to_string().contains("bad selector"));
/// ```
#[derive(Error, Debug)]
pub enum CribroError {
    /// HTML parsing errors.
    ///
    /// Returned when markup cannot be parsed or rewritten, often due to
    /// malformed input.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// The corpus produced an empty vocabulary.
    ///
    /// Raised by the vectorizer when every candidate term was pruned by
    /// the document-frequency bounds or stop-word removal. The scorer
    /// recovers from this locally with a structural fallback score; it
    /// is never surfaced to the caller.
    #[error("Vectorization produced an empty vocabulary")]
    EmptyVocabulary,

    /// No content blocks could be extracted from the document.
    ///
    /// Not a failure of the caller's input: the pipeline returns the
    /// original markup unchanged and defers to the downstream extractor.
    #[error("No content blocks could be extracted from the document")]
    NoContentBlocks,

    /// The downstream boilerplate-removal extractor failed.
    #[error("Content extraction failed: {0}")]
    ExtractionFailed(String),
}

/// Result type alias for CribroError.
pub type Result<T> = std::result::Result<T, CribroError>;
