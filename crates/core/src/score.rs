//! Relevance scoring.
//!
//! Scoring combines a term-weighted coverage score with structural
//! priors into one composite per block. Coverage measures similarity to
//! the corpus centroid — rewarding blocks representative of the whole
//! document — unless the caller supplied a query, in which case
//! similarity to the query vector is used instead. When vectorization
//! fails outright the scorer degrades to a purely structural score; the
//! failure is never surfaced.

use crate::block::Block;
use crate::config::OptimizeConfig;
use crate::tokenize::{Segmenter, pretokenize};
use crate::vectorize::{SparseVec, TfidfSpace, centroid, cosine};

/// A block annotated with its score components.
///
/// Downstream stages read `total_score` (and the vector, for
/// redundancy checks); the components are kept for diagnostics.
#[derive(Debug, Clone)]
pub struct Scored {
    /// The underlying block.
    pub block: Block,
    /// Coverage score: cosine to the centroid or query vector.
    pub tfidf_score: f64,
    /// Position prior from reading order.
    pub position_weight: f64,
    /// Composite score read by retention and diversity selection.
    pub total_score: f64,
    /// The block's TF-IDF vector; empty under the structural fallback.
    pub vector: SparseVec,
}

/// Position prior: earlier blocks matter more.
///
/// Ledes and introductions carry disproportionate signal, so the prior
/// decays linearly with reading order. A lone block sits at 0.5.
pub fn position_weight(index: usize, n: usize) -> f64 {
    if n > 1 { 0.1 + 0.1 * (1.0 - index as f64 / (n - 1) as f64) } else { 0.5 }
}

/// Scores all blocks and returns them sorted by `total_score` descending.
///
/// Ties keep reading order, so equal-scoring blocks stay stable through
/// the later selection stages.
pub fn score_blocks(
    blocks: Vec<Block>, query: Option<&str>, segmenter: Option<&dyn Segmenter>, config: &OptimizeConfig,
) -> Vec<Scored> {
    let segmenter = if config.enable_cjk_segmentation { segmenter } else { None };

    let docs: Vec<String> = blocks.iter().map(|b| pretokenize(&b.text, segmenter)).collect();

    let mut scored = match TfidfSpace::fit(&docs, config.max_features, config.min_df, config.max_df) {
        Ok((space, vectors)) => {
            let reference = match query {
                Some(q) => space.transform(&pretokenize(q, segmenter)),
                None => centroid(&vectors),
            };
            composite_scores(blocks, vectors, &reference)
        }
        Err(_) => structural_scores(blocks),
    };

    scored.sort_by(|a, b| {
        b.total_score
            .partial_cmp(&a.total_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.block.doc_index.cmp(&b.block.doc_index))
    });

    scored
}

fn composite_scores(blocks: Vec<Block>, vectors: Vec<SparseVec>, reference: &SparseVec) -> Vec<Scored> {
    let n = blocks.len();

    blocks
        .into_iter()
        .zip(vectors)
        .map(|(block, vector)| {
            let coverage = cosine(&vector, reference);
            let position = position_weight(block.doc_index, n);
            let total = 0.5 * coverage
                + 0.2 * block.tag_weight
                + 0.15 * block.class_score
                + 0.05 * block.id_score
                + 0.1 * position;

            Scored { block, tfidf_score: coverage, position_weight: position, total_score: total, vector }
        })
        .collect()
}

/// Fallback when no usable vector space exists: structure only.
fn structural_scores(blocks: Vec<Block>) -> Vec<Scored> {
    let n = blocks.len();

    blocks
        .into_iter()
        .map(|block| {
            let position = position_weight(block.doc_index, n);
            let total = 0.4 * block.tag_weight + 0.3 * block.class_score + 0.2 * block.id_score
                + 0.1 * (1.0 - block.link_density());

            Scored { block, tfidf_score: 0.0, position_weight: position, total_score: total, vector: Vec::new() }
        })
        .collect()
}
