//! Diversity selection via maximal marginal relevance.
//!
//! From the retained high-scoring set, greedily pick a bounded subset
//! that trades relevance against redundancy with what is already
//! chosen. Pages that repeat the same promotional sentence across
//! sections collapse to a single representative here.

use crate::score::Scored;
use crate::vectorize::cosine;

/// Redundancy penalty weight.
const MMR_LAMBDA: f64 = 0.7;
/// Retained sets at or below this size skip diversity selection.
const MMR_MIN_INPUT: usize = 10;
/// Candidate pool cap, bounding the pairwise-similarity work.
const MMR_CANDIDATES: usize = 200;
/// Output cap.
const MMR_SELECT: usize = 50;
/// Candidates at least this similar to a selected block are
/// near-duplicates and never selected.
const NEAR_DUPLICATE_SIM: f64 = 0.95;

/// Greedy MMR selection over the retained blocks.
///
/// Input is expected in descending score order. Output never exceeds
/// [`MMR_SELECT`] blocks nor the input size. Under the structural
/// scoring fallback vectors are empty and all similarities read as
/// zero, so selection degrades to plain top-K by score.
pub fn diversify(retained: Vec<Scored>) -> Vec<Scored> {
    if retained.len() <= MMR_MIN_INPUT {
        return retained;
    }

    let mut candidates: Vec<Scored> = retained.into_iter().take(MMR_CANDIDATES).collect();
    let first = candidates.remove(0);
    let mut max_sims: Vec<f64> = candidates.iter().map(|c| cosine(&c.vector, &first.vector)).collect();
    let mut selected = vec![first];

    while selected.len() < MMR_SELECT && !candidates.is_empty() {
        let mut best: Option<(usize, f64)> = None;
        for (i, candidate) in candidates.iter().enumerate() {
            if max_sims[i] >= NEAR_DUPLICATE_SIM {
                continue;
            }
            let mmr = candidate.total_score - MMR_LAMBDA * max_sims[i];
            if best.is_none_or(|(_, score)| mmr > score) {
                best = Some((i, mmr));
            }
        }

        let Some((index, _)) = best else {
            break;
        };

        let chosen = candidates.remove(index);
        max_sims.remove(index);
        for (i, candidate) in candidates.iter().enumerate() {
            let sim = cosine(&candidate.vector, &chosen.vector);
            if sim > max_sims[i] {
                max_sims[i] = sim;
            }
        }
        selected.push(chosen);
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Block;
    use crate::vectorize::SparseVec;

    fn scored(score: f64, vector: SparseVec) -> Scored {
        Scored {
            block: Block {
                tag: "p".to_string(),
                text: "diversity test block".to_string(),
                doc_index: 0,
                section_index: 0,
                section_size: 1,
                tag_weight: 1.0,
                class_score: 0.5,
                id_score: 0.5,
                link_char_count: 0,
            },
            tfidf_score: score,
            position_weight: 0.1,
            total_score: score,
            vector,
        }
    }

    #[test]
    fn test_small_input_unchanged() {
        let input: Vec<Scored> = (0..10).map(|i| scored(1.0 - i as f64 * 0.01, vec![(i, 1.0)])).collect();
        let out = diversify(input);

        assert_eq!(out.len(), 10);
    }

    #[test]
    fn test_identical_blocks_collapse() {
        // 20 copies of the same vector: everything after the first is a
        // near-duplicate of it
        let input: Vec<Scored> = (0..20).map(|_| scored(0.8, vec![(0, 1.0)])).collect();
        let out = diversify(input);

        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_distinct_blocks_all_kept_up_to_cap() {
        let input: Vec<Scored> = (0..30).map(|i| scored(1.0 - i as f64 * 0.01, vec![(i, 1.0)])).collect();
        let out = diversify(input);

        assert_eq!(out.len(), 30);
    }

    #[test]
    fn test_output_capped_at_fifty() {
        let input: Vec<Scored> = (0..120).map(|i| scored(1.0 - i as f64 * 0.001, vec![(i, 1.0)])).collect();
        let out = diversify(input);

        assert_eq!(out.len(), MMR_SELECT);
    }

    #[test]
    fn test_highest_score_selected_first() {
        let input: Vec<Scored> = (0..15).map(|i| scored(1.0 - i as f64 * 0.05, vec![(i, 1.0)])).collect();
        let out = diversify(input);

        assert_eq!(out[0].total_score, 1.0);
    }

    #[test]
    fn test_fallback_without_vectors_keeps_top_k() {
        let input: Vec<Scored> = (0..60).map(|i| scored(1.0 - i as f64 * 0.01, Vec::new())).collect();
        let out = diversify(input);

        assert_eq!(out.len(), MMR_SELECT);
        assert_eq!(out[0].total_score, 1.0);
    }
}
