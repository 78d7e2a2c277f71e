//! Block text normalization.
//!
//! Cleaning strips citation-marker artifacts, collapses whitespace, and
//! enforces a block length window: blocks under 25 characters are
//! dropped, blocks over 400 characters are split at sentence boundaries
//! into fragments that inherit the parent's structural metadata. This
//! runs before `section_size` is recomputed, since splitting and
//! dropping change section membership counts.

use std::collections::HashMap;

use regex::Regex;

use crate::block::Block;
use crate::parse::collapse;

/// Cleaned blocks shorter than this are dropped.
const MIN_BLOCK_CHARS: usize = 25;
/// Cleaned blocks longer than this are split at sentence boundaries.
const MAX_BLOCK_CHARS: usize = 400;

/// Footnote-style bracket markers: `[12]`, `[3-5]`, `[3–5]`.
const CITATION_PATTERN: &str = r"\[\d+(?:\s*[-–]\s*\d+)?\]";

/// Normalizes block text and applies the length window.
///
/// The output count can grow (splitting) or shrink (dropping) relative
/// to the input. Document indices are reassigned and `section_size` is
/// recomputed over the surviving blocks.
pub fn clean_blocks(blocks: Vec<Block>) -> Vec<Block> {
    let citation = Regex::new(CITATION_PATTERN).unwrap();
    let mut cleaned: Vec<Block> = Vec::new();

    for block in blocks {
        let text = collapse(&citation.replace_all(&block.text, " "));
        let chars = text.chars().count();

        if chars < MIN_BLOCK_CHARS {
            continue;
        }

        if chars <= MAX_BLOCK_CHARS {
            let mut kept = block;
            kept.text = text;
            cleaned.push(kept);
            continue;
        }

        for sentence in split_sentences(&text) {
            let fragment = sentence.trim();
            let len = fragment.chars().count();
            if len < MIN_BLOCK_CHARS || len > MAX_BLOCK_CHARS {
                continue;
            }
            let mut split = block.clone();
            split.text = fragment.to_string();
            cleaned.push(split);
        }
    }

    reindex(&mut cleaned);
    cleaned
}

/// Reassigns reading-order indices and recomputes per-section counts.
pub fn reindex(blocks: &mut [Block]) {
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for block in blocks.iter() {
        *counts.entry(block.section_index).or_insert(0) += 1;
    }

    for (i, block) in blocks.iter_mut().enumerate() {
        block.doc_index = i;
        block.section_size = counts[&block.section_index];
    }
}

/// Splits text after sentence-terminal punctuation in either script.
fn split_sentences(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        current.push(c);
        if matches!(c, '.' | '!' | '?' | '。' | '！' | '？') {
            parts.push(std::mem::take(&mut current));
        }
    }

    if !current.trim().is_empty() {
        parts.push(current);
    }

    parts
}
