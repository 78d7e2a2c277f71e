//! Language-aware pretokenization.
//!
//! Each cleaned block is turned into a whitespace-delimited token string
//! for the vectorizer. CJK-bearing text goes through an injected
//! [`Segmenter`] when one is available, with a deterministic
//! character/bigram fallback; Latin-script text is lowercased and split
//! on punctuation. Both paths drop stop words. The function is pure and
//! keeps no state across calls.

use std::collections::HashSet;

/// Chinese word segmentation capability.
///
/// Segmentation is optional: implementations are injected by the caller,
/// and `None` (absence or internal failure) makes the pretokenizer fall
/// back to emitting every character plus every adjacent character pair.
/// Tests substitute stub implementations.
pub trait Segmenter: Send + Sync {
    /// Segments `text` into tokens, or `None` on failure.
    fn segment(&self, text: &str) -> Option<Vec<String>>;
}

const LATIN_STOP_WORDS: &[&str] = &[
    "a", "about", "after", "again", "all", "also", "an", "and", "any", "are", "as", "at", "be", "because", "been",
    "before", "being", "between", "both", "but", "by", "can", "could", "did", "do", "does", "down", "during", "each",
    "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "him", "his", "how",
    "if", "in", "into", "is", "it", "its", "just", "more", "most", "my", "no", "nor", "not", "now", "of", "off", "on",
    "once", "only", "or", "other", "our", "out", "over", "own", "same", "she", "should", "so", "some", "such", "than",
    "that", "the", "their", "them", "then", "there", "these", "they", "this", "those", "through", "to", "too", "under",
    "until", "up", "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "why", "will",
    "with", "would", "you", "your",
];

const CJK_STOP_WORDS: &[&str] = &[
    "的", "了", "和", "是", "在", "我", "有", "就", "不", "人", "都", "一", "也", "很", "到", "说", "要", "去", "你",
    "会", "着", "看", "好", "这", "那", "之", "与", "及", "或", "并", "等", "被", "把", "让", "向", "从", "但", "而",
    "于", "以", "为", "他", "她", "它", "们", "个", "中", "上", "下",
];

/// Returns true if `c` falls in the CJK Unified Ideographs range.
pub fn is_cjk_char(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

/// Returns true if `text` contains any CJK ideograph.
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk_char)
}

/// Produces the whitespace-delimited token string for one block.
pub fn pretokenize(text: &str, segmenter: Option<&dyn Segmenter>) -> String {
    let tokens = if contains_cjk(text) { cjk_tokens(text, segmenter) } else { latin_tokens(text) };

    let stops: HashSet<&str> = LATIN_STOP_WORDS.iter().chain(CJK_STOP_WORDS.iter()).copied().collect();

    tokens
        .into_iter()
        .filter(|t| !stops.contains(t.as_str()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase, punctuation to whitespace, split, drop one-char tokens.
fn latin_tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .filter(|t| t.chars().count() > 1)
        .map(|t| t.to_string())
        .collect()
}

/// Segmenter path with character/bigram fallback.
fn cjk_tokens(text: &str, segmenter: Option<&dyn Segmenter>) -> Vec<String> {
    if let Some(seg) = segmenter
        && let Some(tokens) = seg.segment(text)
    {
        return tokens
            .into_iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
    }

    bigram_tokens(text)
}

/// Every CJK character plus every adjacent pair; interleaved Latin runs
/// go through the Latin path.
fn bigram_tokens(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut run: Vec<char> = Vec::new();
    let mut latin = String::new();

    for c in text.chars() {
        if is_cjk_char(c) {
            if !latin.is_empty() {
                tokens.extend(latin_tokens(&latin));
                latin.clear();
            }
            run.push(c);
        } else {
            flush_run(&mut run, &mut tokens);
            latin.push(c);
        }
    }

    flush_run(&mut run, &mut tokens);
    if !latin.is_empty() {
        tokens.extend(latin_tokens(&latin));
    }

    tokens
}

fn flush_run(run: &mut Vec<char>, tokens: &mut Vec<String>) {
    if run.is_empty() {
        return;
    }
    for c in run.iter() {
        tokens.push(c.to_string());
    }
    for pair in run.windows(2) {
        tokens.push(pair.iter().collect());
    }
    run.clear();
}
