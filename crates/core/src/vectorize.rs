//! Term-weighted vector space over pretokenized blocks.
//!
//! The vectorizer builds a TF-IDF space from 1-gram and 2-gram terms
//! with sublinear term-frequency scaling and L2-normalized vectors. The
//! vocabulary is bounded by document-frequency limits that adapt when
//! the corpus is too small for them to make sense, and capped at a
//! maximum feature count. Everything is built fresh per pipeline
//! invocation and discarded afterward.

use std::collections::HashMap;

use crate::{CribroError, Result};

/// A sparse vector of `(term_id, weight)` pairs, sorted by term id.
pub type SparseVec = Vec<(usize, f64)>;

/// A fitted TF-IDF vocabulary with per-term inverse document frequencies.
pub struct TfidfSpace {
    vocab: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfSpace {
    /// Fits the space over `docs` and returns it with one vector per doc.
    ///
    /// Document-frequency bounds relax to `1` / `1.0` when fewer than 3
    /// documents exist. If the configured bounds prune every term (a
    /// page of identical blocks does this), fitting retries once with
    /// the relaxed bounds before reporting
    /// [`CribroError::EmptyVocabulary`].
    pub fn fit(docs: &[String], max_features: usize, min_df: usize, max_df: f64) -> Result<(Self, Vec<SparseVec>)> {
        let (min_df, max_df) = if docs.len() < 3 { (1, 1.0) } else { (min_df, max_df) };

        match Self::build(docs, max_features, min_df, max_df) {
            Err(CribroError::EmptyVocabulary) if (min_df, max_df) != (1, 1.0) => Self::build(docs, max_features, 1, 1.0),
            other => other,
        }
    }

    fn build(docs: &[String], max_features: usize, min_df: usize, max_df: f64) -> Result<(Self, Vec<SparseVec>)> {
        let n = docs.len();
        let doc_counts: Vec<HashMap<String, usize>> = docs.iter().map(|d| term_counts(d)).collect();

        let mut df: HashMap<&str, usize> = HashMap::new();
        for counts in &doc_counts {
            for term in counts.keys() {
                *df.entry(term).or_insert(0) += 1;
            }
        }

        let max_df_count = ((max_df * n as f64).floor() as usize).max(1);
        let mut kept: Vec<(&str, usize)> = df
            .into_iter()
            .filter(|&(_, count)| count >= min_df && count <= max_df_count)
            .collect();

        if kept.is_empty() {
            return Err(CribroError::EmptyVocabulary);
        }

        // cap by corpus frequency, ties lexicographic, then fix term ids
        // in lexicographic order so vocabularies are deterministic
        kept.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        kept.truncate(max_features);
        kept.sort_by(|a, b| a.0.cmp(b.0));

        let mut vocab = HashMap::with_capacity(kept.len());
        let mut idf = Vec::with_capacity(kept.len());
        for (id, (term, count)) in kept.into_iter().enumerate() {
            vocab.insert(term.to_string(), id);
            idf.push(((1.0 + n as f64) / (1.0 + count as f64)).ln() + 1.0);
        }

        let space = Self { vocab, idf };
        let vectors = doc_counts.iter().map(|counts| space.weigh(counts)).collect();

        Ok((space, vectors))
    }

    /// Vectorizes a pretokenized string against the fitted vocabulary.
    ///
    /// Out-of-vocabulary terms are ignored; a fully out-of-vocabulary
    /// input yields an empty vector.
    pub fn transform(&self, doc: &str) -> SparseVec {
        self.weigh(&term_counts(doc))
    }

    /// Number of terms in the fitted vocabulary.
    pub fn vocabulary_len(&self) -> usize {
        self.vocab.len()
    }

    fn weigh(&self, counts: &HashMap<String, usize>) -> SparseVec {
        let mut vector: SparseVec = counts
            .iter()
            .filter_map(|(term, &count)| {
                self.vocab
                    .get(term)
                    .map(|&id| (id, (1.0 + (count as f64).ln()) * self.idf[id]))
            })
            .collect();

        vector.sort_by_key(|&(id, _)| id);
        l2_normalize(&mut vector);
        vector
    }
}

/// 1-gram and 2-gram term counts for one pretokenized document.
fn term_counts(doc: &str) -> HashMap<String, usize> {
    let tokens: Vec<&str> = doc.split_whitespace().collect();
    let mut counts = HashMap::new();

    for token in &tokens {
        *counts.entry(token.to_string()).or_insert(0) += 1;
    }
    for pair in tokens.windows(2) {
        *counts.entry(format!("{} {}", pair[0], pair[1])).or_insert(0) += 1;
    }

    counts
}

fn l2_normalize(vector: &mut SparseVec) {
    let norm = vector.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for entry in vector.iter_mut() {
            entry.1 /= norm;
        }
    }
}

/// Cosine similarity between two sparse vectors.
pub fn cosine(a: &SparseVec, b: &SparseVec) -> f64 {
    let norm_a = a.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let (mut i, mut j) = (0, 0);
    let mut dot = 0.0;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dot += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }

    dot / (norm_a * norm_b)
}

/// Mean vector of a vector collection.
pub fn centroid(vectors: &[SparseVec]) -> SparseVec {
    if vectors.is_empty() {
        return Vec::new();
    }

    let mut sums: HashMap<usize, f64> = HashMap::new();
    for vector in vectors {
        for &(id, weight) in vector {
            *sums.entry(id).or_insert(0.0) += weight;
        }
    }

    let n = vectors.len() as f64;
    let mut mean: SparseVec = sums.into_iter().map(|(id, sum)| (id, sum / n)).collect();
    mean.sort_by_key(|&(id, _)| id);
    mean
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_fit_small_corpus_relaxes_bounds() {
        // two docs: strict min_df=2 would prune every distinctive term
        let corpus = docs(&["alpha beta gamma", "delta epsilon zeta"]);
        let (space, vectors) = TfidfSpace::fit(&corpus, 10_000, 2, 0.8).unwrap();

        assert!(space.vocabulary_len() > 0);
        assert_eq!(vectors.len(), 2);
        assert!(!vectors[0].is_empty());
    }

    #[test]
    fn test_fit_identical_docs_retries_relaxed() {
        // every term appears in every doc; max_df=0.8 prunes all of them
        let corpus = docs(&["same text here"; 20]);
        let (space, vectors) = TfidfSpace::fit(&corpus, 10_000, 2, 0.8).unwrap();

        assert!(space.vocabulary_len() > 0);
        assert!((cosine(&vectors[0], &vectors[19]) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_empty_corpus_fails() {
        let corpus = docs(&["", "", ""]);
        assert!(matches!(
            TfidfSpace::fit(&corpus, 10_000, 2, 0.8),
            Err(CribroError::EmptyVocabulary)
        ));
    }

    #[test]
    fn test_bigram_terms_present() {
        let corpus = docs(&["machine learning rocks", "machine learning rules"]);
        let (space, _) = TfidfSpace::fit(&corpus, 10_000, 2, 0.8).unwrap();

        let query = space.transform("machine learning");
        assert!(!query.is_empty());
    }

    #[test]
    fn test_max_features_caps_vocabulary() {
        let corpus = docs(&["one two three four five", "one two three four five six"]);
        let (space, _) = TfidfSpace::fit(&corpus, 3, 1, 1.0).unwrap();

        assert_eq!(space.vocabulary_len(), 3);
    }

    #[test]
    fn test_transform_out_of_vocabulary() {
        let corpus = docs(&["alpha beta", "alpha gamma"]);
        let (space, _) = TfidfSpace::fit(&corpus, 10_000, 1, 1.0).unwrap();

        assert!(space.transform("zzz qqq").is_empty());
    }

    #[test]
    fn test_cosine_bounds() {
        let corpus = docs(&["alpha beta gamma", "alpha beta gamma", "delta epsilon zeta"]);
        let (_, vectors) = TfidfSpace::fit(&corpus, 10_000, 1, 1.0).unwrap();

        assert!((cosine(&vectors[0], &vectors[1]) - 1.0).abs() < 1e-9);
        assert!(cosine(&vectors[0], &vectors[2]).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_empty_vector() {
        let empty: SparseVec = Vec::new();
        let unit: SparseVec = vec![(0, 1.0)];
        assert_eq!(cosine(&empty, &unit), 0.0);
    }

    #[test]
    fn test_centroid_mean() {
        let a: SparseVec = vec![(0, 1.0)];
        let b: SparseVec = vec![(1, 1.0)];
        let mean = centroid(&[a, b]);

        assert_eq!(mean, vec![(0, 0.5), (1, 0.5)]);
    }
}
