//! Candidate block data model.
//!
//! A [`Block`] is the unit of work throughout the pipeline: one
//! structural text fragment under consideration for retention. Blocks
//! are created by the extractor, mutated only during cleaning, and
//! owned exclusively by their pipeline invocation.

/// One structural text fragment under consideration for retention.
///
/// `section_index` is assigned once at extraction and is stable for the
/// block's lifetime. `section_size` is recomputed after cleaning, since
/// cleaning can split and drop blocks. Noise signals derived from the
/// text (link density, alphanumeric ratio) are computed on demand from
/// the current text rather than cached, so a cleaning mutation can never
/// leave them stale.
#[derive(Debug, Clone)]
pub struct Block {
    /// Lowercase tag name of the originating element.
    pub tag: String,
    /// Normalized text content. Mutable during cleaning, fixed afterward.
    pub text: String,
    /// Position in reading order within the current block list.
    pub doc_index: usize,
    /// Which document section this block belongs to.
    pub section_index: usize,
    /// Number of blocks sharing `section_index`.
    pub section_size: usize,
    /// Structural weight of the originating tag.
    pub tag_weight: f64,
    /// Keyword signal from the element's class attribute, in [0, 1].
    pub class_score: f64,
    /// Keyword signal from the element's id attribute, in [0, 1].
    pub id_score: f64,
    /// Character count of anchor-link text captured at extraction.
    pub link_char_count: usize,
}

impl Block {
    /// Character count of the current text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Whitespace-delimited word count of the current text.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Fraction of the current text contributed by anchor-link text.
    ///
    /// Clamped to 1.0: a split fragment inherits its parent's anchor
    /// count but divides by its own length.
    pub fn link_density(&self) -> f64 {
        let chars = self.char_count();
        if chars == 0 {
            return 0.0;
        }
        (self.link_char_count as f64 / chars as f64).min(1.0)
    }

    /// Ratio of alphanumeric characters among non-whitespace characters.
    ///
    /// CJK ideographs count as alphanumeric, so prose in either script
    /// family scores high and symbol-heavy noise scores low.
    pub fn alnum_ratio(&self) -> f64 {
        let mut total = 0usize;
        let mut alnum = 0usize;
        for c in self.text.chars() {
            if c.is_whitespace() {
                continue;
            }
            total += 1;
            if c.is_alphanumeric() {
                alnum += 1;
            }
        }
        if total == 0 { 0.0 } else { alnum as f64 / total as f64 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(text: &str) -> Block {
        Block {
            tag: "p".to_string(),
            text: text.to_string(),
            doc_index: 0,
            section_index: 0,
            section_size: 1,
            tag_weight: 1.0,
            class_score: 0.5,
            id_score: 0.5,
            link_char_count: 0,
        }
    }

    #[test]
    fn test_counts() {
        let b = block("one two three");
        assert_eq!(b.char_count(), 13);
        assert_eq!(b.word_count(), 3);
    }

    #[test]
    fn test_link_density_recomputed_from_current_text() {
        let mut b = block("text with a link inside somewhere");
        b.link_char_count = 6;
        let before = b.link_density();

        b.text = "text with a link".to_string();
        let after = b.link_density();

        assert!(after > before);
    }

    #[test]
    fn test_link_density_clamped() {
        let mut b = block("ab");
        b.link_char_count = 100;
        assert_eq!(b.link_density(), 1.0);
    }

    #[test]
    fn test_link_density_empty_text() {
        let mut b = block("");
        b.link_char_count = 5;
        assert_eq!(b.link_density(), 0.0);
    }

    #[test]
    fn test_alnum_ratio_prose() {
        let b = block("Plain prose, with a little punctuation.");
        assert!(b.alnum_ratio() > 0.8);
    }

    #[test]
    fn test_alnum_ratio_symbols() {
        let b = block("*** ||| --- &&& !!!");
        assert_eq!(b.alnum_ratio(), 0.0);
    }

    #[test]
    fn test_alnum_ratio_counts_cjk() {
        let b = block("这是一段中文文本");
        assert_eq!(b.alnum_ratio(), 1.0);
    }
}
