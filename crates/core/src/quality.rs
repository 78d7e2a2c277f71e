//! Hard quality rejection rules.
//!
//! Applied after scoring and independent of score value: a block that
//! trips a rule is rejected no matter how well it ranked. Rejections
//! are final for the run.

use crate::block::Block;
use crate::config::OptimizeConfig;
use crate::score::Scored;

/// Boilerplate phrases in both script families. A match only rejects
/// short blocks; long blocks may legitimately discuss these topics.
const BLACKLIST: &[&str] = &[
    "cookie",
    "subscribe",
    "newsletter",
    "sign up",
    "sign in",
    "advertisement",
    "sponsored",
    "all rights reserved",
    "terms of service",
    "privacy policy",
    "click here",
    "read more",
    "related articles",
    "share this",
    "follow us",
    "订阅",
    "关注我们",
    "点击",
    "广告",
    "版权所有",
    "免责声明",
    "相关阅读",
    "分享到",
];

/// Blacklisted blocks at or above this length are kept.
const BLACKLIST_EXEMPT_CHARS: usize = 120;

/// Drops blocks that fail any hard quality rule.
pub fn quality_filter(scored: Vec<Scored>, config: &OptimizeConfig) -> Vec<Scored> {
    scored.into_iter().filter(|s| passes(&s.block, config)).collect()
}

/// Returns true if the block clears every rejection rule.
pub fn passes(block: &Block, config: &OptimizeConfig) -> bool {
    let chars = block.char_count();

    if chars < config.min_text_length {
        return false;
    }
    if block.link_density() > config.max_link_density {
        return false;
    }
    if block.alnum_ratio() < config.min_alphanumeric_ratio {
        return false;
    }
    if chars < BLACKLIST_EXEMPT_CHARS && contains_blacklisted(&block.text) {
        return false;
    }

    true
}

fn contains_blacklisted(text: &str) -> bool {
    let lower = text.to_lowercase();
    BLACKLIST.iter().any(|phrase| lower.contains(phrase))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

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

    fn config() -> OptimizeConfig {
        OptimizeConfig::builder().min_text_length(20).build()
    }

    #[test]
    fn test_passes_ordinary_prose() {
        let b = block("An ordinary paragraph of prose, long enough and free of any flagged phrasing.");
        assert!(passes(&b, &config()));
    }

    #[test]
    fn test_rejects_below_length_floor() {
        let b = block("tiny");
        assert!(!passes(&b, &config()));
    }

    #[test]
    fn test_rejects_high_link_density() {
        let mut b = block("home products pricing docs blog about careers contact support");
        b.link_char_count = b.text.len();
        assert!(!passes(&b, &config()));
    }

    #[test]
    fn test_rejects_low_alnum_ratio() {
        let b = block(">>> ==== ---- #### %%%% @@@@ &&&& ****");
        assert!(!passes(&b, &config()));
    }

    #[rstest]
    #[case("Subscribe to our newsletter for weekly updates!")]
    #[case("This site uses cookie tracking, accept to continue")]
    #[case("点击订阅我们的每周简报，即可获取最新内容与更新提醒")]
    fn test_rejects_short_blacklisted(#[case] text: &str) {
        assert!(!passes(&block(text), &config()));
    }

    #[test]
    fn test_keeps_long_blacklisted_block() {
        // over the exemption length: a substantive paragraph that merely
        // mentions a flagged phrase is kept
        let text = "The regulation requires every publisher to disclose cookie usage in detail, \
                    and this article examines how those disclosure requirements reshaped consent \
                    interfaces across major news sites in the last two years.";
        assert!(text.chars().count() >= BLACKLIST_EXEMPT_CHARS);
        assert!(passes(&block(text), &config()));
    }

    #[test]
    fn test_rejection_ignores_score() {
        let mut short = block("Subscribe now and save big");
        short.tag_weight = 1.0;
        let scored = Scored {
            block: short,
            tfidf_score: 1.0,
            position_weight: 0.2,
            total_score: 99.0,
            vector: Vec::new(),
        };

        assert!(quality_filter(vec![scored], &config()).is_empty());
    }
}
