//! Structural block extraction.
//!
//! A single pass over the noise-stripped document collects candidate
//! blocks in reading order and groups them into sections. Headings and
//! semantic containers delimit sections; paragraphs, generic containers,
//! and headings themselves become blocks when they carry enough of their
//! own visible text.

use regex::Regex;

use crate::block::Block;
use crate::parse::Document;

/// Tags that start a new document section.
const SECTION_STARTERS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6", "section", "article", "main"];

/// Tags whose own text can become a candidate block.
const CONTENT_TAGS: &[&str] = &["p", "div", "blockquote", "li", "td", "pre", "h1", "h2", "h3", "h4", "h5", "h6"];

/// Patterns in class/id values that suggest main content.
const POSITIVE_PATTERNS: &str = r"(?i)(article|body|content|entry|hentry|h-entry|main|page|post|text|blog|story)";

/// Patterns in class/id values that suggest chrome, promotion, or noise.
const NEGATIVE_PATTERNS: &str = r"(?i)(banner|breadcrumbs?|combx|comment|community|disqus|extra|foot|header|menu|related|remark|rss|shoutbox|sidebar|sponsor|advert|ad-break|agegate|pagination|pager|popup|promo|share|social|widget)";

/// Structural weight of an element type.
///
/// Prose containers rank above generic containers: a paragraph is almost
/// always content, a div earns its keep through the other signals.
pub fn tag_weight(tag: &str) -> f64 {
    match tag {
        "p" => 1.0,
        "blockquote" => 0.8,
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => 0.7,
        "li" | "td" => 0.5,
        "pre" => 0.4,
        _ => 0.3,
    }
}

/// Walks the document and emits candidate blocks with sections assigned.
///
/// Every heading or semantic container starts a new section; if the
/// document has none of either, everything lands in section 0. Blocks
/// whose own visible text is shorter than `min_text_length` characters
/// are skipped. `section_size` is left at zero here — it is only
/// meaningful after cleaning, which can split and drop blocks.
pub fn extract_blocks(doc: &Document, min_text_length: usize) -> Vec<Block> {
    let positive = Regex::new(POSITIVE_PATTERNS).unwrap();
    let negative = Regex::new(NEGATIVE_PATTERNS).unwrap();

    let mut blocks = Vec::new();
    let mut section_index = 0usize;

    for element in doc.elements() {
        let tag = element.tag_name();

        if SECTION_STARTERS.contains(&tag.as_str()) {
            section_index += 1;
        }

        if !CONTENT_TAGS.contains(&tag.as_str()) {
            continue;
        }

        let own = element.own_text();
        if own.text.chars().count() < min_text_length {
            continue;
        }

        let class_score = class_keyword_score(element.attr("class"), &positive, &negative);
        let id_score = id_keyword_score(element.attr("id"), &positive, &negative);
        let weight = tag_weight(&tag);

        blocks.push(Block {
            tag,
            text: own.text,
            doc_index: blocks.len(),
            section_index,
            section_size: 0,
            tag_weight: weight,
            class_score,
            id_score,
            link_char_count: own.link_chars,
        });
    }

    blocks
}

/// Keyword signal for a class attribute, checked per class name.
///
/// A positive match wins over a negative one; no match is neutral.
fn class_keyword_score(class: Option<&str>, positive: &Regex, negative: &Regex) -> f64 {
    let Some(class) = class else {
        return 0.5;
    };

    let mut saw_negative = false;
    for name in class.split_whitespace() {
        if positive.is_match(name) {
            return 1.0;
        }
        if negative.is_match(name) {
            saw_negative = true;
        }
    }

    if saw_negative { 0.0 } else { 0.5 }
}

/// Keyword signal for an id attribute.
fn id_keyword_score(id: Option<&str>, positive: &Regex, negative: &Regex) -> f64 {
    let Some(id) = id else {
        return 0.5;
    };

    if positive.is_match(id) {
        1.0
    } else if negative.is_match(id) {
        0.0
    } else {
        0.5
    }
}
