//! HTML parsing and DOM access.
//!
//! This module provides the [`Document`] and [`Element`] types used by the
//! block extractor. A `Document` wraps a parsed HTML tree and exposes a
//! document-order walk over its elements; an `Element` exposes the small
//! surface the pipeline reads: tag name, attributes, and *own text*.
//!
//! Own text is the visible text that belongs to an element directly —
//! text nodes and inline descendants, but not text inside nested
//! block-level containers. Nested containers produce their own candidate
//! blocks, so including their text here would double-count it.

use scraper::{ElementRef, Html, Node, Selector};

use crate::{CribroError, Result};

/// Block-level container tags. Text inside these is never attributed to
/// an ancestor's own text.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "section", "article", "main", "aside", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li", "dl",
    "dd", "dt", "table", "thead", "tbody", "tr", "td", "th", "blockquote", "pre", "figure", "form", "header", "footer",
    "nav",
];

/// Returns true if `tag` is a block-level container.
pub fn is_block_tag(tag: &str) -> bool {
    BLOCK_TAGS.contains(&tag)
}

/// Represents a parsed HTML document.
///
/// The document is private to one pipeline invocation: it is parsed from
/// the noise-stripped markup and dropped when the invocation returns.
///
/// # Example
///
/// ```rust
/// use cribro_core::parse::Document;
///
/// let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
/// let doc = Document::parse(html).unwrap();
/// assert_eq!(doc.title(), Some("Test".to_string()));
/// ```
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html })
    }

    /// Returns every element in document order.
    pub fn elements(&self) -> Vec<Element<'_>> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .map(|element| Element { element })
            .collect()
    }

    /// Gets the content of the `<title>` element, if present.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`CribroError::HtmlParseError`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel =
            Selector::parse(selector).map_err(|e| CribroError::HtmlParseError(format!("Invalid selector: {}", e)))?;

        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }
}

/// Own text of an element together with the portion contributed by
/// anchor links, both whitespace-collapsed.
#[derive(Debug, Clone)]
pub struct OwnText {
    /// Collapsed visible text belonging to the element itself.
    pub text: String,
    /// Character count of the collapsed anchor-link text within it.
    pub link_chars: usize,
}

/// A wrapper around scraper's `ElementRef` exposing what the pipeline reads.
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the lowercase tag name of this element.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Gets the value of an attribute, or `None` if absent.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }

    /// Gets the full text content of this element's subtree.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the element's own visible text and its anchor-text share.
    ///
    /// Walks the element's children, descending through inline elements
    /// but stopping at block-level containers.
    pub fn own_text(&self) -> OwnText {
        let mut raw = String::new();
        let mut link_raw = String::new();
        collect_own_text(self.element, &mut raw, &mut link_raw, false);

        OwnText { text: collapse(&raw), link_chars: collapse(&link_raw).chars().count() }
    }
}

/// Collapses whitespace runs to single spaces and trims.
pub fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_own_text(el: ElementRef<'_>, into: &mut String, links: &mut String, in_link: bool) {
    for child in el.children() {
        match child.value() {
            Node::Text(t) => {
                into.push_str(t);
                if in_link {
                    links.push_str(t);
                }
            }
            Node::Element(e) => {
                let name = e.name().to_ascii_lowercase();
                if is_block_tag(&name) {
                    continue;
                }
                if let Some(child_ref) = ElementRef::wrap(child) {
                    collect_own_text(child_ref, into, links, in_link || name == "a");
                }
            }
            _ => {}
        }
    }
}
