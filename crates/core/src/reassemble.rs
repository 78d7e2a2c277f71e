//! Reduced-document emission.
//!
//! The selected blocks are re-emitted as a minimal document in reading
//! order, each wrapped in its originating tag. The downstream
//! boilerplate-removal extractor consumes this instead of the full
//! page. Cleaned text is emitted rather than the source node's markup:
//! split fragments share a source node and re-emitting it would
//! duplicate the whole block.

use crate::score::Scored;

/// Builds the reduced HTML document from the selected blocks.
pub fn reassemble(selected: &[Scored]) -> String {
    let mut ordered: Vec<&Scored> = selected.iter().collect();
    ordered.sort_by_key(|s| s.block.doc_index);

    let mut out = String::from("<html><body>\n");
    for s in ordered {
        out.push('<');
        out.push_str(&s.block.tag);
        out.push('>');
        out.push_str(&escape_text(&s.block.text));
        out.push_str("</");
        out.push_str(&s.block.tag);
        out.push_str(">\n");
    }
    out.push_str("</body></html>");
    out
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
