//! Noise-region removal ahead of block extraction.
//!
//! Structural regions that never carry article content (scripts, styles,
//! navigation, page chrome) are removed destructively before the document
//! is scanned for candidate blocks. The removal operates on the raw
//! markup and produces the pipeline-private working document, so the
//! caller's input is never mutated.

use regex::Regex;

/// Tags whose entire region is discarded before scanning.
const NOISE_TAGS: &[&str] = &["script", "style", "noscript", "nav", "header", "footer", "aside", "menu"];

/// Returns true if `tag` is an always-excluded noise region.
pub fn is_noise_tag(tag: &str) -> bool {
    NOISE_TAGS.contains(&tag)
}

/// Removes noise regions and HTML comments from raw markup.
///
/// On any rewriter failure the input is returned unchanged; a page the
/// rewriter cannot handle is still a page the rest of the pipeline can
/// try to score.
pub fn strip_noise(html: &str) -> String {
    let stripped = remove_noise_tags(html);
    remove_comments(&stripped)
}

/// Remove noise-region tags and their contents from HTML.
fn remove_noise_tags(html: &str) -> String {
    let mut output = String::new();
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings {
            element_content_handlers: vec![
                lol_html::element!("script", |el| {
                    el.remove();
                    Ok(())
                }),
                lol_html::element!("style", |el| {
                    el.remove();
                    Ok(())
                }),
                lol_html::element!("noscript", |el| {
                    el.remove();
                    Ok(())
                }),
                lol_html::element!("nav", |el| {
                    el.remove();
                    Ok(())
                }),
                lol_html::element!("header", |el| {
                    el.remove();
                    Ok(())
                }),
                lol_html::element!("footer", |el| {
                    el.remove();
                    Ok(())
                }),
                lol_html::element!("aside", |el| {
                    el.remove();
                    Ok(())
                }),
                lol_html::element!("menu", |el| {
                    el.remove();
                    Ok(())
                }),
            ],
            ..Default::default()
        },
        |c: &[u8]| {
            output.push_str(&String::from_utf8_lossy(c));
        },
    );

    match rewriter.write(html.as_bytes()) {
        Ok(_) => {}
        Err(_) => return html.to_string(),
    }

    match rewriter.end() {
        Ok(_) => {}
        Err(_) => return html.to_string(),
    }

    if output.is_empty() { html.to_string() } else { output }
}

/// Remove HTML comments from the document.
fn remove_comments(html: &str) -> String {
    let re = Regex::new(r"(?s)<!--.*?-->").unwrap();
    re.replace_all(html, "").to_string()
}
