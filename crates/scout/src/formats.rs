// ABOUTME: Text helpers shared by the extractors: whitespace collapsing, tag stripping and truncation.
// ABOUTME: Used to normalize descriptions that arrive as HTML inside JSON-LD or as raw DOM text.

use scraper::{ElementRef, Html, Node};

/// Elements whose boundaries separate words even without surrounding whitespace.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "footer",
    "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "ol", "p", "pre",
    "section", "table", "td", "th", "tr", "ul",
];

/// Collapses runs of whitespace into single spaces and trims the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whitespace-collapsed text content of an element.
///
/// Inline markup joins its text directly (`Java<b>Script</b>` reads as
/// `JavaScript`); block elements start a new word.
pub fn element_text(el: ElementRef<'_>) -> String {
    let mut out = String::new();
    for node in el.descendants() {
        match node.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(e) if BLOCK_TAGS.contains(&e.name()) => out.push(' '),
            _ => {}
        }
    }
    collapse_whitespace(&out)
}

fn fragment_text(html: &str) -> String {
    element_text(Html::parse_fragment(html).root_element())
}

/// Strips tags and decodes entities, returning whitespace-collapsed text.
///
/// JSON-LD descriptions are sometimes entity-escaped HTML (`&lt;p&gt;`), so a
/// second pass runs when the first one still leaves markup behind.
pub fn html_to_text(html: &str) -> String {
    let text = fragment_text(html);
    if text.contains('<') && text.contains('>') {
        fragment_text(&text)
    } else {
        text
    }
}

/// Truncates to at most `max_chars` characters, never splitting a character.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => s[..idx].trim_end().to_string(),
        None => s.to_string(),
    }
}
