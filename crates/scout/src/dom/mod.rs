// ABOUTME: DOM query capability used by every extractor, plus the scraper-backed HtmlDocument.
// ABOUTME: Extraction code only sees the Queryable trait, so another renderer can be plugged in.

pub mod compiled;

use scraper::Html;

use crate::dom::compiled::get_or_compile;
use crate::formats::element_text;

/// Read-only selector queries over a parsed page.
///
/// Implementations must treat an invalid selector as "no match".
pub trait Queryable {
    /// Whitespace-collapsed text of the first element matching `selector` that has any text.
    fn select_text(&self, selector: &str) -> Option<String>;

    /// Trimmed value of `attr` on the first matching element where it is non-empty.
    fn select_attr(&self, selector: &str, attr: &str) -> Option<String>;

    /// Raw, unnormalized text content of every matching element.
    fn select_raw(&self, selector: &str) -> Vec<String>;
}

/// Tries `selectors` in order and returns the first non-empty text.
pub fn first_text<S: AsRef<str>>(doc: &dyn Queryable, selectors: &[S]) -> Option<String> {
    selectors.iter().find_map(|s| doc.select_text(s.as_ref()))
}

/// Tries `selectors` in order and returns the first non-empty attribute value.
pub fn first_attr(doc: &dyn Queryable, selectors: &[&str], attr: &str) -> Option<String> {
    selectors.iter().find_map(|s| doc.select_attr(s, attr))
}

/// A parsed HTML page backed by `scraper`.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parses a full HTML document. html5ever never rejects input, so this cannot fail.
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }
}

impl Queryable for HtmlDocument {
    fn select_text(&self, selector: &str) -> Option<String> {
        let sel = get_or_compile(selector)?;
        self.html.select(&sel).find_map(|el| {
            let text = element_text(el);
            if text.is_empty() {
                None
            } else {
                Some(text)
            }
        })
    }

    fn select_attr(&self, selector: &str, attr: &str) -> Option<String> {
        let sel = get_or_compile(selector)?;
        self.html.select(&sel).find_map(|el| {
            el.value()
                .attr(attr)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        })
    }

    fn select_raw(&self, selector: &str) -> Vec<String> {
        match get_or_compile(selector) {
            Some(sel) => self
                .html
                .select(&sel)
                .map(|el| el.text().collect::<String>())
                .collect(),
            None => vec![],
        }
    }
}
