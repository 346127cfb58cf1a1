//! DOM lookup and numeric-id helpers shared by the office and listing parsers.

use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

use crate::error::ScrapeError;

/// Compiles `css`, reporting failures as [`ScrapeError::Selector`].
pub fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

/// First element in `document` matching `css`, or a `MissingElement` error.
pub fn find_first<'a>(document: &'a Html, css: &str) -> Result<ElementRef<'a>, ScrapeError> {
    let sel = selector(css)?;
    document
        .select(&sel)
        .next()
        .ok_or_else(|| ScrapeError::MissingElement(css.to_string()))
}

/// First descendant of `parent` matching `css`.
pub fn find_within<'a>(
    parent: ElementRef<'a>,
    css: &str,
    context: &str,
) -> Result<ElementRef<'a>, ScrapeError> {
    let sel = selector(css)?;
    parent
        .select(&sel)
        .next()
        .ok_or_else(|| ScrapeError::MissingElement(format!("{} in {}", css, context)))
}

/// All descendant text of an element, concatenated as it appears.
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Text of the element's first child node: the node itself for text, or
/// the element's full text for a nested tag. `None` when there are no
/// children or the first child is something else (e.g. a comment).
pub fn first_child_text(element: ElementRef<'_>) -> Option<String> {
    let child = element.first_child()?;
    match child.value() {
        Node::Text(text) => Some(text.to_string()),
        Node::Element(_) => ElementRef::wrap(child).map(text_of),
        _ => None,
    }
}

/// Value of attribute `name`; `context` names the element in the error.
pub fn attr<'a>(element: ElementRef<'a>, name: &str, context: &str) -> Result<&'a str, ScrapeError> {
    element
        .value()
        .attr(name)
        .ok_or_else(|| ScrapeError::MissingAttribute {
            element: context.to_string(),
            attribute: name.to_string(),
        })
}

/// First run of ASCII digits in `text`: `"listing-98765"` gives `"98765"`.
pub fn first_digits(text: &str) -> Result<String, ScrapeError> {
    let re = Regex::new(r"\d+").map_err(|e| ScrapeError::Parse(format!("regex compile error: {}", e)))?;
    re.find(text)
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ScrapeError::MissingDigits(text.to_string()))
}

/// Digits that end `text`: `"agency-4521"` gives `"4521"`. Fails when the
/// value does not end in a digit.
pub fn trailing_digits(text: &str) -> Result<String, ScrapeError> {
    let re = Regex::new(r"^.*?(\d+)$")
        .map_err(|e| ScrapeError::Parse(format!("regex compile error: {}", e)))?;
    re.captures(text)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ScrapeError::MissingDigits(text.to_string()))
}
