//! Error types for fetching and extracting realestate.co.nz pages.

use reqwest::StatusCode;

/// Errors produced while fetching or parsing office and listing pages.
///
/// Every variant is fatal for the call that produced it: a crawl or
/// extraction never returns partial results.
#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    /// Transport failure (DNS, connection, timeout, body read).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("unexpected status {status} for {url}")]
    HttpStatus { status: StatusCode, url: String },
    /// A CSS selector failed to compile.
    #[error("invalid selector `{selector}`: {message}")]
    Selector { selector: String, message: String },
    /// An element the page layout guarantees was not found.
    #[error("missing element: {0}")]
    MissingElement(String),
    /// An element was found but lacks a required attribute.
    #[error("missing attribute `{attribute}` on {element}")]
    MissingAttribute { element: String, attribute: String },
    /// A value expected to carry a numeric identifier had no digits.
    #[error("no numeric id in {0:?}")]
    MissingDigits(String),
    /// The pagination guard fired before a last page was seen.
    #[error("office {office_id} still had a next page after {limit} pages")]
    PageLimitExceeded { office_id: String, limit: u32 },
    #[error("parse error: {0}")]
    Parse(String),
}
