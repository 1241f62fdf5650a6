//! Error types for scraping, rendering and summarization.

use thiserror::Error;

/// Errors surfaced by the fallible entry points of this crate.
///
/// The tree renderer itself never fails: structural anomalies in the DOM
/// degrade to partial output plus a logged diagnostic. Errors here come from
/// the boundaries around it — parsing the HTML, fetching it over the network,
/// or talking to a completion endpoint.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The input could not be parsed into a DOM.
    #[error("failed to parse HTML: {0}")]
    Parse(String),

    /// An HTTP request failed (transport error or non-success status).
    #[error("http request failed: {0}")]
    Http(#[from] Box<ureq::Error>),

    /// Reading a response body or other I/O failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The completion endpoint answered without any generated text.
    #[error("completion response contained no generated text")]
    EmptyCompletion,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ScrapeError>;
