//! scrapedown turns web pages into linear text.
//!
//! The crate fetches an HTML page (or takes markup you already have), walks
//! the parsed DOM with an explicit-stack depth-first traversal, and emits a
//! single Markdown or plain-text string. Tables become pipe tables through a
//! dedicated conversion; `nav` subtrees are dropped unless asked for. The
//! rendered text can optionally be piped through a hosted text-completion
//! endpoint for summarization.
//!
//! ```
//! use scrapedown::{convert_html, RenderOptions};
//!
//! let markdown = convert_html("<h1>Title</h1><p>Body text.</p>", &RenderOptions::default())?;
//! assert_eq!(markdown, "\n# Title\nBody text.\n\n");
//! # Ok::<(), scrapedown::ScrapeError>(())
//! ```

pub mod completion;
pub mod error;
pub mod fetch;
mod render;
mod table;

pub use completion::CompletionClient;
pub use error::{Result, ScrapeError};
pub use fetch::Fetcher;
pub use render::{NodeKind, OutputFormat, RenderOptions, convert_html, render};

/// Fetches `url` with default headers and linearizes the page in one call.
///
/// # Errors
///
/// Propagates fetch errors ([`ScrapeError::Http`], [`ScrapeError::Io`]) and
/// [`ScrapeError::Parse`] when the response body is not parseable HTML.
pub fn scrape(url: &str, options: &RenderOptions) -> Result<String> {
    let html = Fetcher::new().fetch(url)?;
    convert_html(&html, options)
}
