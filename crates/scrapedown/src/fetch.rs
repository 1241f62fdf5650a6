//! Blocking page fetcher.
//!
//! Thin wrapper around a [`ureq::Agent`] that sends the browser-like headers
//! many sites expect before they serve real content to a scraper.

use std::time::Duration;

use crate::error::Result;

/// Default User-Agent, a desktop Chrome string.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_4) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/83.0.4103.61 Safari/537.36";

const ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-GB,en-US;q=0.9,en;q=0.8";

/// Fetches pages over HTTP(S) and returns their bodies as text.
pub struct Fetcher {
    agent: ureq::Agent,
    user_agent: String,
}

impl Fetcher {
    /// A fetcher with a 10 second timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(10))
    }

    /// A fetcher with an explicit request timeout.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self { agent, user_agent: DEFAULT_USER_AGENT.to_string() }
    }

    /// Overrides the User-Agent header.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Fetches `url` and returns the response body.
    ///
    /// # Errors
    ///
    /// [`crate::ScrapeError::Http`] on transport failures and non-success
    /// status codes, [`crate::ScrapeError::Io`] when reading the body fails.
    pub fn fetch(&self, url: &str) -> Result<String> {
        log::debug!("fetching {url}");
        let response = self
            .agent
            .get(url)
            .set("User-Agent", &self.user_agent)
            .set("Accept", ACCEPT)
            .set("Accept-Language", ACCEPT_LANGUAGE)
            .set("DNT", "1")
            .set("Upgrade-Insecure-Requests", "1")
            .call()
            .map_err(Box::new)?;
        Ok(response.into_string()?)
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::serve_once;

    #[test]
    fn returns_the_response_body() {
        let (url, handle, _rx) = serve_once("<p>Remote</p>", "text/html; charset=utf-8");
        let body = Fetcher::new().fetch(&url).unwrap();
        assert_eq!(body, "<p>Remote</p>");
        handle.join().unwrap();
    }

    #[test]
    fn sends_browser_like_headers() {
        let (url, handle, rx) = serve_once("ok", "text/plain");
        Fetcher::new().user_agent("Custom-UA/1.0").fetch(&url).unwrap();
        let request = rx.recv().unwrap().to_ascii_lowercase();
        assert!(request.contains("user-agent: custom-ua/1.0"), "{request}");
        assert!(request.contains("accept-language:"), "{request}");
        assert!(request.contains("dnt: 1"), "{request}");
        handle.join().unwrap();
    }

    #[test]
    fn transport_errors_surface_as_http() {
        // Nothing listens on this port (reserved, never assigned).
        let err = Fetcher::with_timeout(Duration::from_millis(200))
            .fetch("http://127.0.0.1:1/never")
            .unwrap_err();
        assert!(matches!(err, crate::ScrapeError::Http(_)));
    }
}
