//! Client for hosted text-completion endpoints.
//!
//! Speaks the Hugging Face inference wire format: POST a JSON body of
//! `{"inputs": prompt}` with a bearer token, get back an array of objects
//! carrying `generated_text`.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, ScrapeError};

/// Default inference endpoint.
pub const DEFAULT_API_URL: &str =
    "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.2";

/// Default instruction used by [`CompletionClient::summarize`].
pub const DEFAULT_QUERY: &str = "Give me a brief summary of the following text";

#[derive(Debug, Deserialize)]
struct Generation {
    generated_text: String,
}

/// A blocking completion client with bearer-token auth.
pub struct CompletionClient {
    agent: ureq::Agent,
    api_url: String,
    api_key: String,
}

impl CompletionClient {
    /// A client against [`DEFAULT_API_URL`].
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_api_url(api_key, DEFAULT_API_URL)
    }

    /// A client against a custom endpoint speaking the same wire format.
    #[must_use]
    pub fn with_api_url(api_key: impl Into<String>, api_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(Duration::from_secs(120)).build();
        Self { agent, api_url: api_url.into(), api_key: api_key.into() }
    }

    /// Sends `prompt` and returns the first generated text.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::Http`] on transport or status failures,
    /// [`ScrapeError::Io`] when the response is not the expected JSON shape,
    /// [`ScrapeError::EmptyCompletion`] when the array comes back empty.
    pub fn complete(&self, prompt: &str) -> Result<String> {
        log::debug!("requesting completion from {}", self.api_url);
        let response = self
            .agent
            .post(&self.api_url)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(serde_json::json!({ "inputs": prompt }))
            .map_err(Box::new)?;
        let mut generations: Vec<Generation> = response.into_json()?;
        if generations.is_empty() {
            return Err(ScrapeError::EmptyCompletion);
        }
        Ok(generations.remove(0).generated_text)
    }

    /// Prepends `query` to `text` and completes the combined prompt.
    ///
    /// # Errors
    ///
    /// Same as [`CompletionClient::complete`].
    pub fn summarize(&self, query: &str, text: &str) -> Result<String> {
        self.complete(&format!("{query} {text} "))
    }
}
