//! Gemini API client.
//!
//! Sends a single prompt to `generateContent` and returns the first answer
//! text. The API key travels in the `x-goog-api-key` header, never in the URL.

use crate::config::GeminiConfig;
use crate::models::{extract_text, ExtractError, GenerateContentRequest};
use crate::services::metrics::{GEMINI_REQUESTS_TOTAL, GEMINI_REQUEST_DURATION};
use reqwest::header::HeaderValue;
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

/// Value shipped in sample configuration; treated the same as no key.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_GEMINI_API_KEY";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Coarse classification of a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeminiErrorKind {
    /// The request never got an HTTP response (DNS, connect, TLS, body read).
    Transport,
    /// The API answered with a non-success status.
    Upstream,
    /// A success response whose body is not the expected envelope.
    MalformedResponse,
}

impl GeminiErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Upstream => "upstream",
            Self::MalformedResponse => "malformed_response",
        }
    }
}

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("Could not get response from Gemini API. {0}")]
    Transport(reqwest::Error),

    #[error("Gemini API returned {status}: {body}")]
    Upstream { status: StatusCode, body: String },

    #[error("Unexpected response from Gemini API: {0}")]
    MalformedResponse(#[from] ExtractError),
}

impl GeminiError {
    pub fn kind(&self) -> GeminiErrorKind {
        match self {
            Self::Transport(_) => GeminiErrorKind::Transport,
            Self::Upstream { .. } => GeminiErrorKind::Upstream,
            Self::MalformedResponse(_) => GeminiErrorKind::MalformedResponse,
        }
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_url: String,
    /// Pre-validated `x-goog-api-key` value; `None` when no usable key is set.
    api_key: Option<HeaderValue>,
    configured: bool,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let key = config.api_key.expose_secret();
        let api_key = api_key_header(key);
        if !key.is_empty() && api_key.is_none() {
            warn!("Gemini API key contains characters not allowed in an HTTP header; it will not be sent");
        }
        let configured = api_key.is_some() && key != PLACEHOLDER_API_KEY;

        if !configured {
            warn!(
                api_url = %config.api_url,
                "Gemini API key is not configured (set GEMINI_API_KEY or GEMINI_API_KEY_FILE); calls will likely fail"
            );
        }

        Ok(Self {
            client,
            api_url: config.api_url,
            api_key,
            configured,
        })
    }

    /// Whether a real, sendable API key is set.
    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// Send `prompt` and return the first candidate's text.
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    pub async fn generate(&self, prompt: &str) -> Result<String, GeminiError> {
        let timer = std::time::Instant::now();
        let result = self.send(prompt).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.kind().as_str(),
        };
        GEMINI_REQUESTS_TOTAL.with_label_values(&[outcome]).inc();
        GEMINI_REQUEST_DURATION
            .with_label_values(&[outcome])
            .observe(timer.elapsed().as_secs_f64());

        result
    }

    /// Like [`generate`](Self::generate), but every failure is folded into an
    /// `"Error: ..."` string so callers always get text back.
    pub async fn ask(&self, prompt: &str) -> String {
        match self.generate(prompt).await {
            Ok(text) => text,
            Err(e) => {
                error!(kind = e.kind().as_str(), error = %e, "Error calling Gemini API");
                format!("Error: {}", e)
            }
        }
    }

    async fn send(&self, prompt: &str) -> Result<String, GeminiError> {
        let request = GenerateContentRequest::from_text(prompt);

        info!(api_url = %self.api_url, "Calling Gemini API");

        let mut builder = self.client.post(&self.api_url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, key.clone());
        }

        let response = builder.send().await.map_err(GeminiError::Transport)?;
        let status = response.status();
        let body = response.text().await.map_err(GeminiError::Transport)?;

        if !status.is_success() {
            return Err(GeminiError::Upstream { status, body });
        }

        info!(status = %status, "Gemini API call successful");
        debug!(body_len = body.len(), "Gemini API response received");

        Ok(extract_text(&body)?)
    }
}

fn api_key_header(key: &str) -> Option<HeaderValue> {
    if key.is_empty() {
        return None;
    }
    let mut value = HeaderValue::from_str(key).ok()?;
    value.set_sensitive(true);
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    fn client(key: &str) -> GeminiClient {
        GeminiClient::new(GeminiConfig {
            api_url: "http://127.0.0.1:1/v1beta/models/test:generateContent".to_string(),
            api_key: Secret::new(key.to_string()),
            timeout: None,
        })
        .unwrap()
    }

    #[test]
    fn placeholder_key_is_not_configured() {
        assert!(!client("").is_configured());
        assert!(!client(PLACEHOLDER_API_KEY).is_configured());
        assert!(client("real-key").is_configured());
    }

    #[test]
    fn key_header_is_sensitive() {
        let gemini = client("real-key");
        assert!(gemini.api_key.as_ref().unwrap().is_sensitive());
        assert!(client("").api_key.is_none());
    }

    #[test]
    fn key_with_invalid_header_bytes_is_not_configured() {
        let gemini = client("bad\u{7f}key");
        assert!(!gemini.is_configured());
        assert!(gemini.api_key.is_none());
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let err = client("real-key").generate("hi").await.unwrap_err();
        assert_eq!(err.kind(), GeminiErrorKind::Transport);
    }

    #[tokio::test]
    async fn ask_folds_transport_error_into_text() {
        let answer = client("real-key").ask("hi").await;
        assert!(answer.starts_with("Error:"), "got {answer}");
    }
}
