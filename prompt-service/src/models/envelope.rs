//! Gemini `generateContent` request/response envelope.
//!
//! The API nests text as `contents[].parts[].text` on the way in and
//! `candidates[].content.parts[].text` on the way out. Only the first
//! candidate's first part is ever read.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One unit of prompt or answer text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// A block of parts. Unknown fields such as `role` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

/// Body of a `generateContent` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Wrap a prompt into exactly one content holding exactly one part.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: text.into() }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// The response did not have the `candidates[0].content.parts[0].text` shape.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("response is not a valid generateContent envelope: {0}")]
    InvalidEnvelope(#[from] serde_json::Error),

    #[error("response contains no candidates")]
    NoCandidates,

    #[error("first candidate contains no parts")]
    NoParts,
}

/// Pull the first answer text out of a `generateContent` response body.
pub fn extract_text(body: &str) -> Result<String, ExtractError> {
    let response: GenerateContentResponse = serde_json::from_str(body)?;

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(ExtractError::NoCandidates)?;

    candidate
        .content
        .parts
        .into_iter()
        .next()
        .map(|part| part.text)
        .ok_or(ExtractError::NoParts)
}
