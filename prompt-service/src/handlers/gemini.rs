//! Prompt endpoints. All three forward to [`GeminiClient::ask`] and return
//! its text verbatim with a 200, failures included.
//!
//! [`GeminiClient::ask`]: crate::services::GeminiClient::ask

use crate::startup::AppState;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

/// Prompt used by `GET /gemini/ask-default`.
pub const DEFAULT_PROMPT: &str = "Explain how AI works in a few words.";

#[derive(Debug, Deserialize)]
pub struct PromptQuery {
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
}

pub async fn ask_default(State(state): State<AppState>) -> String {
    state.gemini.ask(DEFAULT_PROMPT).await
}

pub async fn ask_with_query(
    State(state): State<AppState>,
    Query(query): Query<PromptQuery>,
) -> String {
    state.gemini.ask(&query.prompt).await
}

pub async fn ask_with_body(
    State(state): State<AppState>,
    Json(request): Json<PromptRequest>,
) -> String {
    state.gemini.ask(&request.prompt).await
}
