//! HTTP handlers for prompt-service.

pub mod gemini;
pub mod health;
pub mod users;
