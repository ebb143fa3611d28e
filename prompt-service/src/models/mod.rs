//! Domain models for prompt-service.

pub mod envelope;
mod user;

pub use envelope::{extract_text, Content, ExtractError, GenerateContentRequest, Part};
pub use user::{CreateUser, User};
