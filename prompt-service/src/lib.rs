//! Prompt Service - Gemini prompt proxy and user store over HTTP.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
