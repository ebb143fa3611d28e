//! Configuration module for prompt-service.
//!
//! Everything is read once at startup from the environment (and `.env`).

use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::Path;
use std::time::Duration;

/// Default Gemini `generateContent` endpoint.
pub const DEFAULT_GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// Origin of the browser frontend that talks to this service.
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:4200";

#[derive(Debug, Clone)]
pub struct PromptConfig {
    pub common: core_config::Config,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub database: DatabaseConfig,
    pub gemini: GeminiConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Full `generateContent` URL, without credentials.
    pub api_url: String,
    pub api_key: Secret<String>,
    /// `None` keeps the HTTP client's default (no timeout).
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl PromptConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        Ok(Self {
            common,
            service_name: env::var("SERVICE_NAME").unwrap_or_else(|_| "prompt-service".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok(),
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").map_err(|_| {
                    AppError::ConfigError(anyhow::anyhow!("DATABASE_URL is required"))
                })?,
                max_connections: parse_env("DATABASE_MAX_CONNECTIONS").unwrap_or(10),
                min_connections: parse_env("DATABASE_MIN_CONNECTIONS").unwrap_or(1),
            },
            gemini: GeminiConfig {
                api_url: env::var("GEMINI_API_URL")
                    .unwrap_or_else(|_| DEFAULT_GEMINI_API_URL.to_string()),
                api_key: Secret::new(load_api_key(
                    env::var("GEMINI_API_KEY").ok(),
                    env::var("GEMINI_API_KEY_FILE").ok().as_deref().map(Path::new),
                )?),
                timeout: parse_env("GEMINI_TIMEOUT_SECS").map(Duration::from_secs),
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(
                    &env::var("CORS_ALLOWED_ORIGINS")
                        .unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_string()),
                ),
            },
        })
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}

/// Resolve the API key: an explicit value wins, then the key file.
///
/// No key at all is not an error here; the client warns and still calls out.
/// A key file that is named but unreadable is.
fn load_api_key(value: Option<String>, file: Option<&Path>) -> Result<String, AppError> {
    if let Some(key) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        return Ok(key);
    }

    match file {
        Some(path) => std::fs::read_to_string(path)
            .map(|contents| contents.trim().to_string())
            .map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!(
                    "Failed to read GEMINI_API_KEY_FILE {}: {}",
                    path.display(),
                    e
                ))
            }),
        None => Ok(String::new()),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
