//! Common test utilities for prompt-service integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use prompt_service::config::{
    CorsConfig, DatabaseConfig, GeminiConfig, PromptConfig, DEFAULT_GEMINI_API_URL,
};
use prompt_service::models::{CreateUser, User};
use prompt_service::services::{GeminiClient, UserStore};
use prompt_service::startup::{build_router, AppState};
use secrecy::Secret;
use service_core::config::Config as CommonConfig;
use service_core::error::AppError;
use std::sync::{Arc, Mutex, Once};

pub const TEST_API_KEY: &str = "test-api-key";
pub const GENERATE_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,prompt_service=debug,sqlx=warn")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// `UserStore` kept in memory, ids assigned from 1.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn create_user(&self, input: &CreateUser) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        let user = User {
            id: users.len() as i64 + 1,
            name: input.name.clone(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}

pub fn gemini_config(api_url: &str) -> GeminiConfig {
    GeminiConfig {
        api_url: api_url.to_string(),
        api_key: Secret::new(TEST_API_KEY.to_string()),
        timeout: None,
    }
}

pub fn cors_config() -> CorsConfig {
    CorsConfig {
        allowed_origins: vec!["http://localhost:4200".to_string()],
    }
}

/// Router backed by an in-memory user store and a Gemini client at `api_url`.
pub fn test_router(api_url: &str) -> Router {
    init_tracing();

    let state = AppState {
        gemini: GeminiClient::new(gemini_config(api_url)).expect("Failed to build Gemini client"),
        users: Arc::new(InMemoryUserStore::default()),
    };

    build_router(state, &cors_config())
}

/// Router whose Gemini client points at an address nothing listens on.
pub fn offline_router() -> Router {
    test_router("http://127.0.0.1:1/v1beta/models/gemini-2.0-flash:generateContent")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).expect("Body is not JSON")
}

/// Config for a full application against `TEST_DATABASE_URL`.
pub fn database_config() -> PromptConfig {
    let database_url = std::env::var("TEST_DATABASE_URL")
        .expect("TEST_DATABASE_URL must be set to run database tests");

    PromptConfig {
        common: CommonConfig { port: 0 },
        service_name: "prompt-service-test".to_string(),
        log_level: "debug".to_string(),
        otlp_endpoint: None,
        database: DatabaseConfig {
            url: database_url,
            max_connections: 2,
            min_connections: 1,
        },
        gemini: gemini_config(DEFAULT_GEMINI_API_URL),
        cors: cors_config(),
    }
}
