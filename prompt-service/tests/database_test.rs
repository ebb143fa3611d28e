//! Tests against a real PostgreSQL instance.
//!
//! Run with `TEST_DATABASE_URL=postgres://... cargo test -- --ignored`.

mod common;

use common::{database_config, init_tracing};
use prompt_service::models::CreateUser;
use prompt_service::services::{Database, UserStore};
use prompt_service::startup::Application;
use reqwest::Client;

async fn connect() -> Database {
    init_tracing();
    let config = database_config();
    let db = Database::new(&config.database.url, 2, 1)
        .await
        .expect("Failed to connect to test database");
    db.run_migrations().await.expect("Failed to run migrations");
    db
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (TEST_DATABASE_URL)"]
async fn create_and_get_user() {
    let db = connect().await;

    let created = db
        .create_user(&CreateUser {
            name: "Ana".to_string(),
        })
        .await
        .expect("Failed to create user");

    assert_eq!(created.name, "Ana");

    let fetched = db.get_user(created.id).await.expect("Failed to get user");
    assert_eq!(fetched, Some(created));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (TEST_DATABASE_URL)"]
async fn missing_user_is_none() {
    let db = connect().await;

    let fetched = db.get_user(i64::MAX).await.expect("Failed to get user");
    assert_eq!(fetched, None);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (TEST_DATABASE_URL)"]
async fn list_contains_created_users() {
    let db = connect().await;

    let mut created = Vec::new();
    for name in ["Ana", "Ana", "Luka"] {
        created.push(
            db.create_user(&CreateUser {
                name: name.to_string(),
            })
            .await
            .expect("Failed to create user"),
        );
    }

    let all = db.list_users().await.expect("Failed to list users");
    for user in &created {
        assert!(all.contains(user));
    }
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (TEST_DATABASE_URL)"]
async fn application_serves_users_over_http() {
    init_tracing();
    let app = Application::build(database_config())
        .await
        .expect("Failed to build application");
    let address = format!("http://127.0.0.1:{}", app.port());

    tokio::spawn(async move {
        app.run_until_stopped().await.ok();
    });

    let client = Client::new();
    for _ in 0..50 {
        if client.get(format!("{}/health", address)).send().await.is_ok() {
            break;
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
    }

    let ready = client
        .get(format!("{}/ready", address))
        .send()
        .await
        .expect("Failed to execute request");
    assert!(ready.status().is_success());

    let created: serde_json::Value = client
        .post(format!("{}/users", address))
        .json(&serde_json::json!({ "name": "Ana" }))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse JSON");
    assert_eq!(created["name"], "Ana");

    let fetched: serde_json::Value = client
        .get(format!("{}/users/{}", address, created["id"]))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse JSON");
    assert_eq!(fetched, created);

    let missing = client
        .get(format!("{}/users/{}", address, i64::MAX))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(missing.status(), reqwest::StatusCode::OK);
    assert_eq!(missing.text().await.expect("Failed to read body"), "null");
}
