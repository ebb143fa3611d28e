//! User endpoints: list, lookup, create. Lookups of unknown ids answer
//! `200 null` rather than 404.

use crate::models::{CreateUser, User};
use crate::startup::AppState;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use service_core::error::AppError;

#[derive(Debug, Deserialize)]
pub struct FindByIdQuery {
    pub id: i64,
}

pub async fn find_all(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = state.users.list_users().await?;
    Ok(Json(users))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Option<User>>, AppError> {
    tracing::debug!(user_id = id, "Fetching user");
    Ok(Json(state.users.get_user(id).await?))
}

/// `GET /users/findById?id=`, the form the browser frontend uses.
pub async fn find_by_id(
    State(state): State<AppState>,
    Query(query): Query<FindByIdQuery>,
) -> Result<Json<Option<User>>, AppError> {
    Ok(Json(state.users.get_user(query.id).await?))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUser>,
) -> Result<Json<User>, AppError> {
    tracing::info!(name_len = payload.name.len(), "Creating user");
    let user = state.users.create_user(&payload).await?;
    Ok(Json(user))
}
