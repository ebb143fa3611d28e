//! User record stored in the `users` table.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Persisted user. The id is assigned by the database.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
}

/// Input for creating a user. Any client-supplied id is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub name: String,
}
