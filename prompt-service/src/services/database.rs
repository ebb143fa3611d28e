//! Database service for prompt-service.

use crate::models::{CreateUser, User};
use crate::services::metrics::{DB_QUERY_DURATION, USERS_CREATED_TOTAL};
use async_trait::async_trait;
use service_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};

/// Storage for user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Every user, in id order.
    async fn list_users(&self) -> Result<Vec<User>, AppError>;

    /// The user with `id`, or `None` when there is no such row.
    async fn get_user(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Insert a user and return it with its generated id.
    async fn create_user(&self, input: &CreateUser) -> Result<User, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "prompt-service"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }
}

#[async_trait]
impl UserStore for Database {
    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_users"])
            .start_timer();

        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list users: {}", e)))?;

        timer.observe_duration();

        Ok(users)
    }

    #[instrument(skip(self))]
    async fn get_user(&self, id: i64) -> Result<Option<User>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_user"])
            .start_timer();

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get user: {}", e)))?;

        timer.observe_duration();

        Ok(user)
    }

    #[instrument(skip(self, input))]
    async fn create_user(&self, input: &CreateUser) -> Result<User, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_user"])
            .start_timer();

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(&input.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to create user: {}", e)))?;

        timer.observe_duration();
        USERS_CREATED_TOTAL.inc();

        info!(user_id = user.id, "User created");

        Ok(user)
    }

    /// Check database health.
    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }
}
