// src/store/postgres.rs

use async_trait::async_trait;
use sqlx::{PgPool, types::Json};

use super::{AttemptStore, UserStore};
use crate::{
    error::AppError,
    models::{
        attempt::{AttemptRecord, NewAttempt, index_attempts},
        user::User,
    },
};

/// Postgres-backed store. Schema lives in `migrations/`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttemptStore for PgStore {
    async fn insert_attempt(&self, attempt: NewAttempt) -> Result<AttemptRecord, AppError> {
        let record = sqlx::query_as::<_, AttemptRecord>(
            r#"
            INSERT INTO quiz_attempts (user_id, score, total, accuracy, topics, xp)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, score, total, accuracy, topics, xp, created_at
            "#,
        )
        .bind(attempt.user_id)
        .bind(attempt.score)
        .bind(attempt.total)
        .bind(attempt.accuracy)
        .bind(Json(attempt.topics))
        .bind(attempt.xp)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert quiz attempt: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

        Ok(record)
    }

    async fn list_attempts(&self, user_id: i64) -> Result<Vec<AttemptRecord>, AppError> {
        let attempts = sqlx::query_as::<_, AttemptRecord>(
            r#"
            SELECT id, user_id, score, total, accuracy, topics, xp, created_at
            FROM quiz_attempts
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(index_attempts(attempts))
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password)
            VALUES ($1, $2)
            RETURNING id, username, password, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Postgres error code for unique violation is 23505
            if e.to_string().contains("unique constraint") || e.to_string().contains("23505") {
                AppError::Conflict(format!("Username '{}' already exists", username))
            } else {
                tracing::error!("Failed to register user: {:?}", e);
                AppError::from(e)
            }
        })
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Login DB error: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

        Ok(user)
    }
}
