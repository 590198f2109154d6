// src/store/mod.rs

//! Persistence seams for users and quiz attempts.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{
        attempt::{AttemptRecord, NewAttempt},
        user::User,
    },
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Durable record of completed quiz attempts.
#[async_trait]
pub trait AttemptStore: Send + Sync {
    /// Writes one attempt atomically and returns it with its id and server timestamp.
    async fn insert_attempt(&self, attempt: NewAttempt) -> Result<AttemptRecord, AppError>;

    /// All attempts of `user_id`, ascending by creation time, with `attempt_index` set.
    async fn list_attempts(&self, user_id: i64) -> Result<Vec<AttemptRecord>, AppError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `AppError::Conflict` when the username is taken.
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, AppError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
}
