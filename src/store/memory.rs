// src/store/memory.rs

use async_trait::async_trait;
use sqlx::types::Json;
use tokio::sync::RwLock;

use super::{AttemptStore, UserStore};
use crate::{
    error::AppError,
    models::{
        attempt::{AttemptRecord, NewAttempt, index_attempts},
        user::User,
    },
};

/// Process-local store, used when no database is configured and in tests.
/// Contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    attempts: RwLock<Vec<AttemptRecord>>,
    users: RwLock<Vec<User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttemptStore for MemoryStore {
    async fn insert_attempt(&self, attempt: NewAttempt) -> Result<AttemptRecord, AppError> {
        let mut attempts = self.attempts.write().await;

        let record = AttemptRecord {
            id: attempts.len() as i64 + 1,
            attempt_index: 0,
            user_id: attempt.user_id,
            score: attempt.score,
            total: attempt.total,
            accuracy: attempt.accuracy,
            topics: Json(attempt.topics),
            xp: attempt.xp,
            created_at: chrono::Utc::now(),
        };
        attempts.push(record.clone());

        Ok(record)
    }

    async fn list_attempts(&self, user_id: i64) -> Result<Vec<AttemptRecord>, AppError> {
        let attempts = self.attempts.read().await;

        // Insertion order is creation order.
        let mine = attempts
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();

        Ok(index_attempts(mine))
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, AppError> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.username == username) {
            return Err(AppError::Conflict(format!(
                "Username '{}' already exists",
                username
            )));
        }

        let user = User {
            id: users.len() as i64 + 1,
            username: username.to_string(),
            password: password_hash.to_string(),
            created_at: chrono::Utc::now(),
        };
        users.push(user.clone());

        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attempt::TopicTallies;

    #[tokio::test]
    async fn lists_only_own_attempts_in_order() {
        let store = MemoryStore::new();
        for (user, score) in [(1, 2), (2, 5), (1, 4), (1, 3)] {
            store
                .insert_attempt(NewAttempt::new(user, score, 5, TopicTallies::new()))
                .await
                .unwrap();
        }

        let mine = store.list_attempts(1).await.unwrap();
        let scores: Vec<i32> = mine.iter().map(|a| a.score).collect();
        let indices: Vec<usize> = mine.iter().map(|a| a.attempt_index).collect();
        assert_eq!(scores, vec![2, 4, 3]);
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let store = MemoryStore::new();
        store.create_user("alice", "hash").await.unwrap();
        let err = store.create_user("alice", "other").await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
