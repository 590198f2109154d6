// src/models/attempt.rs

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use validator::{Validate, ValidationError};

use crate::config::XP_PER_CORRECT_ANSWER;

/// Correct/total counts for one topic within a single attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicTally {
    pub correct: i32,
    pub total: i32,
}

/// Per-topic tallies of one attempt, keyed by topic name.
pub type TopicTallies = BTreeMap<String, TopicTally>;

/// Represents the 'quiz_attempts' table in the database.
/// Rows are written once when a quiz finishes and never updated.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    pub id: i64,

    /// 1-based position in the user's history, assigned when the attempts are read.
    #[sqlx(skip)]
    pub attempt_index: usize,

    pub user_id: i64,
    pub score: i32,
    pub total: i32,

    /// `score / total * 100`, fixed at save time.
    pub accuracy: f64,

    /// Stored as a JSON object in the database.
    pub topics: Json<TopicTallies>,

    pub xp: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A validated attempt ready to be persisted. The store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAttempt {
    pub user_id: i64,
    pub score: i32,
    pub total: i32,
    pub accuracy: f64,
    pub topics: TopicTallies,
    pub xp: i32,
}

impl NewAttempt {
    /// Derives accuracy and XP from the raw outcome. `total` must be positive.
    pub fn new(user_id: i64, score: i32, total: i32, topics: TopicTallies) -> Self {
        Self {
            user_id,
            score,
            total,
            accuracy: score as f64 / total as f64 * 100.0,
            topics,
            xp: score * XP_PER_CORRECT_ANSWER,
        }
    }
}

/// Assigns `attempt_index` in retrieval order.
pub fn index_attempts(mut attempts: Vec<AttemptRecord>) -> Vec<AttemptRecord> {
    for (i, attempt) in attempts.iter_mut().enumerate() {
        attempt.attempt_index = i + 1;
    }
    attempts
}

/// DTO for recording an attempt graded by the client (e.g. a generated quiz).
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = validate_score_within_total))]
pub struct CreateAttemptRequest {
    #[validate(range(min = 0))]
    pub score: i32,
    #[validate(range(min = 1, max = 1000))]
    pub total: i32,
    #[serde(default)]
    #[validate(custom(function = validate_topic_tallies))]
    pub topics: TopicTallies,
}

fn validate_score_within_total(req: &CreateAttemptRequest) -> Result<(), ValidationError> {
    if req.score > req.total {
        return Err(ValidationError::new("score_exceeds_total"));
    }
    Ok(())
}

fn validate_topic_tallies(topics: &TopicTallies) -> Result<(), ValidationError> {
    for (topic, tally) in topics {
        if topic.trim().is_empty() || topic.len() > 100 {
            return Err(ValidationError::new("invalid_topic_name"));
        }
        if tally.total < 0 || tally.correct < 0 || tally.correct > tally.total {
            return Err(ValidationError::new("invalid_topic_tally"));
        }
    }
    Ok(())
}

/// DTO for submitting answers to static bank questions.
#[derive(Debug, Deserialize)]
pub struct SubmitQuizRequest {
    /// Key: bank question id. Value: the selected option.
    pub answers: HashMap<i64, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_attempt_derives_accuracy_and_xp() {
        let attempt = NewAttempt::new(7, 3, 4, TopicTallies::new());
        assert_eq!(attempt.accuracy, 75.0);
        assert_eq!(attempt.xp, 30);
    }

    #[test]
    fn rejects_score_above_total() {
        let req = CreateAttemptRequest {
            score: 6,
            total: 5,
            topics: TopicTallies::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn rejects_inconsistent_topic_tally() {
        let mut topics = TopicTallies::new();
        topics.insert("Loops".to_string(), TopicTally { correct: 3, total: 2 });
        let req = CreateAttemptRequest {
            score: 1,
            total: 2,
            topics,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn accepts_well_formed_request() {
        let mut topics = TopicTallies::new();
        topics.insert("Loops".to_string(), TopicTally { correct: 1, total: 2 });
        let req = CreateAttemptRequest {
            score: 1,
            total: 2,
            topics,
        };
        assert!(req.validate().is_ok());
    }
}
