// src/handlers/quiz.rs

use std::{collections::HashMap, sync::Arc};

use axum::{
    Extension, Json,
    extract::{Multipart, Query, State, multipart::MultipartError},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    bank,
    error::AppError,
    generation::{self, CompletionClient, GenerationError, content::decode_syllabus},
    models::{
        attempt::{NewAttempt, SubmitQuizRequest, TopicTallies},
        question::{BankFilter, PublicBankQuestion},
    },
    store::AttemptStore,
    utils::jwt::Claims,
};

/// Result of grading a set of bank answers.
#[derive(Debug, PartialEq)]
struct Graded {
    score: i32,
    total: i32,
    topics: TopicTallies,
}

/// Grades answers against the static bank by exact string match.
///
/// Every answered question counts towards `total`; questions without a topic
/// tag contribute to the score but not to any topic tally.
fn grade_answers(answers: &HashMap<i64, String>) -> Result<Graded, AppError> {
    let mut graded = Graded {
        score: 0,
        total: 0,
        topics: TopicTallies::new(),
    };

    for (q_id, user_ans) in answers {
        let question = bank::find(*q_id)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown question id {}", q_id)))?;
        let is_correct = user_ans == question.correct_answer;

        graded.total += 1;
        if is_correct {
            graded.score += 1;
        }

        if let Some(topic) = question.topic {
            let tally = graded.topics.entry(topic.to_string()).or_default();
            tally.total += 1;
            if is_correct {
                tally.correct += 1;
            }
        }
    }

    Ok(graded)
}

/// Keeps the 413 of an over-limit body; any other multipart failure is a bad request.
fn upload_error(e: MultipartError) -> AppError {
    let message = format!("Invalid upload: {}", e.body_text());
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(message)
    } else {
        AppError::BadRequest(message)
    }
}

/// Lists static bank questions without their answers.
///
/// `topic` and `difficulty` filters only match questions explicitly tagged
/// with that value.
pub async fn list_bank(Query(filter): Query<BankFilter>) -> impl IntoResponse {
    let questions: Vec<PublicBankQuestion> = bank::filter(&filter)
        .into_iter()
        .map(PublicBankQuestion::from)
        .collect();

    Json(questions)
}

/// Grades a static bank quiz and saves the attempt.
pub async fn submit_quiz(
    State(store): State<Arc<dyn AttemptStore>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SubmitQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if req.answers.is_empty() {
        return Err(AppError::BadRequest("No answers submitted".to_string()));
    }

    let user_id = claims.user_id()?;
    let graded = grade_answers(&req.answers)?;

    let attempt = NewAttempt::new(user_id, graded.score, graded.total, graded.topics);
    let record = store.insert_attempt(attempt).await?;

    tracing::info!(
        user_id,
        attempt_id = record.id,
        score = record.score,
        total = record.total,
        "Quiz submitted"
    );

    Ok((StatusCode::CREATED, Json(record)))
}

/// Generates a quiz from an uploaded syllabus.
///
/// Multipart fields: `file` (required, plain text) and `difficulty` (optional).
/// Failures after the upload is accepted are reported as one generic error.
pub async fn generate_quiz(
    State(completions): State<Arc<dyn CompletionClient>>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;

    let mut upload: Option<(Vec<u8>, Option<String>)> = None;
    let mut difficulty: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(upload_error)?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(upload_error)?;
                upload = Some((bytes.to_vec(), content_type));
            }
            Some("difficulty") => {
                let text = field
                    .text()
                    .await
                    .map_err(upload_error)?;
                difficulty = Some(text);
            }
            _ => {}
        }
    }

    let (bytes, content_type) = upload
        .ok_or_else(|| GenerationError::InputMissing("No file uploaded".to_string()))?;

    let syllabus = decode_syllabus(&bytes, content_type.as_deref()).inspect_err(|e| {
        tracing::warn!(user_id, kind = e.kind(), "Rejected syllabus upload: {}", e);
    })?;

    let quiz =
        generation::generate_quiz(completions.as_ref(), user_id, &syllabus, difficulty.as_deref())
            .await?;

    Ok(Json(quiz))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(pairs: &[(i64, &str)]) -> HashMap<i64, String> {
        pairs.iter().map(|(id, a)| (*id, a.to_string())).collect()
    }

    #[test]
    fn grades_and_tallies_topics() {
        // 4 and 6 are both "Data Structures"
        let graded =
            grade_answers(&answers(&[(4, "Stack"), (6, "Stack"), (2, "do...while")])).unwrap();
        assert_eq!(graded.score, 2);
        assert_eq!(graded.total, 3);

        let ds = graded.topics["Data Structures"];
        assert_eq!((ds.correct, ds.total), (1, 2));
        assert_eq!(graded.topics["Loops"].correct, 1);
    }

    #[test]
    fn untagged_question_counts_only_overall() {
        let graded = grade_answers(&answers(&[(10, "break")])).unwrap();
        assert_eq!((graded.score, graded.total), (1, 1));
        assert!(graded.topics.is_empty());
    }

    #[test]
    fn matching_is_exact() {
        let graded = grade_answers(&answers(&[(5, "o(log n)")])).unwrap();
        assert_eq!(graded.score, 0);
    }

    #[test]
    fn unknown_question_is_rejected() {
        assert!(matches!(
            grade_answers(&answers(&[(999, "A")])),
            Err(AppError::BadRequest(_))
        ));
    }
}
