// src/generation/mod.rs

//! Turns uploaded syllabus text into a validated quiz via an external model.
//!
//! Pipeline: decode the upload → build the prompt → one completion call →
//! extract and validate the question array. A request either yields a full
//! `QuizSet` or fails; nothing partial is ever returned.

pub mod content;
pub mod groq;
pub mod parser;
pub mod prompt;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::question::QuizSet;

/// Failures of the generation pipeline.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A required input (syllabus file) was not supplied.
    #[error("{0}")]
    InputMissing(String),

    /// The upload is not plain text and cannot be embedded in a prompt.
    #[error("{0}")]
    UnsupportedContent(String),

    /// The model output has no bracketed array or it is not well-formed JSON.
    #[error("model output could not be parsed: {0}")]
    ParseFailure(String),

    /// The parsed array does not have the expected quiz shape.
    #[error("model output failed validation: {0}")]
    ValidationFailure(String),

    /// The completion call itself failed.
    #[error("completion request failed: {0}")]
    UpstreamFailure(String),
}

impl GenerationError {
    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::InputMissing(_) => "input_missing",
            GenerationError::UnsupportedContent(_) => "unsupported_content",
            GenerationError::ParseFailure(_) => "parse_failure",
            GenerationError::ValidationFailure(_) => "validation_failure",
            GenerationError::UpstreamFailure(_) => "upstream_failure",
        }
    }
}

/// A text-completion backend. One call per request, no retries.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Runs the pipeline for already-decoded syllabus text.
#[tracing::instrument(skip(client, syllabus), fields(syllabus_len = syllabus.len()))]
pub async fn generate_quiz(
    client: &dyn CompletionClient,
    user_id: i64,
    syllabus: &str,
    difficulty: Option<&str>,
) -> Result<QuizSet, GenerationError> {
    let prompt = prompt::build_prompt(syllabus, difficulty);

    let raw = client.complete(&prompt).await.inspect_err(|e| {
        tracing::warn!(kind = e.kind(), "Completion call failed: {}", e);
    })?;

    let quiz = parser::parse_quiz(&raw).inspect_err(|e| {
        tracing::warn!(
            kind = e.kind(),
            response_len = raw.len(),
            "Rejected model output: {}",
            e
        );
    })?;

    tracing::info!(questions = quiz.len(), "Generated quiz");
    Ok(quiz)
}
