// src/generation/parser.rs

use std::collections::HashSet;

use serde_json::Value;

use super::GenerationError;
use crate::{
    config::OPTIONS_PER_QUESTION,
    models::question::{QuizQuestion, QuizSet},
};

/// Extracts a quiz from raw model output.
///
/// The array is taken from the first `[` to the last `]`, so any prose the
/// model wraps around it is ignored. The span must be well-formed JSON and
/// every element must pass [`validate_question`]. The question count is not
/// enforced; models do not always return the number asked for.
pub fn parse_quiz(raw: &str) -> Result<QuizSet, GenerationError> {
    let span = extract_array(raw)?;

    let value: Value = serde_json::from_str(span)
        .map_err(|e| GenerationError::ParseFailure(format!("invalid JSON: {}", e)))?;

    validate_quiz(value)
}

/// Returns the text between the first `[` and the last `]`, inclusive.
fn extract_array(raw: &str) -> Result<&str, GenerationError> {
    let start = raw
        .find('[')
        .ok_or_else(|| GenerationError::ParseFailure("no opening bracket".to_string()))?;
    let end = raw
        .rfind(']')
        .ok_or_else(|| GenerationError::ParseFailure("no closing bracket".to_string()))?;

    if end < start {
        return Err(GenerationError::ParseFailure(
            "closing bracket precedes opening bracket".to_string(),
        ));
    }

    Ok(&raw[start..=end])
}

fn validate_quiz(value: Value) -> Result<QuizSet, GenerationError> {
    let Value::Array(items) = value else {
        return Err(GenerationError::ValidationFailure(
            "top-level value is not an array".to_string(),
        ));
    };

    if items.is_empty() {
        return Err(GenerationError::ValidationFailure(
            "no questions returned".to_string(),
        ));
    }

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            validate_question(item).map_err(|reason| {
                GenerationError::ValidationFailure(format!("item {}: {}", i, reason))
            })
        })
        .collect()
}

/// Checks one array element against the quiz question shape.
pub fn validate_question(item: Value) -> Result<QuizQuestion, String> {
    let Value::Object(mut fields) = item else {
        return Err("not an object".to_string());
    };

    let question = match fields.remove("question") {
        Some(Value::String(q)) if !q.trim().is_empty() => q,
        Some(Value::String(_)) => return Err("question is empty".to_string()),
        _ => return Err("question is missing or not a string".to_string()),
    };

    let options = match fields.remove("options") {
        Some(Value::Array(options)) => options
            .into_iter()
            .map(|o| match o {
                Value::String(s) => Ok(s),
                _ => Err("option is not a string".to_string()),
            })
            .collect::<Result<Vec<String>, String>>()?,
        _ => return Err("options is missing or not an array".to_string()),
    };

    if options.len() != OPTIONS_PER_QUESTION {
        return Err(format!(
            "expected {} options, found {}",
            OPTIONS_PER_QUESTION,
            options.len()
        ));
    }

    let distinct: HashSet<&str> = options.iter().map(String::as_str).collect();
    if distinct.len() != options.len() {
        return Err("options are not distinct".to_string());
    }

    let correct_answer = match fields.remove("correctAnswer") {
        Some(Value::String(answer)) => answer,
        _ => return Err("correctAnswer is missing or not a string".to_string()),
    };

    if !options.contains(&correct_answer) {
        return Err("correctAnswer does not match any option".to_string());
    }

    Ok(QuizQuestion {
        question,
        options,
        correct_answer,
    })
}
