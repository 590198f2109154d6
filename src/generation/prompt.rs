// src/generation/prompt.rs

use crate::config::{DEFAULT_DIFFICULTY, GENERATED_QUESTION_COUNT};

/// Renders the instruction sent to the model.
///
/// The syllabus is embedded verbatim. A missing or blank difficulty falls back
/// to "medium".
pub fn build_prompt(syllabus: &str, difficulty: Option<&str>) -> String {
    let difficulty = difficulty
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_DIFFICULTY);

    format!(
        r#"
Generate {count} {difficulty} level multiple choice questions
from this syllabus:

{syllabus}

Return ONLY valid JSON in this format:
[
  {{
    "question": "string",
    "options": ["A", "B", "C", "D"],
    "correctAnswer": "one of the options exactly"
  }}
]
Each question must have exactly 4 distinct options.
Only JSON. No explanation.
"#,
        count = GENERATED_QUESTION_COUNT,
    )
}
