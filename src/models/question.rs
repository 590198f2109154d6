// src/models/question.rs

use serde::{Deserialize, Serialize};

/// One multiple-choice question ready for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,

    /// Exactly four distinct options, in display order.
    pub options: Vec<String>,

    /// Equals one of `options` exactly.
    pub correct_answer: String,
}

/// An ordered collection of validated questions. Never persisted.
pub type QuizSet = Vec<QuizQuestion>;

/// A predefined question from the static bank.
/// `topic` and `difficulty` are not tagged on every record.
#[derive(Debug, Clone)]
pub struct BankQuestion {
    pub id: i64,
    pub question: &'static str,
    pub options: [&'static str; 4],
    pub correct_answer: &'static str,
    pub topic: Option<&'static str>,
    pub difficulty: Option<&'static str>,
}

/// DTO for sending a bank question to the client (excludes the answer).
#[derive(Debug, Serialize)]
pub struct PublicBankQuestion {
    pub id: i64,
    pub question: &'static str,
    pub options: [&'static str; 4],
    pub topic: Option<&'static str>,
    pub difficulty: Option<&'static str>,
}

impl From<&BankQuestion> for PublicBankQuestion {
    fn from(q: &BankQuestion) -> Self {
        Self {
            id: q.id,
            question: q.question,
            options: q.options,
            topic: q.topic,
            difficulty: q.difficulty,
        }
    }
}

/// Query parameters for browsing the static bank.
#[derive(Debug, Default, Deserialize)]
pub struct BankFilter {
    pub topic: Option<String>,
    pub difficulty: Option<String>,
}
