// src/bank.rs

//! The static programming question bank.

use crate::models::question::{BankFilter, BankQuestion};

static QUESTIONS: [BankQuestion; 10] = [
    BankQuestion {
        id: 1,
        question: "What is the output of: console.log(2 + '2')?",
        options: ["4", "22", "NaN", "Error"],
        correct_answer: "22",
        topic: Some("Data Types"),
        difficulty: Some("easy"),
    },
    BankQuestion {
        id: 2,
        question: "Which loop runs at least once?",
        options: ["for", "while", "do...while", "foreach"],
        correct_answer: "do...while",
        topic: Some("Loops"),
        difficulty: Some("easy"),
    },
    BankQuestion {
        id: 3,
        question: "What is recursion?",
        options: [
            "Looping technique",
            "Function calling itself",
            "Array method",
            "Sorting algorithm",
        ],
        correct_answer: "Function calling itself",
        topic: Some("Recursion"),
        difficulty: None,
    },
    BankQuestion {
        id: 4,
        question: "Which data structure uses LIFO?",
        options: ["Queue", "Stack", "Array", "Linked List"],
        correct_answer: "Stack",
        topic: Some("Data Structures"),
        difficulty: Some("easy"),
    },
    BankQuestion {
        id: 5,
        question: "Time complexity of binary search?",
        options: ["O(n)", "O(n log n)", "O(log n)", "O(1)"],
        correct_answer: "O(log n)",
        topic: Some("Algorithms"),
        difficulty: Some("medium"),
    },
    BankQuestion {
        id: 6,
        question: "Which data structure uses FIFO?",
        options: ["Stack", "Queue", "Tree", "Graph"],
        correct_answer: "Queue",
        topic: Some("Data Structures"),
        difficulty: None,
    },
    BankQuestion {
        id: 7,
        question: "What does a base case prevent in a recursive function?",
        options: [
            "Infinite recursion",
            "Type errors",
            "Memory leaks in loops",
            "Compilation",
        ],
        correct_answer: "Infinite recursion",
        topic: Some("Recursion"),
        difficulty: Some("medium"),
    },
    BankQuestion {
        id: 8,
        question: "Worst-case time complexity of quicksort?",
        options: ["O(n)", "O(n log n)", "O(n^2)", "O(log n)"],
        correct_answer: "O(n^2)",
        topic: Some("Algorithms"),
        difficulty: Some("hard"),
    },
    BankQuestion {
        id: 9,
        question: "What is typeof null in JavaScript?",
        options: ["null", "undefined", "object", "number"],
        correct_answer: "object",
        topic: Some("Data Types"),
        difficulty: Some("medium"),
    },
    BankQuestion {
        id: 10,
        question: "Which keyword exits a loop immediately?",
        options: ["continue", "break", "return", "exit"],
        correct_answer: "break",
        topic: None,
        difficulty: Some("easy"),
    },
];

/// All bank questions in id order.
#[cfg(test)]
pub fn all() -> &'static [BankQuestion] {
    &QUESTIONS
}

pub fn find(id: i64) -> Option<&'static BankQuestion> {
    QUESTIONS.iter().find(|q| q.id == id)
}

/// Returns the questions matching every filter value that is set.
///
/// A question whose tag is absent never matches a specific filter value on
/// that dimension. An unset (or blank) filter value matches everything.
pub fn filter(filter: &BankFilter) -> Vec<&'static BankQuestion> {
    QUESTIONS
        .iter()
        .filter(|q| tag_matches(q.topic, filter.topic.as_deref()))
        .filter(|q| tag_matches(q.difficulty, filter.difficulty.as_deref()))
        .collect()
}

fn tag_matches(tag: Option<&str>, wanted: Option<&str>) -> bool {
    match wanted.map(str::trim).filter(|w| !w.is_empty()) {
        None => true,
        Some(wanted) => tag == Some(wanted),
    }
}
