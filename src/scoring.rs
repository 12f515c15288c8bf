// src/scoring.rs

//! Percentage scoring of a submission against a test's answer key.

use serde_json::Value;

use crate::models::exam_record::Answers;
use crate::models::test::{ExpectedAnswer, Test};

/// Scores `answers` against `test.answer_key` as a percentage in `[0, 100]`.
///
/// * Every key entry is one question worth the same; no partial credit.
/// * Single answers are read from `answers[question]`.
/// * Split answers are read from `answers[question + "A"]` and
///   `answers[question + "B"]` and count only if both parts match.
/// * Comparison trims whitespace and ignores case.
/// * An empty key or an empty submission scores 0.0.
pub fn score(test: &Test, answers: &Answers) -> f64 {
    let total_questions = test.answer_key.len();
    if total_questions == 0 || answers.is_empty() {
        return 0.0;
    }

    let correct_count = test
        .answer_key
        .iter()
        .filter(|(question, expected)| is_correct(question, expected, answers))
        .count();

    (correct_count as f64 / total_questions as f64) * 100.0
}

fn is_correct(question: &str, expected: &ExpectedAnswer, answers: &Answers) -> bool {
    match expected {
        ExpectedAnswer::Split { a, b } => {
            let part_a = answers.get(&format!("{}A", question));
            let part_b = answers.get(&format!("{}B", question));
            answer_matches(part_a, a) && answer_matches(part_b, b)
        }
        ExpectedAnswer::Single(value) => answer_matches(answers.get(question), value),
    }
}

fn answer_matches(submitted: Option<&String>, expected: &Value) -> bool {
    let (Some(submitted), Some(expected)) = (submitted, expected_text(expected)) else {
        return false;
    };
    normalize(submitted) == normalize(&expected)
}

/// Text form of a scalar expected value; structured values never match.
fn expected_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn normalize(answer: &str) -> String {
    answer.trim().to_uppercase()
}
