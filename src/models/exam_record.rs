// src/models/exam_record.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::code::is_valid_code;

/// Raw answers as submitted: question identifier to text.
pub type Answers = HashMap<String, String>;

/// Represents one entry of the `results` collection.
/// Written once per submission and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamRecord {
    /// `{user_id}_{test_code}_{unix_seconds}`, suffixed when that is taken.
    pub id: String,
    pub user_id: i64,
    pub test_code: String,
    pub answers: Answers,
    /// Percentage in `[0, 100]`.
    pub score: f64,
    pub submitted_at: DateTime<Utc>,
}

/// DTO for submitting answers to a test.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitResultRequest {
    pub user_id: i64,

    #[validate(custom(function = validate_test_code))]
    pub test_code: String,

    /// Key: question identifier (`"3"`, or `"3A"`/`"3B"` for split questions)
    /// Value: the user's answer
    #[validate(custom(function = validate_answers))]
    pub answers: Answers,
}

/// Returned to the front-end after a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitOutcome {
    pub score: f64,
    pub result_id: String,
}

/// A result joined with the display name of its user and the title of its test.
#[derive(Debug, Clone, Serialize)]
pub struct RecentResult {
    #[serde(flatten)]
    pub record: ExamRecord,
    pub user_name: String,
    pub test_title: String,
}

const MAX_ANSWERS: usize = 500;
const MAX_ANSWER_LEN: usize = 1000;

fn validate_test_code(code: &str) -> Result<(), validator::ValidationError> {
    if !is_valid_code(code) {
        return Err(validator::ValidationError::new("test_code_must_be_six_digits"));
    }
    Ok(())
}

fn validate_answers(answers: &Answers) -> Result<(), validator::ValidationError> {
    if answers.len() > MAX_ANSWERS {
        return Err(validator::ValidationError::new("too_many_answers"));
    }
    for (question, answer) in answers {
        if question.trim().is_empty() {
            return Err(validator::ValidationError::new("question_id_cannot_be_empty"));
        }
        if answer.chars().count() > MAX_ANSWER_LEN {
            return Err(validator::ValidationError::new("answer_too_long"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(code: &str, answers: &[(&str, &str)]) -> SubmitResultRequest {
        SubmitResultRequest {
            user_id: 7,
            test_code: code.to_string(),
            answers: answers
                .iter()
                .map(|(q, a)| (q.to_string(), a.to_string()))
                .collect(),
        }
    }

    #[test]
    fn accepts_well_formed_submission() {
        assert!(request("012345", &[("1", "A"), ("2A", "x")]).validate().is_ok());
    }

    #[test]
    fn accepts_empty_answers() {
        assert!(request("012345", &[]).validate().is_ok());
    }

    #[test]
    fn rejects_malformed_code() {
        assert!(request("12345", &[("1", "A")]).validate().is_err());
        assert!(request("12a456", &[("1", "A")]).validate().is_err());
    }

    #[test]
    fn rejects_blank_question_id() {
        assert!(request("012345", &[(" ", "A")]).validate().is_err());
    }
}
