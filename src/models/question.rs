// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// Represents the 'question' table in the database.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,

    pub question_text: String,

    /// The single answer string considered correct.
    pub correct_answer: String,
}

/// Represents the 'answer' table: one wrong option attached to a question.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct IncorrectAnswer {
    pub id: i64,
    pub question_id: i64,
    pub incorrect_answer: String,
}

/// DTO for creating a new question, optionally with its wrong options.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 1000))]
    pub question_text: String,
    #[validate(length(min = 1, max = 255))]
    pub correct_answer: String,
    #[serde(default)]
    #[validate(custom(function = validate_incorrect_answers))]
    pub incorrect_answers: Vec<String>,
}

/// DTO for replacing a question's text and correct answer.
///
/// Existing user answers keep the correctness they were recorded with.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateQuestionRequest {
    #[validate(length(min = 1, max = 1000))]
    pub question_text: String,
    #[validate(length(min = 1, max = 255))]
    pub correct_answer: String,
}

/// DTO for attaching one wrong option to a question.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateIncorrectAnswerRequest {
    #[validate(length(min = 1, max = 255))]
    pub incorrect_answer: String,
}

fn validate_incorrect_answers(answers: &[String]) -> Result<(), validator::ValidationError> {
    for answer in answers {
        if answer.is_empty() {
            return Err(validator::ValidationError::new("incorrect_answer_cannot_be_empty"));
        }
        if answer.len() > 255 {
            return Err(validator::ValidationError::new("incorrect_answer_too_long"));
        }
    }
    Ok(())
}
