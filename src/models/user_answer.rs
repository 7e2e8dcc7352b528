// src/models/user_answer.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

/// One recorded response of a user to a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAnswer {
    pub id: i64,
    pub user_id: i64,
    pub question_id: i64,
    pub answer_text: String,
    /// Decided once when the answer is recorded, never recomputed.
    pub is_correct: bool,
    /// Seconds between the question being shown and the selection.
    pub time_taken: f64,
}

/// A user answer that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewUserAnswer {
    pub user_id: i64,
    pub question_id: i64,
    pub answer_text: String,
    pub is_correct: bool,
    pub time_taken: f64,
}

/// Raw 'user_answer' row as returned by the store.
#[derive(Debug, FromRow)]
pub struct UserAnswerRow {
    pub id: i64,
    pub user_id: i64,
    pub question_id: i64,
    pub answer_text: String,
    pub is_correct: bool,
    pub time_taken: f64,
}

impl TryFrom<UserAnswerRow> for UserAnswer {
    type Error = AppError;

    fn try_from(row: UserAnswerRow) -> Result<Self, Self::Error> {
        if !row.time_taken.is_finite() || row.time_taken < 0.0 {
            return Err(AppError::Database(format!(
                "user_answer {} has invalid time_taken {}",
                row.id, row.time_taken
            )));
        }

        Ok(UserAnswer {
            id: row.id,
            user_id: row.user_id,
            question_id: row.question_id,
            answer_text: row.answer_text,
            is_correct: row.is_correct,
            time_taken: row.time_taken,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(time_taken: f64) -> UserAnswerRow {
        UserAnswerRow {
            id: 1,
            user_id: 2,
            question_id: 3,
            answer_text: "Paris".to_string(),
            is_correct: true,
            time_taken,
        }
    }

    #[test]
    fn valid_row_maps_to_user_answer() {
        let answer = UserAnswer::try_from(row(2.5)).unwrap();
        assert_eq!(answer.user_id, 2);
        assert_eq!(answer.question_id, 3);
        assert_eq!(answer.time_taken, 2.5);
    }

    #[test]
    fn negative_or_nan_time_is_rejected() {
        assert!(matches!(
            UserAnswer::try_from(row(-1.0)),
            Err(AppError::Database(_))
        ));
        assert!(UserAnswer::try_from(row(f64::NAN)).is_err());
    }
}
