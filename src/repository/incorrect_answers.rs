// src/repository/incorrect_answers.rs

use sqlx::PgPool;

use crate::{error::AppError, models::question::IncorrectAnswer};

pub async fn create_incorrect_answer(
    pool: &PgPool,
    question_id: i64,
    incorrect_answer: &str,
) -> Result<i64, AppError> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO answer (question_id, incorrect_answer) VALUES ($1, $2) RETURNING id",
    )
    .bind(question_id)
    .bind(incorrect_answer)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create incorrect answer for question {}: {:?}", question_id, e);
        AppError::from(e)
    })?;

    Ok(id)
}

/// Incorrect answers currently attached to one question.
pub async fn list_incorrect_answers(
    pool: &PgPool,
    question_id: i64,
) -> Result<Vec<IncorrectAnswer>, AppError> {
    let answers = sqlx::query_as::<_, IncorrectAnswer>(
        "SELECT id, question_id, incorrect_answer FROM answer WHERE question_id = $1 ORDER BY id",
    )
    .bind(question_id)
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list incorrect answers for question {}: {:?}", question_id, e);
        AppError::from(e)
    })?;

    Ok(answers)
}

pub async fn find_incorrect_answer(pool: &PgPool, id: i64) -> Result<Option<IncorrectAnswer>, AppError> {
    let answer = sqlx::query_as::<_, IncorrectAnswer>(
        "SELECT id, question_id, incorrect_answer FROM answer WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(answer)
}

pub async fn update_incorrect_answer(
    pool: &PgPool,
    id: i64,
    incorrect_answer: &str,
) -> Result<bool, AppError> {
    let result = sqlx::query("UPDATE answer SET incorrect_answer = $1 WHERE id = $2")
        .bind(incorrect_answer)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update incorrect answer {}: {:?}", id, e);
            AppError::from(e)
        })?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_incorrect_answer(pool: &PgPool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM answer WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
