// src/repository/user_answers.rs

use sqlx::PgPool;

use crate::{
    error::AppError,
    models::user_answer::{NewUserAnswer, UserAnswer, UserAnswerRow},
};

const SELECT_USER_ANSWER: &str =
    "SELECT id, user_id, question_id, answer_text, is_correct, time_taken FROM user_answer";

pub async fn create_user_answer(pool: &PgPool, answer: &NewUserAnswer) -> Result<i64, AppError> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO user_answer (user_id, question_id, answer_text, is_correct, time_taken)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(answer.user_id)
    .bind(answer.question_id)
    .bind(&answer.answer_text)
    .bind(answer.is_correct)
    .bind(answer.time_taken)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create user answer: {:?}", e);
        AppError::from(e)
    })?;

    Ok(id)
}

/// Every recorded answer, oldest first. Rows with an invalid time are rejected.
pub async fn list_user_answers(pool: &PgPool) -> Result<Vec<UserAnswer>, AppError> {
    let rows = sqlx::query_as::<_, UserAnswerRow>(&format!("{SELECT_USER_ANSWER} ORDER BY id"))
        .fetch_all(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list user answers: {:?}", e);
            AppError::from(e)
        })?;

    rows.into_iter().map(UserAnswer::try_from).collect()
}

pub async fn find_user_answer(pool: &PgPool, id: i64) -> Result<Option<UserAnswer>, AppError> {
    let row = sqlx::query_as::<_, UserAnswerRow>(&format!("{SELECT_USER_ANSWER} WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.map(UserAnswer::try_from).transpose()
}

/// Administrative correction; the quiz flow never calls this.
pub async fn update_user_answer(
    pool: &PgPool,
    id: i64,
    answer: &NewUserAnswer,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE user_answer
        SET user_id = $1, question_id = $2, answer_text = $3, is_correct = $4, time_taken = $5
        WHERE id = $6
        "#,
    )
    .bind(answer.user_id)
    .bind(answer.question_id)
    .bind(&answer.answer_text)
    .bind(answer.is_correct)
    .bind(answer.time_taken)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_user_answer(pool: &PgPool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM user_answer WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
