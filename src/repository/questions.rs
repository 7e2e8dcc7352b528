// src/repository/questions.rs

use sqlx::PgPool;

use crate::{
    error::AppError,
    models::question::{CreateQuestionRequest, Question, UpdateQuestionRequest},
};

/// Inserts the question and its incorrect answers in one transaction.
pub async fn create_question(pool: &PgPool, question: &CreateQuestionRequest) -> Result<i64, AppError> {
    let mut tx = pool.begin().await?;

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO question (question_text, correct_answer) VALUES ($1, $2) RETURNING id",
    )
    .bind(&question.question_text)
    .bind(&question.correct_answer)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create question: {:?}", e);
        AppError::from(e)
    })?;

    for answer in &question.incorrect_answers {
        sqlx::query("INSERT INTO answer (question_id, incorrect_answer) VALUES ($1, $2)")
            .bind(id)
            .bind(answer)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(id)
}

/// All questions, lowest id first. Quiz sessions ask them in this order.
pub async fn list_questions(pool: &PgPool) -> Result<Vec<Question>, AppError> {
    let questions = sqlx::query_as::<_, Question>(
        "SELECT id, question_text, correct_answer FROM question ORDER BY id",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list questions: {:?}", e);
        AppError::from(e)
    })?;

    Ok(questions)
}

pub async fn find_question(pool: &PgPool, id: i64) -> Result<Option<Question>, AppError> {
    let question = sqlx::query_as::<_, Question>(
        "SELECT id, question_text, correct_answer FROM question WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(question)
}

pub async fn update_question(
    pool: &PgPool,
    id: i64,
    question: &UpdateQuestionRequest,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        "UPDATE question SET question_text = $1, correct_answer = $2 WHERE id = $3",
    )
    .bind(&question.question_text)
    .bind(&question.correct_answer)
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to update question {}: {:?}", id, e);
        AppError::from(e)
    })?;

    Ok(result.rows_affected() > 0)
}

/// Deletes the question; its incorrect answers and user answers go with it.
pub async fn delete_question(pool: &PgPool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM question WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete question {}: {:?}", id, e);
            AppError::from(e)
        })?;

    Ok(result.rows_affected() > 0)
}
