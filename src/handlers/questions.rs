// src/handlers/questions.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::{
    error::AppError,
    models::question::{CreateIncorrectAnswerRequest, CreateQuestionRequest, UpdateQuestionRequest},
    repository::{incorrect_answers, questions},
};

/// Lists all questions, lowest id first.
pub async fn list_questions(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let questions = questions::list_questions(&pool).await?;
    Ok(Json(questions))
}

/// Retrieves a single question by ID.
pub async fn get_question(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let question = questions::find_question(&pool, id)
        .await?
        .ok_or(AppError::NotFound("Question not found".to_string()))?;

    Ok(Json(question))
}

/// Creates a question together with its incorrect answers.
pub async fn create_question(
    State(pool): State<PgPool>,
    Json(payload): Json<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let id = questions::create_question(&pool, &payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({"id": id, "message": "Question created successfully"})),
    ))
}

/// Replaces a question's text and correct answer.
/// Answers recorded earlier keep their stored correctness.
pub async fn update_question(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    if !questions::update_question(&pool, id, &payload).await? {
        return Err(AppError::NotFound("Question not found".to_string()));
    }

    Ok(Json(json!({"message": "Question updated successfully"})))
}

/// Deletes a question and everything attached to it.
pub async fn delete_question(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !questions::delete_question(&pool, id).await? {
        return Err(AppError::NotFound("Question not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Lists the incorrect answers attached to a question.
pub async fn list_incorrect_answers(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    questions::find_question(&pool, id)
        .await?
        .ok_or(AppError::NotFound("Question not found".to_string()))?;

    let answers = incorrect_answers::list_incorrect_answers(&pool, id).await?;
    Ok(Json(answers))
}

/// Attaches one more incorrect answer to a question.
pub async fn create_incorrect_answer(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(payload): Json<CreateIncorrectAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    questions::find_question(&pool, id)
        .await?
        .ok_or(AppError::NotFound("Question not found".to_string()))?;

    let answer_id = incorrect_answers::create_incorrect_answer(&pool, id, &payload.incorrect_answer).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({"id": answer_id, "message": "Answer created successfully"})),
    ))
}

/// Retrieves one incorrect answer by its own ID.
pub async fn get_incorrect_answer(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let answer = incorrect_answers::find_incorrect_answer(&pool, id)
        .await?
        .ok_or(AppError::NotFound("Answer not found".to_string()))?;

    Ok(Json(answer))
}

/// Rewords an incorrect answer.
pub async fn update_incorrect_answer(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(payload): Json<CreateIncorrectAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    if !incorrect_answers::update_incorrect_answer(&pool, id, &payload.incorrect_answer).await? {
        return Err(AppError::NotFound("Answer not found".to_string()));
    }

    Ok(Json(json!({"message": "Answer updated successfully"})))
}

/// Detaches an incorrect answer by its own ID.
pub async fn delete_incorrect_answer(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !incorrect_answers::delete_incorrect_answer(&pool, id).await? {
        return Err(AppError::NotFound("Answer not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
