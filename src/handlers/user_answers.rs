// src/handlers/user_answers.rs
//
// Read and administrative access to recorded answers. Answers are created by
// quiz sessions, not through this API.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use sqlx::PgPool;

use crate::{error::AppError, models::user_answer::NewUserAnswer, repository::user_answers};

pub async fn list_user_answers(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let answers = user_answers::list_user_answers(&pool).await?;
    Ok(Json(answers))
}

pub async fn get_user_answer(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let answer = user_answers::find_user_answer(&pool, id)
        .await?
        .ok_or(AppError::NotFound("User answer not found".to_string()))?;

    Ok(Json(answer))
}

/// Overwrites a recorded answer as given; correctness is not re-derived.
pub async fn update_user_answer(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(payload): Json<NewUserAnswer>,
) -> Result<impl IntoResponse, AppError> {
    if !payload.time_taken.is_finite() || payload.time_taken < 0.0 {
        return Err(AppError::BadRequest(
            "time_taken must be a non-negative number of seconds".to_string(),
        ));
    }

    if !user_answers::update_user_answer(&pool, id, &payload).await? {
        return Err(AppError::NotFound("User answer not found".to_string()));
    }

    Ok(Json(json!({"message": "User answer updated successfully"})))
}

pub async fn delete_user_answer(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !user_answers::delete_user_answer(&pool, id).await? {
        return Err(AppError::NotFound("User answer not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
