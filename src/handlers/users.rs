// src/handlers/users.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::{error::AppError, models::user::UserRequest, repository::users};

/// Lists all users, lowest id first.
pub async fn list_users(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let users = users::list_users(&pool).await?;
    Ok(Json(users))
}

/// Retrieves a single user by ID.
pub async fn get_user(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let user = users::find_user(&pool, id)
        .await?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

/// Creates a new user.
/// Returns 201 Created with the generated id.
pub async fn create_user(
    State(pool): State<PgPool>,
    Json(payload): Json<UserRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let id = users::create_user(&pool, &payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({"id": id, "message": "User created successfully"})),
    ))
}

/// Replaces a user's names and email.
pub async fn update_user(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(payload): Json<UserRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    if !users::update_user(&pool, id, &payload).await? {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    Ok(Json(json!({"message": "User updated successfully"})))
}

/// Deletes a user by ID.
pub async fn delete_user(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !users::delete_user(&pool, id).await? {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
