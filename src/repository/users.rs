// src/repository/users.rs

use sqlx::PgPool;

use crate::{
    error::AppError,
    models::user::{User, UserRequest},
};

pub async fn create_user(pool: &PgPool, user: &UserRequest) -> Result<i64, AppError> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO trivia_user (first, last, email) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(&user.first)
    .bind(&user.last)
    .bind(&user.email)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create user: {:?}", e);
        AppError::from(e)
    })?;

    Ok(id)
}

/// All users, lowest id first.
pub async fn list_users(pool: &PgPool) -> Result<Vec<User>, AppError> {
    let users = sqlx::query_as::<_, User>(
        "SELECT id, first, last, email FROM trivia_user ORDER BY id",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list users: {:?}", e);
        AppError::from(e)
    })?;

    Ok(users)
}

pub async fn find_user(pool: &PgPool, id: i64) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, first, last, email FROM trivia_user WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Returns `false` when no user has this id.
pub async fn update_user(pool: &PgPool, id: i64, user: &UserRequest) -> Result<bool, AppError> {
    let result = sqlx::query("UPDATE trivia_user SET first = $1, last = $2, email = $3 WHERE id = $4")
        .bind(&user.first)
        .bind(&user.last)
        .bind(&user.email)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update user {}: {:?}", id, e);
            AppError::from(e)
        })?;

    Ok(result.rows_affected() > 0)
}

/// Deletes the user and, by cascade, their recorded answers.
pub async fn delete_user(pool: &PgPool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM trivia_user WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete user {}: {:?}", id, e);
            AppError::from(e)
        })?;

    Ok(result.rows_affected() > 0)
}
