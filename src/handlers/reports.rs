// src/handlers/reports.rs

use std::path::Path;

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;
use sqlx::PgPool;

use crate::{
    config::Config,
    error::AppError,
    repository::load_snapshot,
    services::{analytics, report_export::export_user_reports},
};

/// Computes every analytics report over the current data.
pub async fn get_reports(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let snapshot = load_snapshot(&pool).await?;
    let summary = analytics::summarize(&snapshot.users, &snapshot.questions, &snapshot.user_answers);

    Ok(Json(summary))
}

/// Writes the per-user reports to the configured CSV path.
pub async fn export_reports(
    State(pool): State<PgPool>,
    State(config): State<Config>,
) -> Result<impl IntoResponse, AppError> {
    let snapshot = load_snapshot(&pool).await?;
    let reports = analytics::user_reports(&snapshot.users, &snapshot.questions, &snapshot.user_answers);

    let path = config.report_path.clone();
    let rows = reports.len();
    tokio::task::spawn_blocking(move || export_user_reports(&reports, Path::new(&path)))
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))??;

    Ok(Json(json!({
        "path": config.report_path,
        "rows": rows,
        "message": "Reports exported successfully"
    })))
}
