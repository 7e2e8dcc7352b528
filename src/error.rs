// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Global Application Error Enum.
/// Shared by the HTTP layer, the quiz session and the report exporter.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request
    BadRequest(String),

    // 404 Not Found
    NotFound(String),

    /// The store rejected or failed a read/write. Never retried.
    Database(String),

    /// A quiz selection outside `1..=available`.
    InvalidSelection { selected: usize, available: usize },

    /// The report sink could not be opened or written.
    Export(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidSelection { selected, available } => write!(
                f,
                "Invalid selection {}: choose a number between 1 and {}",
                selected, available
            ),
            AppError::Database(msg) => write!(f, "Database error: {}", msg),
            AppError::Export(msg) => write!(f, "Export failed: {}", msg),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(msg) | AppError::Database(msg) | AppError::Export(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            err @ AppError::InvalidSelection { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Converts `sqlx::Error` into `AppError::Database`.
/// Allows using `?` operator on database queries.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_selection_maps_to_bad_request() {
        let resp = AppError::InvalidSelection {
            selected: 7,
            available: 4,
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn database_error_is_hidden_behind_500() {
        let resp = AppError::Database("connection refused".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn json_error_is_a_bad_request() {
        let err: AppError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn invalid_selection_message_names_the_range() {
        let err = AppError::InvalidSelection {
            selected: 0,
            available: 3,
        };
        assert_eq!(
            err.to_string(),
            "Invalid selection 0: choose a number between 1 and 3"
        );
    }
}
