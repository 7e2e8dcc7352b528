// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{questions, reports, user_answers, users},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (users, questions, user answers, reports).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (Database Pool, Config).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
        ])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let user_routes = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route(
            "/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        );

    let question_routes = Router::new()
        .route("/", get(questions::list_questions).post(questions::create_question))
        .route(
            "/{id}",
            get(questions::get_question)
                .put(questions::update_question)
                .delete(questions::delete_question),
        )
        .route(
            "/{id}/answers",
            get(questions::list_incorrect_answers).post(questions::create_incorrect_answer),
        );

    let answer_routes = Router::new().route(
        "/{id}",
        get(questions::get_incorrect_answer)
            .put(questions::update_incorrect_answer)
            .delete(questions::delete_incorrect_answer),
    );

    let user_answer_routes = Router::new()
        .route("/", get(user_answers::list_user_answers))
        .route(
            "/{id}",
            get(user_answers::get_user_answer)
                .put(user_answers::update_user_answer)
                .delete(user_answers::delete_user_answer),
        );

    let report_routes = Router::new()
        .route("/", get(reports::get_reports))
        .route("/export", post(reports::export_reports));

    Router::new()
        .nest("/api/users", user_routes)
        .nest("/api/questions", question_routes)
        .nest("/api/answers", answer_routes)
        .nest("/api/user-answers", user_answer_routes)
        .nest("/api/reports", report_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
