// src/repository/mod.rs
//
// PostgreSQL access for the four trivia tables. Every function maps sqlx
// failures to `AppError::Database` and never retries.

pub mod incorrect_answers;
pub mod questions;
pub mod user_answers;
pub mod users;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    error::AppError,
    models::{
        question::{IncorrectAnswer, Question},
        user::User,
        user_answer::{NewUserAnswer, UserAnswer},
    },
};

/// The store operations a quiz session depends on.
#[async_trait]
pub trait AnswerStore: Send + Sync {
    async fn incorrect_answers(&self, question_id: i64) -> Result<Vec<IncorrectAnswer>, AppError>;

    /// Persists the answer and returns its generated id.
    async fn record_answer(&self, answer: &NewUserAnswer) -> Result<i64, AppError>;
}

#[async_trait]
impl AnswerStore for PgPool {
    async fn incorrect_answers(&self, question_id: i64) -> Result<Vec<IncorrectAnswer>, AppError> {
        incorrect_answers::list_incorrect_answers(self, question_id).await
    }

    async fn record_answer(&self, answer: &NewUserAnswer) -> Result<i64, AppError> {
        user_answers::create_user_answer(self, answer).await
    }
}

/// The three lists the analytics engine reduces over.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub questions: Vec<Question>,
    pub user_answers: Vec<UserAnswer>,
}

/// Loads users, questions and user answers for one analytics run.
pub async fn load_snapshot(pool: &PgPool) -> Result<Snapshot, AppError> {
    let users = users::list_users(pool).await?;
    let questions = questions::list_questions(pool).await?;
    let user_answers = user_answers::list_user_answers(pool).await?;

    tracing::debug!(
        users = users.len(),
        questions = questions.len(),
        user_answers = user_answers.len(),
        "Loaded analytics snapshot"
    );

    Ok(Snapshot {
        users,
        questions,
        user_answers,
    })
}
