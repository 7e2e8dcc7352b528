// tests/quiz_session_tests.rs
//
// Plays a session against a real PostgreSQL store. Skipped when
// DATABASE_URL is not set.

use std::collections::VecDeque;

use rand::{SeedableRng, rngs::StdRng};
use sqlx::postgres::PgPoolOptions;
use trivia_backend::{
    error::AppError,
    models::{question::CreateQuestionRequest, user::UserRequest},
    repository::{questions, user_answers, users},
    services::{
        analytics,
        quiz_session::{QuizOutput, QuizSession, SelectionReader, SystemClock},
    },
};

struct Scripted(VecDeque<usize>);

impl SelectionReader for Scripted {
    fn read_selection(&mut self) -> Result<usize, AppError> {
        self.0
            .pop_front()
            .ok_or(AppError::BadRequest("no more input".to_string()))
    }
}

/// Remembers the candidate lists it was shown.
#[derive(Default)]
struct Recording {
    shown: Vec<Vec<String>>,
}

impl QuizOutput for Recording {
    fn show_question(
        &mut self,
        _number: usize,
        _question: &trivia_backend::models::question::Question,
        candidates: &[String],
    ) -> std::io::Result<()> {
        self.shown.push(candidates.to_vec());
        Ok(())
    }

    fn show_verdict(&mut self, _is_correct: bool, _correct_answer: &str) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn session_persists_one_answer_per_question() {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping session_persists_one_answer_per_question");
        return;
    };

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .expect("Failed to connect to Postgres for testing.");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    let tag = &uuid::Uuid::new_v4().to_string()[..8];
    let user_id = users::create_user(
        &pool,
        &UserRequest {
            first: format!("Quiz_{}", tag),
            last: "Player".to_string(),
            email: format!("quiz_{}@example.com", tag),
        },
    )
    .await
    .unwrap();
    let user = users::find_user(&pool, user_id).await.unwrap().unwrap();

    // A single-candidate question, so selection 1 is always the correct answer.
    let question_id = questions::create_question(
        &pool,
        &CreateQuestionRequest {
            question_text: format!("Only option ({})", tag),
            correct_answer: "Yes".to_string(),
            incorrect_answers: vec![],
        },
    )
    .await
    .unwrap();
    let question = questions::find_question(&pool, question_id).await.unwrap().unwrap();

    let mut input = Scripted(VecDeque::from([1]));
    let mut output = Recording::default();
    let clock = SystemClock;

    let summary = QuizSession::new(
        &pool,
        &user,
        &mut input,
        &mut output,
        &clock,
        StdRng::seed_from_u64(11),
    )
    .run(std::slice::from_ref(&question))
    .await
    .unwrap();

    assert_eq!(summary.correct_count, 1);
    assert_eq!(output.shown, vec![vec!["Yes".to_string()]]);

    let recorded: Vec<_> = user_answers::list_user_answers(&pool)
        .await
        .unwrap()
        .into_iter()
        .filter(|a| a.user_id == user_id)
        .collect();
    assert_eq!(recorded.len(), 1);
    assert!(recorded[0].is_correct);
    assert_eq!(recorded[0].answer_text, "Yes");
    assert!(recorded[0].time_taken >= 0.0);

    let report = analytics::user_reports(
        std::slice::from_ref(&user),
        std::slice::from_ref(&question),
        &recorded,
    );
    assert_eq!(report[0].correct_answers, 1);
    assert_eq!(report[0].unanswered_questions, 0);

    questions::delete_question(&pool, question_id).await.unwrap();
    users::delete_user(&pool, user_id).await.unwrap();
}
