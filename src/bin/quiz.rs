// src/bin/quiz.rs
//
// Plays one quiz session on the terminal: `quiz <user-id>`.

use std::io::{self, Write};

use trivia_backend::{
    bootstrap::{connect_and_migrate, init_tracing},
    config::Config,
    repository::{questions, users},
    services::{
        quiz_session::{QuizSession, SystemClock},
        terminal::{ConsoleOutput, LineSelectionReader},
    },
};

// Stdin is read synchronously inside the session; one thread is all it needs.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    let _guard = init_tracing(&config, "quiz.log", io::stderr);

    let user_id: i64 = std::env::args()
        .nth(1)
        .ok_or("usage: quiz <user-id>")?
        .parse()
        .map_err(|_| "user id must be a number")?;

    let pool = connect_and_migrate(&config).await?;

    let Some(user) = users::find_user(&pool, user_id).await? else {
        println!("User not found. Please create a new user first.");
        return Ok(());
    };

    let questions = questions::list_questions(&pool).await?;
    if questions.is_empty() {
        println!("No questions found. Exiting the game.");
        return Ok(());
    }

    println!("\nWelcome, {}!", user.full_name());
    println!("Let's start the game. You'll answer all questions in order.");

    let stdin = io::stdin();
    let mut input = LineSelectionReader::new(stdin.lock());
    let mut output = ConsoleOutput::new(io::stdout());
    let clock = SystemClock;

    let summary = QuizSession::new(
        &pool,
        &user,
        &mut input,
        &mut output,
        &clock,
        rand::thread_rng(),
    )
    .run(&questions)
    .await?;

    println!(
        "\nGame Over! You got {} out of {} questions correct.",
        summary.correct_count, summary.total_questions
    );
    io::stdout().flush()?;
    Ok(())
}
