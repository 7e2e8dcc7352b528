// src/bin/report.rs
//
// Prints every analytics result and exports the per-user CSV report.

use std::path::Path;

use trivia_backend::{
    bootstrap::{connect_and_migrate, init_tracing},
    config::Config,
    repository::load_snapshot,
    services::{analytics, report_export::export_user_reports},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    let _guard = init_tracing(&config, "report.log", std::io::stderr);

    let pool = connect_and_migrate(&config).await?;
    let snapshot = load_snapshot(&pool).await?;
    let summary = analytics::summarize(&snapshot.users, &snapshot.questions, &snapshot.user_answers);

    match &summary.top_scorer.user {
        Some(user) => println!(
            "Highest scorer: {} with {} correct answers.",
            user.full_name(),
            summary.top_scorer.correct_answers
        ),
        None => println!("Highest scorer: none yet."),
    }

    match &summary.fastest_question.question {
        Some(question) => println!(
            "Fastest question: '{}' answered in {:.2} seconds.",
            question.question_text, summary.fastest_question.seconds
        ),
        None => println!("Fastest question: none answered correctly yet."),
    }

    match &summary.second_place.user {
        Some(user) => println!(
            "Second place: {} with a time of {:.2} seconds.",
            user.full_name(),
            summary.second_place.seconds
        ),
        None => println!("Second place: not enough players."),
    }

    println!("Average time per question:");
    for stat in &summary.average_time_per_question {
        println!("  question {}: {:.2}s", stat.question_id, stat.value);
    }

    println!("Success rate per question:");
    for stat in &summary.success_rate_per_question {
        println!("  question {}: {:.0}%", stat.question_id, stat.value * 100.0);
    }

    let names: Vec<String> = summary
        .users_who_answered_all
        .iter()
        .map(|u| u.full_name())
        .collect();
    println!("Users who answered all questions: {:?}", names);

    println!(
        "Median time: correct {:.2}s, incorrect {:.2}s",
        summary.median_time.correct, summary.median_time.incorrect
    );

    export_user_reports(&summary.user_reports, Path::new(&config.report_path))?;
    println!("Reports exported to '{}'.", config.report_path);

    Ok(())
}
