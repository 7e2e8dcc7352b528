// src/models/report.rs

use serde::Serialize;

use crate::models::{question::Question, user::User};

/// Per-user summary row, also the row shape of the CSV export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserReport {
    pub user_id: i64,
    pub name: String,
    pub total_questions: usize,
    pub answered_questions: usize,
    pub correct_answers: usize,
    pub avg_time: f64,
    pub fastest_answer: f64,
    pub slowest_answer: f64,
    pub unanswered_questions: usize,
}

impl UserReport {
    /// Column names, in the order `row` emits them.
    pub const FIELDS: [&'static str; 9] = [
        "user_id",
        "name",
        "total_questions",
        "answered_questions",
        "correct_answers",
        "avg_time",
        "fastest_answer",
        "slowest_answer",
        "unanswered_questions",
    ];

    pub fn row(&self) -> [String; 9] {
        [
            self.user_id.to_string(),
            self.name.clone(),
            self.total_questions.to_string(),
            self.answered_questions.to_string(),
            self.correct_answers.to_string(),
            self.avg_time.to_string(),
            self.fastest_answer.to_string(),
            self.slowest_answer.to_string(),
            self.unanswered_questions.to_string(),
        ]
    }
}

/// A numeric statistic attached to one question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionStat {
    pub question_id: i64,
    pub value: f64,
}

#[derive(Debug, Serialize)]
pub struct UserScore {
    pub user: Option<User>,
    pub correct_answers: usize,
}

#[derive(Debug, Serialize)]
pub struct QuestionTime {
    pub question: Option<Question>,
    pub seconds: f64,
}

#[derive(Debug, Serialize)]
pub struct UserTime {
    pub user: Option<User>,
    pub seconds: f64,
}

#[derive(Debug, Serialize)]
pub struct MedianTimes {
    pub correct: f64,
    pub incorrect: f64,
}

/// Every analytics result in one response body.
#[derive(Debug, Serialize)]
pub struct AnalyticsSummary {
    pub top_scorer: UserScore,
    pub fastest_question: QuestionTime,
    pub second_place: UserTime,
    pub average_time_per_question: Vec<QuestionStat>,
    pub success_rate_per_question: Vec<QuestionStat>,
    pub users_who_answered_all: Vec<User>,
    pub median_time: MedianTimes,
    pub user_reports: Vec<UserReport>,
}
