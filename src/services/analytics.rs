// src/services/analytics.rs
//
// Reducers over an in-memory snapshot of users, questions and user answers.
// All of them are pure: no I/O, no shared state, safe to run concurrently.
//
// Ties always resolve to the element that comes first in the input slice.
// The store lists rows by ascending id, so in practice the lowest id wins.

use std::collections::{HashMap, HashSet};

use crate::models::{
    question::Question,
    report::{
        AnalyticsSummary, MedianTimes, QuestionStat, QuestionTime, UserReport, UserScore, UserTime,
    },
    user::User,
    user_answer::UserAnswer,
};

/// Per-user counters shared by the ranking reducers.
#[derive(Debug, Clone, Copy)]
struct UserTally {
    correct: usize,
    /// Fastest time over all answers, correct or not.
    fastest: f64,
}

impl Default for UserTally {
    fn default() -> Self {
        Self {
            correct: 0,
            fastest: f64::INFINITY,
        }
    }
}

fn tally_by_user(answers: &[UserAnswer]) -> HashMap<i64, UserTally> {
    let mut tallies: HashMap<i64, UserTally> = HashMap::new();
    for answer in answers {
        let tally = tallies.entry(answer.user_id).or_default();
        if answer.is_correct {
            tally.correct += 1;
        }
        tally.fastest = tally.fastest.min(answer.time_taken);
    }
    tallies
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(mut values: Vec<f64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

/// The user with the most correct answers, and that count.
///
/// Only users with at least one recorded answer compete. Returns `(None, 0)`
/// when no answer belongs to a known user.
pub fn top_scorer(users: &[User], answers: &[UserAnswer]) -> (Option<User>, usize) {
    let tallies = tally_by_user(answers);

    let mut best: Option<(&User, usize)> = None;
    for user in users {
        let Some(tally) = tallies.get(&user.id) else {
            continue;
        };
        if best.is_none_or(|(_, top)| tally.correct > top) {
            best = Some((user, tally.correct));
        }
    }

    match best {
        Some((user, correct)) => (Some(user.clone()), correct),
        None => (None, 0),
    }
}

/// The question with the smallest correct-answer time, and that time.
///
/// Questions never answered correctly are not eligible. Returns `(None, 0.0)`
/// when no question has a correct answer.
pub fn fastest_question(questions: &[Question], answers: &[UserAnswer]) -> (Option<Question>, f64) {
    let mut fastest: HashMap<i64, f64> = HashMap::new();
    for answer in answers.iter().filter(|a| a.is_correct) {
        fastest
            .entry(answer.question_id)
            .and_modify(|t| *t = t.min(answer.time_taken))
            .or_insert(answer.time_taken);
    }

    let mut best: Option<(&Question, f64)> = None;
    for question in questions {
        let Some(&time) = fastest.get(&question.id) else {
            continue;
        };
        if best.is_none_or(|(_, top)| time < top) {
            best = Some((question, time));
        }
    }

    match best {
        Some((question, time)) => (Some(question.clone()), time),
        None => (None, 0.0),
    }
}

/// The user ranked second by (correct answers desc, fastest answer asc).
///
/// Every user is ranked; one without answers has an infinite fastest time and
/// reports `0.0`. Returns `(None, 0.0)` with fewer than two users.
pub fn second_place(users: &[User], answers: &[UserAnswer]) -> (Option<User>, f64) {
    if users.len() < 2 {
        return (None, 0.0);
    }

    let tallies = tally_by_user(answers);
    let mut ranked: Vec<(&User, UserTally)> = users
        .iter()
        .map(|user| (user, tallies.get(&user.id).copied().unwrap_or_default()))
        .collect();

    // Stable, so equal pairs keep input order.
    ranked.sort_by(|(_, a), (_, b)| {
        b.correct
            .cmp(&a.correct)
            .then(a.fastest.total_cmp(&b.fastest))
    });

    let (user, tally) = ranked[1];
    let fastest = if tally.fastest.is_finite() {
        tally.fastest
    } else {
        0.0
    };
    (Some(user.clone()), fastest)
}

/// Mean answer time per question, over correct and incorrect answers.
pub fn average_time_per_question(questions: &[Question], answers: &[UserAnswer]) -> Vec<QuestionStat> {
    let mut times: HashMap<i64, Vec<f64>> = HashMap::new();
    for answer in answers {
        times.entry(answer.question_id).or_default().push(answer.time_taken);
    }

    questions
        .iter()
        .map(|q| QuestionStat {
            question_id: q.id,
            value: times.get(&q.id).map(|t| mean(t)).unwrap_or(0.0),
        })
        .collect()
}

/// Share of correct answers per question; `0.0` for unanswered questions.
pub fn success_rate_per_question(questions: &[Question], answers: &[UserAnswer]) -> Vec<QuestionStat> {
    // (correct, total)
    let mut counts: HashMap<i64, (usize, usize)> = HashMap::new();
    for answer in answers {
        let entry = counts.entry(answer.question_id).or_default();
        entry.1 += 1;
        if answer.is_correct {
            entry.0 += 1;
        }
    }

    questions
        .iter()
        .map(|q| {
            let value = match counts.get(&q.id) {
                Some(&(correct, total)) if total > 0 => correct as f64 / total as f64,
                _ => 0.0,
            };
            QuestionStat {
                question_id: q.id,
                value,
            }
        })
        .collect()
}

fn answered_question_ids(
    user_id: i64,
    answers: &[UserAnswer],
    known: &HashSet<i64>,
) -> HashSet<i64> {
    answers
        .iter()
        .filter(|a| a.user_id == user_id && known.contains(&a.question_id))
        .map(|a| a.question_id)
        .collect()
}

/// Users whose distinct answered questions cover every question.
pub fn users_who_answered_all(
    users: &[User],
    questions: &[Question],
    answers: &[UserAnswer],
) -> Vec<User> {
    let known: HashSet<i64> = questions.iter().map(|q| q.id).collect();

    users
        .iter()
        .filter(|user| answered_question_ids(user.id, answers, &known).len() == known.len())
        .cloned()
        .collect()
}

/// Median answer time of correct and of incorrect answers, `0.0` when a group is empty.
pub fn median_time_by_correctness(answers: &[UserAnswer]) -> (f64, f64) {
    let (correct, incorrect): (Vec<&UserAnswer>, Vec<&UserAnswer>) =
        answers.iter().partition(|a| a.is_correct);

    (
        median(correct.iter().map(|a| a.time_taken).collect()),
        median(incorrect.iter().map(|a| a.time_taken).collect()),
    )
}

/// One summary per user, in the order of `users`.
///
/// Answers to questions missing from `questions` are left out so that
/// `answered_questions + unanswered_questions == total_questions` holds.
pub fn user_reports(users: &[User], questions: &[Question], answers: &[UserAnswer]) -> Vec<UserReport> {
    let known: HashSet<i64> = questions.iter().map(|q| q.id).collect();
    let total_questions = known.len();

    let mut by_user: HashMap<i64, Vec<&UserAnswer>> = HashMap::new();
    for answer in answers.iter().filter(|a| known.contains(&a.question_id)) {
        by_user.entry(answer.user_id).or_default().push(answer);
    }

    users
        .iter()
        .map(|user| {
            let own = by_user.get(&user.id).map(Vec::as_slice).unwrap_or_default();
            let answered_questions = own
                .iter()
                .map(|a| a.question_id)
                .collect::<HashSet<_>>()
                .len();
            let times: Vec<f64> = own.iter().map(|a| a.time_taken).collect();

            UserReport {
                user_id: user.id,
                name: user.full_name(),
                total_questions,
                answered_questions,
                correct_answers: own.iter().filter(|a| a.is_correct).count(),
                avg_time: mean(&times),
                fastest_answer: times.iter().copied().reduce(f64::min).unwrap_or(0.0),
                slowest_answer: times.iter().copied().reduce(f64::max).unwrap_or(0.0),
                unanswered_questions: total_questions - answered_questions,
            }
        })
        .collect()
}

/// Runs every reducer over the same snapshot.
pub fn summarize(users: &[User], questions: &[Question], answers: &[UserAnswer]) -> AnalyticsSummary {
    let (top_user, top_correct) = top_scorer(users, answers);
    let (fastest, fastest_seconds) = fastest_question(questions, answers);
    let (second, second_seconds) = second_place(users, answers);
    let (correct_median, incorrect_median) = median_time_by_correctness(answers);

    AnalyticsSummary {
        top_scorer: UserScore {
            user: top_user,
            correct_answers: top_correct,
        },
        fastest_question: QuestionTime {
            question: fastest,
            seconds: fastest_seconds,
        },
        second_place: UserTime {
            user: second,
            seconds: second_seconds,
        },
        average_time_per_question: average_time_per_question(questions, answers),
        success_rate_per_question: success_rate_per_question(questions, answers),
        users_who_answered_all: users_who_answered_all(users, questions, answers),
        median_time: MedianTimes {
            correct: correct_median,
            incorrect: incorrect_median,
        },
        user_reports: user_reports(users, questions, answers),
    }
}
