// src/services/quiz_session.rs

use chrono::{DateTime, Utc};
use rand::{Rng, seq::SliceRandom};

use crate::{
    error::AppError,
    models::{question::Question, user::User, user_answer::NewUserAnswer},
    repository::AnswerStore,
};

/// Blocking source of the player's 1-based answer number.
///
/// `read_selection` is called directly from `QuizSession::ask_question` and
/// blocks the thread it runs on. Drive a terminal session from a
/// `current_thread` runtime (as the `quiz` binary does), not from a shared
/// multi-threaded server runtime.
pub trait SelectionReader {
    fn read_selection(&mut self) -> Result<usize, AppError>;
}

/// Where the session shows questions and verdicts.
pub trait QuizOutput {
    fn show_question(&mut self, number: usize, question: &Question, candidates: &[String]) -> std::io::Result<()>;

    fn show_verdict(&mut self, is_correct: bool, correct_answer: &str) -> std::io::Result<()>;
}

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Result of one answered question.
#[derive(Debug, Clone, PartialEq)]
pub struct AnsweredTurn {
    pub user_answer_id: i64,
    pub answer: NewUserAnswer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub correct_count: usize,
    pub total_questions: usize,
}

/// Maps a 1-based selection onto the presented candidates.
pub fn resolve_selection(candidates: &[String], selected: usize) -> Result<&str, AppError> {
    selected
        .checked_sub(1)
        .and_then(|idx| candidates.get(idx))
        .map(String::as_str)
        .ok_or(AppError::InvalidSelection {
            selected,
            available: candidates.len(),
        })
}

fn output_error(err: std::io::Error) -> AppError {
    AppError::InternalServerError(format!("Failed to write quiz output: {}", err))
}

/// One player's run through a list of questions.
///
/// Holds everything the run needs, so nothing about the current game lives in
/// global state. Questions are asked strictly in the given order.
pub struct QuizSession<'a, S: ?Sized, R> {
    store: &'a S,
    user: &'a User,
    input: &'a mut dyn SelectionReader,
    output: &'a mut dyn QuizOutput,
    clock: &'a dyn Clock,
    rng: R,
    asked: usize,
    correct_count: usize,
}

impl<'a, S, R> QuizSession<'a, S, R>
where
    S: AnswerStore + ?Sized,
    R: Rng,
{
    pub fn new(
        store: &'a S,
        user: &'a User,
        input: &'a mut dyn SelectionReader,
        output: &'a mut dyn QuizOutput,
        clock: &'a dyn Clock,
        rng: R,
    ) -> Self {
        Self {
            store,
            user,
            input,
            output,
            clock,
            rng,
            asked: 0,
            correct_count: 0,
        }
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    /// Asks one question and records the answer.
    ///
    /// An out-of-range selection or a store failure ends the turn with an
    /// error; nothing is recorded and the running count is untouched. Once the
    /// answer is stored the count is updated, even if the verdict cannot be
    /// shown.
    pub async fn ask_question(&mut self, question: &Question) -> Result<AnsweredTurn, AppError> {
        let mut candidates = vec![question.correct_answer.clone()];
        candidates.extend(
            self.store
                .incorrect_answers(question.id)
                .await?
                .into_iter()
                .map(|a| a.incorrect_answer),
        );
        candidates.shuffle(&mut self.rng);

        self.output
            .show_question(self.asked + 1, question, &candidates)
            .map_err(output_error)?;

        let start = self.clock.now();
        let selected = self.input.read_selection()?;
        let end = self.clock.now();

        let micros = (end - start).num_microseconds().unwrap_or(i64::MAX);
        let time_taken = (micros as f64 / 1_000_000.0).max(0.0);

        let answer_text = resolve_selection(&candidates, selected)?.to_string();
        let is_correct = answer_text == question.correct_answer;

        let answer = NewUserAnswer {
            user_id: self.user.id,
            question_id: question.id,
            answer_text,
            is_correct,
            time_taken,
        };
        let user_answer_id = self.store.record_answer(&answer).await?;

        self.asked += 1;
        if is_correct {
            self.correct_count += 1;
        }

        tracing::info!(
            user_id = self.user.id,
            question_id = question.id,
            user_answer_id,
            is_correct,
            time_taken,
            "Recorded answer"
        );

        // The answer is stored; a failed display must not undo the tally.
        if let Err(e) = self.output.show_verdict(is_correct, &question.correct_answer) {
            tracing::warn!("Failed to show verdict: {}", e);
        }

        Ok(AnsweredTurn {
            user_answer_id,
            answer,
        })
    }

    /// Asks every question in order and returns the final tally.
    pub async fn run(mut self, questions: &[Question]) -> Result<SessionSummary, AppError> {
        for question in questions {
            self.ask_question(question).await?;
        }

        let summary = SessionSummary {
            correct_count: self.correct_count,
            total_questions: questions.len(),
        };
        tracing::info!(
            user_id = self.user.id,
            correct = summary.correct_count,
            total = summary.total_questions,
            "Quiz session finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::Cell,
        collections::{HashMap, VecDeque},
        sync::Mutex,
    };

    use async_trait::async_trait;
    use chrono::TimeDelta;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::models::question::IncorrectAnswer;

    #[derive(Default)]
    struct FakeStore {
        incorrect: HashMap<i64, Vec<String>>,
        recorded: Mutex<Vec<NewUserAnswer>>,
        fail_writes: bool,
    }

    #[async_trait]
    impl AnswerStore for FakeStore {
        async fn incorrect_answers(&self, question_id: i64) -> Result<Vec<IncorrectAnswer>, AppError> {
            Ok(self
                .incorrect
                .get(&question_id)
                .into_iter()
                .flatten()
                .enumerate()
                .map(|(i, text)| IncorrectAnswer {
                    id: i as i64 + 1,
                    question_id,
                    incorrect_answer: text.clone(),
                })
                .collect())
        }

        async fn record_answer(&self, answer: &NewUserAnswer) -> Result<i64, AppError> {
            if self.fail_writes {
                return Err(AppError::Database("connection reset".to_string()));
            }
            let mut recorded = self.recorded.lock().unwrap();
            recorded.push(answer.clone());
            Ok(recorded.len() as i64)
        }
    }

    struct ScriptedReader(VecDeque<usize>);

    impl SelectionReader for ScriptedReader {
        fn read_selection(&mut self) -> Result<usize, AppError> {
            self.0
                .pop_front()
                .ok_or(AppError::BadRequest("no more input".to_string()))
        }
    }

    #[derive(Default)]
    struct RecordingOutput {
        shown: Vec<Vec<String>>,
        verdicts: Vec<bool>,
        fail_verdicts: bool,
    }

    impl QuizOutput for RecordingOutput {
        fn show_question(&mut self, _number: usize, _question: &Question, candidates: &[String]) -> std::io::Result<()> {
            self.shown.push(candidates.to_vec());
            Ok(())
        }

        fn show_verdict(&mut self, is_correct: bool, _correct_answer: &str) -> std::io::Result<()> {
            if self.fail_verdicts {
                return Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed"));
            }
            self.verdicts.push(is_correct);
            Ok(())
        }
    }

    /// Advances by `step` on every reading.
    struct SteppingClock {
        current: Cell<DateTime<Utc>>,
        step: TimeDelta,
    }

    impl SteppingClock {
        fn new(step_millis: i64) -> Self {
            Self {
                current: Cell::new(Utc::now()),
                step: TimeDelta::milliseconds(step_millis),
            }
        }
    }

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            let now = self.current.get();
            self.current.set(now + self.step);
            now
        }
    }

    fn paris() -> Question {
        Question {
            id: 1,
            question_text: "What is the capital of France?".to_string(),
            correct_answer: "Paris".to_string(),
        }
    }

    fn player() -> User {
        User {
            id: 42,
            first: "Ann".to_string(),
            last: "Tester".to_string(),
            email: "ann@example.com".to_string(),
        }
    }

    fn store_with_paris() -> FakeStore {
        let mut store = FakeStore::default();
        store.incorrect.insert(
            1,
            vec!["London".to_string(), "Berlin".to_string(), "Rome".to_string()],
        );
        store
    }

    fn expected_order(seed: u64) -> Vec<String> {
        let mut candidates: Vec<String> = ["Paris", "London", "Berlin", "Rome"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        candidates.shuffle(&mut StdRng::seed_from_u64(seed));
        candidates
    }

    #[test]
    fn test_resolve_selection_bounds() {
        let candidates = vec!["A".to_string(), "B".to_string()];
        assert_eq!(resolve_selection(&candidates, 2).unwrap(), "B");
        assert!(matches!(
            resolve_selection(&candidates, 0),
            Err(AppError::InvalidSelection { selected: 0, available: 2 })
        ));
        assert!(matches!(
            resolve_selection(&candidates, 3),
            Err(AppError::InvalidSelection { selected: 3, available: 2 })
        ));
    }

    #[tokio::test]
    async fn test_correct_selection_is_recorded() {
        let store = store_with_paris();
        let user = player();
        let position = expected_order(7).iter().position(|c| c == "Paris").unwrap();
        let mut input = ScriptedReader(VecDeque::from([position + 1]));
        let mut output = RecordingOutput::default();
        let clock = SteppingClock::new(1500);

        let mut session = QuizSession::new(
            &store,
            &user,
            &mut input,
            &mut output,
            &clock,
            StdRng::seed_from_u64(7),
        );
        let turn = session.ask_question(&paris()).await.unwrap();
        assert_eq!(session.correct_count(), 1);

        assert!(turn.answer.is_correct);
        assert_eq!(turn.answer.answer_text, "Paris");
        assert_eq!(turn.answer.user_id, 42);
        assert_eq!(turn.answer.time_taken, 1.5);
        assert_eq!(turn.user_answer_id, 1);

        let recorded = store.recorded.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].answer_text, "Paris");

        let mut shown = output.shown[0].clone();
        shown.sort();
        assert_eq!(shown, vec!["Berlin", "London", "Paris", "Rome"]);
        assert_eq!(output.verdicts, vec![true]);
    }

    #[tokio::test]
    async fn test_wrong_selection_is_recorded_as_incorrect() {
        let store = store_with_paris();
        let user = player();
        let position = expected_order(3).iter().position(|c| c == "Rome").unwrap();
        let mut input = ScriptedReader(VecDeque::from([position + 1]));
        let mut output = RecordingOutput::default();
        let clock = SteppingClock::new(250);

        let summary = QuizSession::new(
            &store,
            &user,
            &mut input,
            &mut output,
            &clock,
            StdRng::seed_from_u64(3),
        )
        .run(&[paris()])
        .await
        .unwrap();

        assert_eq!(
            summary,
            SessionSummary {
                correct_count: 0,
                total_questions: 1
            }
        );
        let recorded = store.recorded.lock().unwrap();
        assert_eq!(recorded[0].answer_text, "Rome");
        assert!(!recorded[0].is_correct);
        assert_eq!(output.verdicts, vec![false]);
    }

    #[tokio::test]
    async fn test_out_of_range_selection_records_nothing() {
        let store = store_with_paris();
        let user = player();
        let mut input = ScriptedReader(VecDeque::from([5]));
        let mut output = RecordingOutput::default();
        let clock = SystemClock;

        let result = QuizSession::new(
            &store,
            &user,
            &mut input,
            &mut output,
            &clock,
            StdRng::seed_from_u64(1),
        )
        .run(&[paris()])
        .await;

        assert!(matches!(
            result,
            Err(AppError::InvalidSelection { selected: 5, available: 4 })
        ));
        assert!(store.recorded.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let store = FakeStore {
            fail_writes: true,
            ..store_with_paris()
        };
        let user = player();
        let mut input = ScriptedReader(VecDeque::from([1]));
        let mut output = RecordingOutput::default();
        let clock = SystemClock;

        let mut session = QuizSession::new(
            &store,
            &user,
            &mut input,
            &mut output,
            &clock,
            StdRng::seed_from_u64(1),
        );
        let result = session.ask_question(&paris()).await;

        assert!(matches!(result, Err(AppError::Database(_))));
        assert_eq!(session.correct_count(), 0);
        assert!(output.verdicts.is_empty());
    }

    #[tokio::test]
    async fn test_session_asks_every_question_in_order() {
        let store = FakeStore::default();
        let user = player();
        let questions: Vec<Question> = (1..=3)
            .map(|id| Question {
                id,
                question_text: format!("Question {}", id),
                correct_answer: format!("Answer {}", id),
            })
            .collect();
        // No incorrect answers: the only candidate is always number 1.
        let mut input = ScriptedReader(VecDeque::from([1, 1, 1]));
        let mut output = RecordingOutput::default();
        let clock = SteppingClock::new(100);

        let summary = QuizSession::new(
            &store,
            &user,
            &mut input,
            &mut output,
            &clock,
            StdRng::seed_from_u64(9),
        )
        .run(&questions)
        .await
        .unwrap();

        assert_eq!(summary.correct_count, 3);
        assert_eq!(summary.total_questions, 3);
        let ids: Vec<i64> = store
            .recorded
            .lock()
            .unwrap()
            .iter()
            .map(|a| a.question_id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_verdict_display_failure_keeps_stored_answer_counted() {
        let store = store_with_paris();
        let user = player();
        let position = expected_order(7).iter().position(|c| c == "Paris").unwrap();
        let mut input = ScriptedReader(VecDeque::from([position + 1]));
        let mut output = RecordingOutput {
            fail_verdicts: true,
            ..RecordingOutput::default()
        };
        let clock = SteppingClock::new(100);

        let summary = QuizSession::new(
            &store,
            &user,
            &mut input,
            &mut output,
            &clock,
            StdRng::seed_from_u64(7),
        )
        .run(&[paris()])
        .await
        .unwrap();

        let recorded = store.recorded.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert!(recorded[0].is_correct);
        assert_eq!(summary.correct_count, 1);
        assert_eq!(summary.total_questions, 1);
    }
}
