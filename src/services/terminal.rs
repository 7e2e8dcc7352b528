// src/services/terminal.rs
//
// Line-based adapters that let a quiz session run over stdin/stdout.

use std::io::{BufRead, Write};

use crate::{
    error::AppError,
    models::question::Question,
    services::quiz_session::{QuizOutput, SelectionReader},
};

/// Reads one number per line.
pub struct LineSelectionReader<R> {
    reader: R,
}

impl<R: BufRead> LineSelectionReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> SelectionReader for LineSelectionReader<R> {
    fn read_selection(&mut self) -> Result<usize, AppError> {
        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;

        if read == 0 {
            return Err(AppError::BadRequest("Input closed before an answer was given".to_string()));
        }

        line.trim()
            .parse::<usize>()
            .map_err(|_| AppError::BadRequest(format!("'{}' is not an answer number", line.trim())))
    }
}

/// Prints questions as a numbered list.
pub struct ConsoleOutput<W> {
    writer: W,
}

impl<W: Write> ConsoleOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> QuizOutput for ConsoleOutput<W> {
    fn show_question(&mut self, number: usize, question: &Question, candidates: &[String]) -> std::io::Result<()> {
        writeln!(self.writer, "\nQuestion {}: {}", number, question.question_text)?;
        for (idx, candidate) in candidates.iter().enumerate() {
            writeln!(self.writer, "{}. {}", idx + 1, candidate)?;
        }
        write!(self.writer, "\nYour answer (enter the number): ")?;
        self.writer.flush()
    }

    fn show_verdict(&mut self, is_correct: bool, correct_answer: &str) -> std::io::Result<()> {
        if is_correct {
            writeln!(self.writer, "Correct!")
        } else {
            writeln!(self.writer, "Wrong! The correct answer was: {}", correct_answer)
        }
    }
}
