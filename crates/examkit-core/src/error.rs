//! Error types for the examkit core.
//!
//! Conditions that are outcomes rather than failures (an exam nobody has
//! taken yet, a student who has not participated) are not errors here; see
//! the outcome enums in [`crate::report`].

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while authoring, registering, or persisting exam data.
#[derive(Debug, Error)]
pub enum ExamError {
    /// No exam with this code exists in the roster.
    #[error("exam not found: {0}")]
    ExamNotFound(String),

    /// No student with this id exists in the roster.
    #[error("student not found: {0}")]
    StudentNotFound(String),

    /// No teacher with this id exists in the roster.
    #[error("teacher not found: {0}")]
    TeacherNotFound(String),

    /// Another exam already uses this code.
    #[error("exam code already in use: {0}")]
    DuplicateExamCode(String),

    /// Another teacher or student already uses this id.
    #[error("id already in use: {0}")]
    DuplicateId(String),

    /// Short answers must be a single word or number.
    #[error("short answer must be a single word or number, got {0:?}")]
    AnswerHasWhitespace(String),

    /// The correct option of a multiple-choice question must be one of the four options.
    #[error("correct option index {0} out of range (expected 0..4)")]
    CorrectIndexOutOfRange(usize),

    /// A field stored as one line of the data file contains a line break.
    #[error("{field} must fit on a single line")]
    MultiLineField { field: &'static str },

    /// Ids and exam codes are fields of the comma-separated result log.
    #[error("{field} must not contain a comma, got {value:?}")]
    CommaInField { field: &'static str, value: String },

    /// A file could not be opened, read, or written.
    #[error("I/O failure on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Structural errors in the persisted object graph.
///
/// Unknown question tags are not errors; the decoder skips them and reports a
/// [`crate::codec::DecodeWarning`] instead.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The data ended before a length-prefixed block was fully read.
    #[error("unexpected end of data at line {line}, expected {expected}")]
    UnexpectedEof { line: usize, expected: &'static str },

    /// A count or mark line did not hold a number.
    #[error("line {line}: invalid {field} {value:?}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },
}

impl CodecError {
    /// The 1-based line number the error was detected on.
    pub fn line(&self) -> usize {
        match self {
            CodecError::UnexpectedEof { line, .. } | CodecError::InvalidNumber { line, .. } => *line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(
            ExamError::ExamNotFound("EX9".into()).to_string(),
            "exam not found: EX9"
        );
        assert_eq!(
            ExamError::AnswerHasWhitespace("forty two".into()).to_string(),
            "short answer must be a single word or number, got \"forty two\""
        );
        let err = CodecError::InvalidNumber {
            line: 4,
            field: "question count",
            value: "x".into(),
        };
        assert_eq!(err.to_string(), "line 4: invalid question count \"x\"");
        assert_eq!(err.line(), 4);
    }

    #[test]
    fn io_message_leaves_cause_to_source_chain() {
        let err = ExamError::Io {
            path: PathBuf::from("logs/grades_db.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.to_string(), "I/O failure on logs/grades_db.csv");
        let chained = format!("{:#}", anyhow::Error::from(err));
        assert_eq!(chained.matches("gone").count(), 1);
    }
}
