//! Core data model types for examkit.
//!
//! A [`Question`] is a closed sum over the three supported variants. Exams are
//! ordered question lists owned by the teacher that authored them.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::ExamError;

/// Every multiple-choice question has exactly this many options.
pub const OPTION_COUNT: usize = 4;

/// One assessable item.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    /// Prompt shown to the student.
    pub text: String,
    /// Points awarded for a correct answer.
    pub positive_mark: f64,
    /// Points deducted for an incorrect answer. Always zero for descriptive questions.
    pub negative_mark: f64,
    /// Variant-specific data.
    pub kind: QuestionKind,
}

/// The closed set of question variants.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionKind {
    MultipleChoice(MultipleChoice),
    ShortAnswer(ShortAnswer),
    Descriptive(Descriptive),
}

/// Four options, one of which is correct.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipleChoice {
    /// Options in authoring order.
    pub options: [String; OPTION_COUNT],
    /// 0-based index into `options`.
    pub correct_index: usize,
    /// Display order of the most recent presentation. Not persisted.
    pub(crate) shuffle: Option<Shuffle>,
}

/// A single-word answer compared exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortAnswer {
    pub correct_answer: String,
}

/// A free-text answer left for a human grader.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptive {
    /// Suggested answer shown to the grader; never compared automatically.
    pub reference_answer: String,
    /// Answer captured by the most recent grading call. Not persisted.
    pub student_answer: Option<String>,
}

/// Discriminator written before each question in the data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionType {
    MultipleChoice,
    ShortAnswer,
    Descriptive,
}

impl QuestionType {
    /// The tag used in the persisted data file.
    pub fn tag(self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "MCQ",
            QuestionType::ShortAnswer => "SA",
            QuestionType::Descriptive => "DESC",
        }
    }

    /// Human-readable label used in transcripts and listings.
    pub fn label(self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple choice",
            QuestionType::ShortAnswer => "short answer",
            QuestionType::Descriptive => "descriptive",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MCQ" => Ok(QuestionType::MultipleChoice),
            "SA" => Ok(QuestionType::ShortAnswer),
            "DESC" => Ok(QuestionType::Descriptive),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// A permutation of the option indices: position `i` is displayed as option
/// `i + 1` and holds the original index `order[i]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shuffle([usize; OPTION_COUNT]);

impl Shuffle {
    /// Build a shuffle from an explicit display order. Returns `None` unless
    /// `order` is a permutation of `0..OPTION_COUNT`.
    pub fn new(order: [usize; OPTION_COUNT]) -> Option<Self> {
        let mut seen = [false; OPTION_COUNT];
        for &idx in &order {
            if idx >= OPTION_COUNT || seen[idx] {
                return None;
            }
            seen[idx] = true;
        }
        Some(Self(order))
    }

    /// Options displayed in authoring order.
    pub fn identity() -> Self {
        Self([0, 1, 2, 3])
    }

    /// A uniformly random display order.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut order = [0, 1, 2, 3];
        order.shuffle(rng);
        Self(order)
    }

    /// The original option index shown at 0-based display position `displayed`.
    pub fn original_index(&self, displayed: usize) -> usize {
        self.0[displayed]
    }

    /// The display order as original option indices.
    pub fn order(&self) -> [usize; OPTION_COUNT] {
        self.0
    }
}

pub(crate) fn single_line(field: &'static str, value: &str) -> Result<(), ExamError> {
    if value.contains('\n') || value.contains('\r') {
        return Err(ExamError::MultiLineField { field });
    }
    Ok(())
}

/// Reject values that would split a result-log line.
pub(crate) fn no_comma(field: &'static str, value: &str) -> Result<(), ExamError> {
    if value.contains(',') {
        return Err(ExamError::CommaInField {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

impl Question {
    /// Author a multiple-choice question. `correct_index` is 0-based.
    pub fn multiple_choice(
        text: impl Into<String>,
        positive_mark: f64,
        negative_mark: f64,
        options: [String; OPTION_COUNT],
        correct_index: usize,
    ) -> Result<Self, ExamError> {
        let text = text.into();
        single_line("question text", &text)?;
        for option in &options {
            single_line("option", option)?;
        }
        if correct_index >= OPTION_COUNT {
            return Err(ExamError::CorrectIndexOutOfRange(correct_index));
        }
        Ok(Self {
            text,
            positive_mark,
            negative_mark,
            kind: QuestionKind::MultipleChoice(MultipleChoice {
                options,
                correct_index,
                shuffle: None,
            }),
        })
    }

    /// Author a short-answer question. The answer must be a single word or number.
    pub fn short_answer(
        text: impl Into<String>,
        positive_mark: f64,
        negative_mark: f64,
        correct_answer: impl Into<String>,
    ) -> Result<Self, ExamError> {
        let text = text.into();
        let correct_answer = correct_answer.into();
        single_line("question text", &text)?;
        if correct_answer.chars().any(char::is_whitespace) {
            return Err(ExamError::AnswerHasWhitespace(correct_answer));
        }
        Ok(Self {
            text,
            positive_mark,
            negative_mark,
            kind: QuestionKind::ShortAnswer(ShortAnswer { correct_answer }),
        })
    }

    /// Author a descriptive question. Descriptive questions carry no penalty.
    pub fn descriptive(
        text: impl Into<String>,
        positive_mark: f64,
        reference_answer: impl Into<String>,
    ) -> Result<Self, ExamError> {
        let text = text.into();
        let reference_answer = reference_answer.into();
        single_line("question text", &text)?;
        single_line("reference answer", &reference_answer)?;
        Ok(Self {
            text,
            positive_mark,
            negative_mark: 0.0,
            kind: QuestionKind::Descriptive(Descriptive {
                reference_answer,
                student_answer: None,
            }),
        })
    }

    pub fn question_type(&self) -> QuestionType {
        match self.kind {
            QuestionKind::MultipleChoice(_) => QuestionType::MultipleChoice,
            QuestionKind::ShortAnswer(_) => QuestionType::ShortAnswer,
            QuestionKind::Descriptive(_) => QuestionType::Descriptive,
        }
    }

    /// Clear per-presentation state (MCQ shuffle, captured descriptive answer).
    pub fn reset_presentation(&mut self) {
        match &mut self.kind {
            QuestionKind::MultipleChoice(mcq) => mcq.shuffle = None,
            QuestionKind::Descriptive(desc) => desc.student_answer = None,
            QuestionKind::ShortAnswer(_) => {}
        }
    }
}

impl MultipleChoice {
    /// The display order used by the most recent presentation, if any.
    pub fn shuffle(&self) -> Option<Shuffle> {
        self.shuffle
    }

    /// Text of the correct option. Empty if a decoded index is out of range.
    pub fn correct_option(&self) -> &str {
        self.options
            .get(self.correct_index)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// An ordered sequence of questions identified by a unique code.
#[derive(Debug, Clone, PartialEq)]
pub struct Exam {
    pub code: String,
    pub questions: Vec<Question>,
}

impl Exam {
    pub fn new(code: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            code: code.into(),
            questions,
        }
    }
}

/// An exam author. Owns the exams it created.
#[derive(Debug, Clone, PartialEq)]
pub struct Teacher {
    pub name: String,
    pub id: String,
    pub password: String,
    pub courses: Vec<String>,
    pub exams: Vec<Exam>,
}

/// An exam taker.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub name: String,
    pub id: String,
    pub password: String,
    pub major: String,
    /// Codes of exams this student registered for, in registration order.
    pub registered_exams: Vec<String>,
}
