//! Line-oriented persistence for the teacher/exam/question/student graph.
//!
//! Every repeated block is preceded by its record count on a line of its own:
//!
//! ```text
//! <teacher count>
//!   name / id / password
//!   <course count>   course...
//!   <exam count>
//!     code
//!     <question count>   question...
//! <student count>
//!   name / id / password / major
//!   <registration count>   exam code...
//! ```
//!
//! Questions start with their type tag. `MCQ`: text, positive mark, negative
//! mark, four options, correct index. `SA`: text, positive mark, negative
//! mark, answer. `DESC`: text, positive mark, reference answer.
//!
//! Per-presentation state (MCQ shuffle, captured descriptive answers) is not
//! written.

use std::fmt::Write as _;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::directory::Roster;
use crate::error::CodecError;
use crate::model::{
    Descriptive, Exam, MultipleChoice, Question, QuestionKind, QuestionType, ShortAnswer, Student,
    Teacher, OPTION_COUNT,
};

/// A recoverable problem found while decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeWarning {
    /// 1-based line number.
    pub line: usize,
    pub message: String,
}

/// A decoded roster plus everything that was skipped on the way.
#[derive(Debug, Clone, Default)]
pub struct Decoded {
    pub roster: Roster,
    pub warnings: Vec<DecodeWarning>,
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Serialize the whole roster.
pub fn encode(roster: &Roster) -> String {
    let mut out = String::new();

    push_line(&mut out, roster.teachers.len());
    for teacher in &roster.teachers {
        push_line(&mut out, &teacher.name);
        push_line(&mut out, &teacher.id);
        push_line(&mut out, &teacher.password);
        push_line(&mut out, teacher.courses.len());
        for course in &teacher.courses {
            push_line(&mut out, course);
        }
        push_line(&mut out, teacher.exams.len());
        for exam in &teacher.exams {
            push_line(&mut out, &exam.code);
            push_line(&mut out, exam.questions.len());
            for question in &exam.questions {
                encode_question(question, &mut out);
            }
        }
    }

    push_line(&mut out, roster.students.len());
    for student in &roster.students {
        push_line(&mut out, &student.name);
        push_line(&mut out, &student.id);
        push_line(&mut out, &student.password);
        push_line(&mut out, &student.major);
        push_line(&mut out, student.registered_exams.len());
        for code in &student.registered_exams {
            push_line(&mut out, code);
        }
    }

    out
}

/// Append one question record, type tag first.
pub fn encode_question(question: &Question, out: &mut String) {
    push_line(out, question.question_type().tag());
    push_line(out, &question.text);
    push_line(out, question.positive_mark);
    match &question.kind {
        QuestionKind::MultipleChoice(mcq) => {
            push_line(out, question.negative_mark);
            for option in &mcq.options {
                push_line(out, option);
            }
            push_line(out, mcq.correct_index);
        }
        QuestionKind::ShortAnswer(sa) => {
            push_line(out, question.negative_mark);
            push_line(out, &sa.correct_answer);
        }
        QuestionKind::Descriptive(desc) => {
            push_line(out, &desc.reference_answer);
        }
    }
}

fn push_line(out: &mut String, value: impl std::fmt::Display) {
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{value}");
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

struct LineReader<'a> {
    lines: std::str::Lines<'a>,
    line_no: usize,
}

impl<'a> LineReader<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            lines: content.lines(),
            line_no: 0,
        }
    }

    fn next_line(&mut self, expected: &'static str) -> Result<&'a str, CodecError> {
        match self.lines.next() {
            Some(line) => {
                self.line_no += 1;
                Ok(line)
            }
            None => Err(CodecError::UnexpectedEof {
                line: self.line_no + 1,
                expected,
            }),
        }
    }

    fn next_string(&mut self, expected: &'static str) -> Result<String, CodecError> {
        self.next_line(expected).map(str::to_string)
    }

    fn next_number<T: FromStr>(&mut self, field: &'static str) -> Result<T, CodecError> {
        let raw = self.next_line(field)?;
        raw.trim().parse().map_err(|_| CodecError::InvalidNumber {
            line: self.line_no,
            field,
            value: raw.to_string(),
        })
    }
}

/// Deserialize a roster. Unknown question tags are skipped and reported.
pub fn decode(content: &str) -> Result<Decoded, CodecError> {
    let mut reader = LineReader::new(content);
    let mut warnings = Vec::new();
    let mut roster = Roster::new();

    if content.trim().is_empty() {
        return Ok(Decoded { roster, warnings });
    }

    let teacher_count: usize = reader.next_number("teacher count")?;
    for _ in 0..teacher_count {
        let name = reader.next_string("teacher name")?;
        let id = reader.next_string("teacher id")?;
        let password = reader.next_string("teacher password")?;

        let course_count: usize = reader.next_number("course count")?;
        let courses = (0..course_count)
            .map(|_| reader.next_string("course name"))
            .collect::<Result<Vec<_>, _>>()?;

        let exam_count: usize = reader.next_number("exam count")?;
        let mut exams = Vec::new();
        for _ in 0..exam_count {
            let code = reader.next_string("exam code")?;
            let question_count: usize = reader.next_number("question count")?;
            let mut questions = Vec::new();
            for _ in 0..question_count {
                if let Some(q) = decode_question(&mut reader, &mut warnings)? {
                    questions.push(q);
                }
            }
            exams.push(Exam { code, questions });
        }

        roster.teachers.push(Teacher {
            name,
            id,
            password,
            courses,
            exams,
        });
    }

    let student_count: usize = reader.next_number("student count")?;
    for _ in 0..student_count {
        let name = reader.next_string("student name")?;
        let id = reader.next_string("student id")?;
        let password = reader.next_string("student password")?;
        let major = reader.next_string("student major")?;
        let registration_count: usize = reader.next_number("registration count")?;
        let registered_exams = (0..registration_count)
            .map(|_| reader.next_string("registered exam code"))
            .collect::<Result<Vec<_>, _>>()?;
        roster.students.push(Student {
            name,
            id,
            password,
            major,
            registered_exams,
        });
    }

    tracing::debug!(
        teachers = roster.teachers.len(),
        students = roster.students.len(),
        warnings = warnings.len(),
        "decoded roster"
    );

    Ok(Decoded { roster, warnings })
}

/// Read one question record. An unknown tag consumes only its own line.
fn decode_question(
    reader: &mut LineReader<'_>,
    warnings: &mut Vec<DecodeWarning>,
) -> Result<Option<Question>, CodecError> {
    let tag = reader.next_line("question type")?;
    let Ok(question_type) = tag.trim().parse::<QuestionType>() else {
        let warning = DecodeWarning {
            line: reader.line_no,
            message: format!("skipping question with unknown type {tag:?}"),
        };
        tracing::warn!(line = warning.line, "{}", warning.message);
        warnings.push(warning);
        return Ok(None);
    };

    let text = reader.next_string("question text")?;
    let positive_mark: f64 = reader.next_number("positive mark")?;

    let question = match question_type {
        QuestionType::MultipleChoice => {
            let negative_mark: f64 = reader.next_number("negative mark")?;
            let mut options: [String; OPTION_COUNT] = Default::default();
            for option in &mut options {
                *option = reader.next_string("option")?;
            }
            let correct_index: usize = reader.next_number("correct option index")?;
            if correct_index >= OPTION_COUNT {
                let warning = DecodeWarning {
                    line: reader.line_no,
                    message: format!("correct option index {correct_index} out of range"),
                };
                tracing::warn!(line = warning.line, "{}", warning.message);
                warnings.push(warning);
            }
            Question {
                text,
                positive_mark,
                negative_mark,
                kind: QuestionKind::MultipleChoice(MultipleChoice {
                    options,
                    correct_index,
                    shuffle: None,
                }),
            }
        }
        QuestionType::ShortAnswer => {
            let negative_mark: f64 = reader.next_number("negative mark")?;
            let correct_answer = reader.next_string("correct answer")?;
            Question {
                text,
                positive_mark,
                negative_mark,
                kind: QuestionKind::ShortAnswer(ShortAnswer { correct_answer }),
            }
        }
        QuestionType::Descriptive => {
            let reference_answer = reader.next_string("reference answer")?;
            Question {
                text,
                positive_mark,
                negative_mark: 0.0,
                kind: QuestionKind::Descriptive(Descriptive {
                    reference_answer,
                    student_answer: None,
                }),
            }
        }
    };

    Ok(Some(question))
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// Write the roster to `path`, replacing any previous contents.
pub fn save(roster: &Roster, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, encode(roster))
        .with_context(|| format!("failed to write data to {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("failed to replace {}", path.display()))?;
    tracing::info!(path = %path.display(), "saved data");
    Ok(())
}

/// Load the roster from `path`. A missing file yields an empty roster.
pub fn load(path: &Path) -> Result<Decoded> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "no saved data found");
        return Ok(Decoded::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read data from {}", path.display()))?;
    decode(&content).with_context(|| format!("corrupt data file {}", path.display()))
}
