//! Per-student answer transcripts and the descriptive-answer review log.
//!
//! A transcript is written once per exam session and later copied verbatim
//! into the student's report. It is keyed by (student id, exam code).

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::grading::{Assessment, Response, Verdict};
use crate::model::{Question, QuestionKind};

/// Separator written after each entry of the descriptive review log.
pub const REVIEW_SEPARATOR: &str = "--------------------------";

/// Pre-formatted lines describing each answer of one session.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub student_id: String,
    pub exam_code: String,
    pub lines: Vec<String>,
}

impl Transcript {
    pub fn new(student_id: impl Into<String>, exam_code: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            exam_code: exam_code.into(),
            lines: Vec::new(),
        }
    }

    /// Describe one graded answer. `number` is 1-based.
    pub fn push_answer(&mut self, number: usize, question: &Question, assessment: &Assessment) {
        self.lines.push(format!("Question {number}: {}", question.text));
        self.lines
            .push(format!("Type: {}", question.question_type().label()));

        match &question.kind {
            QuestionKind::MultipleChoice(mcq) => {
                let given = match &assessment.response {
                    Response::Choice(idx) => mcq.options[*idx].clone(),
                    Response::InvalidChoice(raw) => format!("invalid choice {raw:?}"),
                    Response::Text(raw) => raw.clone(),
                };
                self.lines
                    .push(format!("Correct answer: {}", mcq.correct_option()));
                self.lines.push(format!("Your answer: {given}"));
                self.lines.push(status_line(assessment.verdict));
            }
            QuestionKind::ShortAnswer(sa) => {
                self.lines
                    .push(format!("Correct answer: {}", sa.correct_answer));
                self.lines
                    .push(format!("Your answer: {}", response_text(&assessment.response)));
                self.lines.push(status_line(assessment.verdict));
            }
            QuestionKind::Descriptive(desc) => {
                self.lines
                    .push(format!("Reference answer: {}", desc.reference_answer));
                self.lines
                    .push(format!("Your answer: {}", response_text(&assessment.response)));
                self.lines.push(status_line(assessment.verdict));
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = self.lines.join("\n");
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }

    /// Where the transcript for (student, exam) lives inside `dir`.
    pub fn path_in(dir: &Path, student_id: &str, exam_code: &str) -> PathBuf {
        dir.join(format!("sheet{student_id}_{exam_code}.txt"))
    }

    /// Write the transcript into `dir`, replacing any earlier one for the same key.
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        let path = Self::path_in(dir, &self.student_id, &self.exam_code);
        std::fs::write(&path, self.render())
            .with_context(|| format!("failed to write transcript to {}", path.display()))?;
        Ok(path)
    }

    /// Read the transcript lines for (student, exam). `None` if there is none.
    pub fn load(dir: &Path, student_id: &str, exam_code: &str) -> Result<Option<Vec<String>>> {
        let path = Self::path_in(dir, student_id, exam_code);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content.lines().map(str::to_string).collect())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e)
                .with_context(|| format!("failed to read transcript {}", path.display())),
        }
    }
}

fn response_text(response: &Response) -> &str {
    match response {
        Response::Text(raw) | Response::InvalidChoice(raw) => raw,
        Response::Choice(_) => "",
    }
}

fn status_line(verdict: Verdict) -> String {
    match verdict {
        Verdict::Correct => "Status: true".to_string(),
        Verdict::Incorrect | Verdict::OutOfRange => "Status: false".to_string(),
        Verdict::Deferred => "Status: awaiting manual grading".to_string(),
    }
}

/// A descriptive answer captured during a session, for a human grader.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveAnswer {
    /// 1-based question number.
    pub number: usize,
    pub question: String,
    pub answer: String,
}

/// Where the review log for (student, exam) lives inside `dir`.
pub fn review_log_path(dir: &Path, student_id: &str, exam_code: &str) -> PathBuf {
    dir.join(format!("desc_{student_id}_{exam_code}.txt"))
}

/// Append descriptive answers to the review log for (student, exam).
pub fn append_review_log(
    dir: &Path,
    student_id: &str,
    exam_code: &str,
    answers: &[DescriptiveAnswer],
) -> Result<Option<PathBuf>> {
    if answers.is_empty() {
        return Ok(None);
    }
    std::fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let path = review_log_path(dir, student_id, exam_code);
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open review log {}", path.display()))?;
    for a in answers {
        writeln!(file, "Question {}: {}", a.number, a.question)?;
        writeln!(file, "Student answer: {}", a.answer)?;
        writeln!(file, "{REVIEW_SEPARATOR}")?;
    }
    Ok(Some(path))
}
