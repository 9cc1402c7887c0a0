//! Per-student report cards and exam-wide grade listings.
//!
//! Both are derived from the result store plus the exam definition. "Nothing
//! to show" conditions are returned as outcome variants, not errors.

use serde::{Deserialize, Serialize};

use crate::directory::{ExamDirectory, StudentDirectory};
use crate::results::ResultStore;
use crate::statistics::{exam_stats, first_score, rank, ranked, total_possible};

/// A student's standing in one exam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentReport {
    pub student_id: String,
    /// Display name; empty if the student is not in the directory.
    pub student_name: String,
    pub exam_code: String,
    /// Score of the student's first entry in log order.
    pub score: f64,
    /// Sum of positive marks over the exam's questions.
    pub total_possible: f64,
    pub average: f64,
    pub max_score: f64,
    pub rank: usize,
    /// Number of entries for the exam, retakes included.
    pub participants: usize,
    /// Answer transcript from the session, if one was kept.
    pub transcript: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StudentReportOutcome {
    Ready(StudentReport),
    ExamNotFound,
    /// Nobody has taken the exam yet.
    NoParticipants,
    /// Others have taken the exam, but not this student.
    NotParticipated,
}

/// Build the report card for `student_id` in `exam_code`.
pub fn student_report(
    exams: &dyn ExamDirectory,
    students: &dyn StudentDirectory,
    store: &ResultStore,
    exam_code: &str,
    student_id: &str,
    transcript: Option<Vec<String>>,
) -> StudentReportOutcome {
    let Some(exam) = exams.find_exam(exam_code) else {
        return StudentReportOutcome::ExamNotFound;
    };

    let entries = store.all_for_exam(exam_code);
    let Some(stats) = exam_stats(entries) else {
        return StudentReportOutcome::NoParticipants;
    };
    let Some(score) = first_score(entries, student_id) else {
        return StudentReportOutcome::NotParticipated;
    };

    StudentReportOutcome::Ready(StudentReport {
        student_id: student_id.to_string(),
        student_name: students.student_name(student_id).unwrap_or_default().to_string(),
        exam_code: exam_code.to_string(),
        score,
        total_possible: total_possible(exam),
        average: stats.average,
        max_score: stats.max,
        rank: rank(score, entries),
        participants: stats.count,
        transcript,
    })
}

/// One line of the ranked grade listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRow {
    pub rank: usize,
    /// Display name; empty if the student is not in the directory.
    pub name: String,
    pub student_id: String,
    pub score: f64,
}

/// All results for one exam, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeListing {
    pub exam_code: String,
    pub rows: Vec<ListingRow>,
    pub max_score: f64,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GradeListingOutcome {
    Ready(GradeListing),
    NoParticipants,
}

/// Rank every entry for `exam_code` by descending score.
pub fn grade_listing(
    students: &dyn StudentDirectory,
    store: &ResultStore,
    exam_code: &str,
) -> GradeListingOutcome {
    let entries = store.all_for_exam(exam_code);
    let Some(stats) = exam_stats(entries) else {
        return GradeListingOutcome::NoParticipants;
    };

    let rows = ranked(entries)
        .into_iter()
        .map(|e| ListingRow {
            rank: rank(e.score, entries),
            name: students
                .student_name(&e.student_id)
                .unwrap_or_default()
                .to_string(),
            student_id: e.student_id.clone(),
            score: e.score,
        })
        .collect();

    GradeListingOutcome::Ready(GradeListing {
        exam_code: exam_code.to_string(),
        rows,
        max_score: stats.max,
        average: stats.average,
    })
}
