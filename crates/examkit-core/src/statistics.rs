//! Score aggregation and ranking over the result entries of one exam.
//!
//! All functions operate on the full multiset of entries, so a retake counts
//! as an extra participant.

use serde::{Deserialize, Serialize};

use crate::model::Exam;
use crate::results::ResultEntry;

/// Aggregate statistics for one exam.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExamStats {
    /// Number of entries, including retakes.
    pub count: usize,
    pub average: f64,
    pub max: f64,
}

/// Compute count, mean and maximum. `None` when nobody has taken the exam.
pub fn exam_stats(entries: &[ResultEntry]) -> Option<ExamStats> {
    if entries.is_empty() {
        return None;
    }
    let sum: f64 = entries.iter().map(|e| e.score).sum();
    let max = entries
        .iter()
        .map(|e| e.score)
        .fold(f64::NEG_INFINITY, f64::max);
    Some(ExamStats {
        count: entries.len(),
        average: sum / entries.len() as f64,
        max,
    })
}

/// 1 + the number of entries scoring strictly higher than `score`.
///
/// Ties share a rank, so every entry tied for the top score is ranked 1.
pub fn rank(score: f64, entries: &[ResultEntry]) -> usize {
    1 + entries.iter().filter(|e| e.score > score).count()
}

/// The student's score from their first entry in log order.
pub fn first_score(entries: &[ResultEntry], student_id: &str) -> Option<f64> {
    entries
        .iter()
        .find(|e| e.student_id == student_id)
        .map(|e| e.score)
}

/// Sum of positive marks; the best score a student can reach.
pub fn total_possible(exam: &Exam) -> f64 {
    exam.questions.iter().map(|q| q.positive_mark).sum()
}

/// Entries sorted by descending score. Equal scores keep log order.
pub fn ranked(entries: &[ResultEntry]) -> Vec<&ResultEntry> {
    let mut sorted: Vec<&ResultEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| b.score.total_cmp(&a.score));
    sorted
}

/// Format a score for reports: at most two decimals, no trailing zeros.
pub fn format_score(score: f64) -> String {
    let s = format!("{score:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
